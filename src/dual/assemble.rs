//! Stitching of dual edges into Voronoi cells.
//!
//! Each triangulation vertex owns the dual edges of its incident primal
//! edges. Those dual edges are chained end-to-end into a polygon: a
//! forward pass grows the chain from the first edge, and if the chain does
//! not close (a hull vertex), a second pass grows it backwards from the
//! start. Open chains are closed with one implicit edge joining the two
//! dead ends.

use std::collections::VecDeque;

use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::dual::DualMesh;
use crate::geometry::Point;
use crate::triangulation::TriangulationInput;

/// Handling of cells that cannot be stitched into acceptable polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DegeneratePolicy {
    /// Drop open cells that would close into triangles. Such slivers sit
    /// on the hull and make poor control volumes.
    pub drop_open_triangles: bool,
}

impl Default for DegeneratePolicy {
    fn default() -> Self {
        Self {
            drop_open_triangles: true,
        }
    }
}

/// A stitched Voronoi cell, still in coordinate form (vertices are not yet
/// pooled).
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell {
    /// Index of the triangulation vertex this cell surrounds.
    pub source: usize,
    /// Reference centre: the source vertex for closed cells, the ring
    /// centre of mass for hull cells.
    pub centre: Point,
    /// Ring vertices, clockwise, starting at the most south-westerly.
    pub ring: Vec<Point>,
    /// Whether the cell was truncated at the domain hull.
    pub boundary: bool,
}

/// Stitch every vertex's dual edges into cells.
///
/// Cells whose chains cannot be stitched into the expected number of
/// vertices are dropped with a warning rather than failing the whole
/// build.
pub fn assemble_cells(
    tri: &TriangulationInput,
    dual: &DualMesh,
    policy: DegeneratePolicy,
) -> Vec<VoronoiCell> {
    // Dual edges incident to each triangulation vertex.
    let mut incident = vec![Vec::new(); tri.points.len()];
    for (m, e) in tri.edges.iter().enumerate() {
        incident[e[0]].push(m);
        incident[e[1]].push(m);
    }

    let mut cells = Vec::with_capacity(tri.points.len());
    for (n, edges) in incident.iter().enumerate() {
        if edges.is_empty() {
            continue;
        }
        let Some((chain, boundary)) = stitch_chain(dual, edges, n, tri.points[n], policy) else {
            continue;
        };

        let mut ring: Vec<Point> = chain.iter().map(|&v| dual.vertices[v]).collect();
        if ring.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            warn!(
                "dropping cell at vertex {n}: non-finite dual vertex (degenerate triangle)"
            );
            continue;
        }
        normalize_ring(&mut ring);

        let centre = if boundary {
            ring_mean(&ring)
        } else {
            tri.points[n]
        };
        cells.push(VoronoiCell {
            source: n,
            centre,
            ring,
            boundary,
        });
    }
    cells
}

/// Chain the dual edges incident to vertex `n` into a ring of dual vertex
/// indices. Returns `None` when the cell must be dropped.
fn stitch_chain(
    dual: &DualMesh,
    edges: &[usize],
    n: usize,
    at: Point,
    policy: DegeneratePolicy,
) -> Option<(Vec<usize>, bool)> {
    let k = edges.len();
    let mut used = vec![false; k];

    let [cs, first] = dual.edges[edges[0]];
    used[0] = true;
    let mut chain: VecDeque<usize> = VecDeque::with_capacity(k + 1);
    chain.push_back(cs);
    chain.push_back(first);
    let mut ce = first;
    let mut closed = false;

    // Forward pass: keep appending the far end of any unused edge that
    // touches the carried index.
    while let Some(next) = take_matching(dual, edges, &mut used, ce) {
        chain.push_back(next);
        ce = next;
        if ce == cs {
            closed = true;
            break;
        }
    }

    if closed {
        // The final entry repeats the start; the ring is everything
        // before it.
        chain.pop_back();
        if chain.len() != k {
            warn!(
                "cannot close cell at vertex {n} [{} {}]; removing cell",
                at.x, at.y
            );
            return None;
        }
        return Some((chain.into(), false));
    }

    // Hull cell: one implicit edge closes the ring, so a cell with k dual
    // edges carries k + 1 vertices.
    if k + 1 == 3 && policy.drop_open_triangles {
        debug!("dropping triangular hull cell at vertex {n}");
        return None;
    }

    // Backward pass from the start index.
    ce = cs;
    while let Some(next) = take_matching(dual, edges, &mut used, ce) {
        chain.push_front(next);
        ce = next;
    }

    if chain.len() != k + 1 {
        warn!(
            "cannot close cell at vertex {n} [{} {}]; removing cell",
            at.x, at.y
        );
        return None;
    }
    Some((chain.into(), true))
}

/// Find an unused incident edge with `ce` at either end, mark it used and
/// return its other endpoint.
fn take_matching(
    dual: &DualMesh,
    edges: &[usize],
    used: &mut [bool],
    ce: usize,
) -> Option<usize> {
    for (m, &e) in edges.iter().enumerate() {
        if used[m] {
            continue;
        }
        let [a, b] = dual.edges[e];
        if a == ce {
            used[m] = true;
            return Some(b);
        }
        if b == ce {
            used[m] = true;
            return Some(a);
        }
    }
    None
}

/// Order the ring clockwise about its centre of mass and rotate it so it
/// starts at the most south-westerly vertex.
///
/// All cells must wind in the same sense or edge-to-vertex maps built from
/// neighbouring cells point in opposite directions.
fn normalize_ring(ring: &mut Vec<Point>) {
    use std::f64::consts::PI;
    let c = ring_mean(ring);

    let mut keyed: Vec<(f64, Point)> = ring
        .iter()
        .map(|p| {
            let mut a = (p.y - c.y).atan2(p.x - c.x);
            if a < 0.0 {
                a += 2.0 * PI;
            }
            (a, *p)
        })
        .collect();
    keyed.sort_by(|u, v| u.0.total_cmp(&v.0));
    keyed.reverse(); // anticlockwise by angle -> clockwise order

    let pts: Vec<Point> = keyed.into_iter().map(|(_, p)| p).collect();

    // Tolerance for "equally westerly" scales with the cell extent.
    let max_dx = pts
        .iter()
        .tuple_combinations()
        .map(|(p, q)| (p.x - q.x).abs())
        .fold(1e-10f64, f64::max);
    let eps = 0.25 * max_dx;

    let mut masked = vec![false; pts.len()];
    for (m, p) in pts.iter().enumerate() {
        if pts.iter().any(|q| q.x < p.x && (p.x - q.x).abs() > eps) {
            masked[m] = true;
        }
    }
    let mut start = 0;
    let mut ysw = f64::INFINITY;
    for (m, p) in pts.iter().enumerate() {
        if !masked[m] && p.y < ysw {
            ysw = p.y;
            start = m;
        }
    }

    ring.clear();
    ring.extend(pts[start..].iter().chain(pts[..start].iter()));
}

fn ring_mean(ring: &[Point]) -> Point {
    let n = ring.len() as f64;
    let (sx, sy) = ring
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

//! Vertex pooling.
//!
//! Stitched cells arrive as per-cell coordinate rings in which shared
//! vertices are duplicated. Pooling collapses coincident coordinates into
//! a single indexed vertex list: every coordinate is tagged with its
//! provenance `(cell, slot)`, the tags are sorted by coordinate, and a
//! single scan assigns pooled indices with duplicates collapsing onto the
//! first occurrence. Slot 0 is the cell centre, slots `1..=n` the ring
//! vertices.

use crate::dual::VoronoiCell;
use crate::geometry::Point;

/// The deduplicated vertex list of a mesh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VertexPool {
    pub coords: Vec<Point>,
}

/// A cell re-expressed over pooled vertex indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PooledCell {
    /// Pooled index of the cell centre.
    pub centroid: usize,
    /// Pooled ring vertex indices, same order as the source ring.
    pub ring: Vec<usize>,
}

/// Pool the centres and ring vertices of `cells`.
///
/// `tolerance` is the coordinate quantum for coincidence: coordinates are
/// snapped to a grid of that spacing before comparison. A tolerance of
/// `0.0` collapses exactly equal coordinates only.
pub fn pool_vertices(cells: &[VoronoiCell], tolerance: f64) -> (VertexPool, Vec<PooledCell>) {
    // (snapped x, snapped y, cell, slot, original point)
    let mut tagged: Vec<(f64, f64, usize, usize, Point)> = Vec::new();
    for (c, cell) in cells.iter().enumerate() {
        for (i, p) in cell.ring.iter().enumerate() {
            tagged.push((snap(p.x, tolerance), snap(p.y, tolerance), c, i + 1, *p));
        }
    }
    for (c, cell) in cells.iter().enumerate() {
        tagged.push((
            snap(cell.centre.x, tolerance),
            snap(cell.centre.y, tolerance),
            c,
            0,
            cell.centre,
        ));
    }

    tagged.sort_by(|a, b| {
        a.0.total_cmp(&b.0)
            .then(a.1.total_cmp(&b.1))
            .then(a.2.cmp(&b.2))
            .then(a.3.cmp(&b.3))
    });

    let mut coords: Vec<Point> = Vec::new();
    let mut slots: Vec<Vec<usize>> = cells
        .iter()
        .map(|c| vec![usize::MAX; c.ring.len() + 1])
        .collect();
    let mut prev: Option<(f64, f64)> = None;
    for &(sx, sy, c, slot, p) in &tagged {
        if prev != Some((sx, sy)) {
            coords.push(p);
            prev = Some((sx, sy));
        }
        slots[c][slot] = coords.len() - 1;
    }

    let pooled = slots
        .into_iter()
        .map(|s| PooledCell {
            centroid: s[0],
            ring: s[1..].to_vec(),
        })
        .collect();
    (VertexPool { coords }, pooled)
}

fn snap(v: f64, tolerance: f64) -> f64 {
    if tolerance > 0.0 {
        (v / tolerance).round() * tolerance
    } else {
        v
    }
}

//! Open boundary binding.
//!
//! Open boundaries (tidal forcing sections and the like) are specified by
//! three coordinates: start, mid and end. The start and end are matched to
//! the nearest cells on the perimeter path; the mid coordinate settles
//! which way round the perimeter the segment runs. Every boundary edge of
//! every path cell between start and end belongs to the segment.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::mesh_error::MeshError;
use crate::pool::{PooledCell, VertexPool};
use crate::topology::adjacency::Adjacency;

/// A named open-boundary definition, in mesh coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenBoundarySpec {
    pub name: String,
    pub start: Point,
    pub mid: Point,
    pub end: Point,
}

/// One boundary edge of an open boundary segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObcEdge {
    /// Cell owning the edge.
    pub cell: usize,
    /// Pooled vertex indices of the edge endpoints, in ring order.
    pub va: usize,
    pub vb: usize,
}

/// An open boundary resolved against the mesh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenBoundarySegment {
    pub name: String,
    pub edges: Vec<ObcEdge>,
}

impl OpenBoundarySegment {
    /// Rewrite cell references through a removal remap.
    ///
    /// Referencing a removed cell is fatal: a forcing section that lost
    /// its cells must be fixed in the configuration, not silently
    /// truncated.
    pub fn remap_cells(&mut self, old_to_new: &[Option<usize>]) -> Result<(), MeshError> {
        for edge in &mut self.edges {
            match old_to_new[edge.cell] {
                Some(new) => edge.cell = new,
                None => {
                    return Err(MeshError::DanglingBoundaryCell {
                        name: self.name.clone(),
                        cell: edge.cell,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Bind `specs` to the perimeter `path`.
///
/// `path` is the output of [`crate::topology::perimeter::walk_perimeter`];
/// cell centres come from the pooled mesh.
pub fn bind_boundaries(
    specs: &[OpenBoundarySpec],
    path: &[usize],
    pool: &VertexPool,
    cells: &[PooledCell],
    adj: &Adjacency,
) -> Result<Vec<OpenBoundarySegment>, MeshError> {
    let centres: Vec<Point> = path
        .iter()
        .map(|&c| pool.coords[cells[c].centroid])
        .collect();

    let mut segments = Vec::with_capacity(specs.len());
    for spec in specs {
        let np = path.len();
        let mut si = nearest_index(&centres, spec.start);
        let mut ei = nearest_index(&centres, spec.end);
        if ei < si {
            std::mem::swap(&mut si, &mut ei);
        }

        let dir: isize = if si == ei {
            1
        } else {
            let mi = nearest_index(&centres, spec.mid);
            if mi == si || mi == ei {
                // The mid point resolves to an endpoint; only adjacent
                // endpoints make the short way unambiguous.
                if ei == si + 1 { 1 } else { -1 }
            } else {
                resolve_direction(si, ei, mi, np).ok_or_else(|| {
                    MeshError::AmbiguousBoundary {
                        name: spec.name.clone(),
                    }
                })?
            }
        };
        debug!(
            "boundary `{}`: path indices {si}..{ei}, direction {dir}",
            spec.name
        );

        // Collect every boundary edge of every path cell from si to ei,
        // stepping in `dir` with wrap-around.
        let mut edges = Vec::new();
        let mut n = si;
        for _ in 0..np {
            let cell = path[n];
            for j in adj.boundary_edges(cell) {
                let ring = &cells[cell].ring;
                edges.push(ObcEdge {
                    cell,
                    va: ring[j],
                    vb: ring[(j + 1) % ring.len()],
                });
            }
            if n == ei {
                break;
            }
            n = step(n, dir, np);
        }
        segments.push(OpenBoundarySegment {
            name: spec.name.clone(),
            edges,
        });
    }
    Ok(segments)
}

/// Index of the nearest path centre; first wins on ties.
fn nearest_index(centres: &[Point], p: Point) -> usize {
    let mut best = 0;
    let mut dmin = f64::INFINITY;
    for (i, c) in centres.iter().enumerate() {
        let d = p.dist(*c);
        if d < dmin {
            dmin = d;
            best = i;
        }
    }
    best
}

/// Scan forward from `si` towards `ei`; if the mid index is passed the
/// segment runs forward, else scan backward. `None` when the mid index is
/// on neither arc, which means the spec contradicts the perimeter.
fn resolve_direction(si: usize, ei: usize, mi: usize, np: usize) -> Option<isize> {
    let mut n = si;
    for _ in 0..np {
        if n == mi {
            return Some(1);
        }
        n = step(n, 1, np);
        if n == ei {
            break;
        }
    }
    let mut n = si;
    for _ in 0..np {
        if n == mi {
            return Some(-1);
        }
        n = step(n, -1, np);
        if n == ei {
            break;
        }
    }
    None
}

fn step(n: usize, dir: isize, np: usize) -> usize {
    if dir >= 0 {
        (n + 1) % np
    } else if n == 0 {
        np - 1
    } else {
        n - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_resolution_wraps() {
        // Path of 8; si=1, ei=6.
        assert_eq!(resolve_direction(1, 6, 3, 8), Some(1));
        assert_eq!(resolve_direction(1, 6, 7, 8), Some(-1));
        assert_eq!(resolve_direction(1, 6, 0, 8), Some(-1));
    }

    #[test]
    fn dangling_cell_reference_is_fatal() {
        let mut seg = OpenBoundarySegment {
            name: "east".into(),
            edges: vec![ObcEdge {
                cell: 2,
                va: 0,
                vb: 1,
            }],
        };
        let err = seg.remap_cells(&[Some(0), Some(1), None]).unwrap_err();
        assert_eq!(
            err,
            MeshError::DanglingBoundaryCell {
                name: "east".into(),
                cell: 2
            }
        );
    }

    #[test]
    fn surviving_cell_references_are_renumbered() {
        let mut seg = OpenBoundarySegment {
            name: "west".into(),
            edges: vec![ObcEdge {
                cell: 2,
                va: 0,
                vb: 1,
            }],
        };
        seg.remap_cells(&[None, Some(0), Some(1)]).unwrap();
        assert_eq!(seg.edges[0].cell, 1);
    }
}

//! Voronoi dual construction.
//!
//! The dual of a Delaunay triangulation assigns one dual point per
//! triangle and one dual edge per triangulation edge. Interior edges join
//! the dual points of the two triangles sharing them; hull edges are
//! truncated at the primal edge midpoint so boundary cells close along the
//! domain hull.

pub mod assemble;

pub use assemble::{DegeneratePolicy, VoronoiCell, assemble_cells};

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Point};
use crate::mesh_error::MeshError;
use crate::triangulation::TriangulationInput;

/// How to place the dual point of an obtuse triangle.
///
/// The circumcenter of an obtuse triangle lies outside it, which folds the
/// stitched Voronoi cells; falling back to the centre of mass keeps dual
/// points interior at the cost of exact edge orthogonality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObtusePolicy {
    /// Centre of mass for obtuse triangles, circumcenter otherwise.
    #[default]
    Centroid,
    /// Always the circumcenter.
    Circumcenter,
}

/// The Voronoi dual of a triangulation.
///
/// `edges[m]` is the dual of primal edge `m` of the source triangulation,
/// as indices into `vertices`.
#[derive(Debug, Clone, PartialEq)]
pub struct DualMesh {
    pub vertices: Vec<Point>,
    pub edges: Vec<[usize; 2]>,
}

/// Build the Voronoi dual of `tri`.
///
/// Dual vertex `t` for `t < tri.triangles.len()` is the dual point of
/// triangle `t`; midpoints of hull edges are appended after those.
pub fn build_dual(tri: &TriangulationInput, policy: ObtusePolicy) -> Result<DualMesh, MeshError> {
    let mut vertices: Vec<Point> = tri
        .triangles
        .iter()
        .map(|t| dual_point(tri, t, policy))
        .collect();

    let incident = tri.edge_triangles();
    let mut edges = Vec::with_capacity(tri.edges.len());
    for (m, tris) in incident.iter().enumerate() {
        let [a, b] = tri.edges[m];
        match tris.as_slice() {
            [t1, t2] => edges.push([*t1, *t2]),
            [t1] => {
                // Hull edge: truncate the dual at the primal midpoint.
                let mid = tri.points[a].midpoint(tri.points[b]);
                vertices.push(mid);
                edges.push([*t1, vertices.len() - 1]);
            }
            // Validation in TriangulationInput rules these out.
            [] => return Err(MeshError::EdgeWithoutTriangle(a, b)),
            _ => return Err(MeshError::NonManifoldEdge(a, b)),
        }
    }

    Ok(DualMesh { vertices, edges })
}

fn dual_point(tri: &TriangulationInput, t: &[usize; 3], policy: ObtusePolicy) -> Point {
    let a = tri.points[t[0]];
    let b = tri.points[t[1]];
    let c = tri.points[t[2]];
    match policy {
        ObtusePolicy::Centroid if geometry::is_obtuse(a, b, c) => geometry::centroid(a, b, c),
        _ => geometry::circumcenter(a, b, c),
    }
}

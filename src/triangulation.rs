//! Validated Delaunay triangulation input.
//!
//! The triangulation itself is produced elsewhere (JIGSAW, Triangle, or any
//! other generator); hydromesh consumes it as a black box of points, edges
//! and triangles and only checks the structural invariants the dual
//! construction relies on.

use hashbrown::HashMap;
use itertools::Itertools;

use crate::geometry::Point;
use crate::mesh_error::MeshError;

/// A planar triangulation handed to the Voronoi dual builder.
///
/// `edges` holds every undirected edge exactly once; each edge must be a
/// side of one (hull) or two (interior) triangles.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangulationInput {
    pub points: Vec<Point>,
    pub edges: Vec<[usize; 2]>,
    pub triangles: Vec<[usize; 3]>,
}

impl TriangulationInput {
    /// Build from explicit points, edges and triangles, validating the
    /// edge-sharing invariant.
    pub fn new(
        points: Vec<Point>,
        edges: Vec<[usize; 2]>,
        triangles: Vec<[usize; 3]>,
    ) -> Result<Self, MeshError> {
        let input = Self {
            points,
            edges,
            triangles,
        };
        input.validate()?;
        Ok(input)
    }

    /// Build from points and triangles alone, deriving the unique edge
    /// list from triangle sides.
    pub fn from_triangles(
        points: Vec<Point>,
        triangles: Vec<[usize; 3]>,
    ) -> Result<Self, MeshError> {
        check_vertex_range(&triangles, points.len())?;
        let edges: Vec<[usize; 2]> = triangles
            .iter()
            .flat_map(triangle_sides)
            .sorted_unstable()
            .dedup()
            .collect();
        Self::new(points, edges, triangles)
    }

    /// Number of incident triangles per edge, in edge order.
    pub(crate) fn edge_triangles(&self) -> Vec<Vec<usize>> {
        let mut index: HashMap<[usize; 2], usize> = HashMap::with_capacity(self.edges.len());
        for (m, e) in self.edges.iter().enumerate() {
            index.insert(sorted(*e), m);
        }
        let mut incident = vec![Vec::new(); self.edges.len()];
        for (t, tri) in self.triangles.iter().enumerate() {
            for side in triangle_sides(tri) {
                if let Some(&m) = index.get(&side) {
                    incident[m].push(t);
                }
            }
        }
        incident
    }

    fn validate(&self) -> Result<(), MeshError> {
        check_vertex_range(&self.triangles, self.points.len())?;
        for (t, e) in self.edges.iter().enumerate() {
            for &v in e {
                if v >= self.points.len() {
                    return Err(MeshError::VertexOutOfRange {
                        tri: t,
                        vertex: v,
                        count: self.points.len(),
                    });
                }
            }
        }

        // Every edge must be a side of one or two triangles.
        let incident = self.edge_triangles();
        for (m, tris) in incident.iter().enumerate() {
            let [a, b] = self.edges[m];
            match tris.len() {
                0 => return Err(MeshError::EdgeWithoutTriangle(a, b)),
                1 | 2 => {}
                _ => return Err(MeshError::NonManifoldEdge(a, b)),
            }
        }

        // Every point must be reachable from at least one edge, or it has
        // no dual cell.
        let mut touched = vec![false; self.points.len()];
        for e in &self.edges {
            touched[e[0]] = true;
            touched[e[1]] = true;
        }
        if let Some(v) = touched.iter().position(|t| !t) {
            return Err(MeshError::IsolatedVertex(v));
        }
        Ok(())
    }
}

fn check_vertex_range(triangles: &[[usize; 3]], count: usize) -> Result<(), MeshError> {
    for (t, tri) in triangles.iter().enumerate() {
        for &v in tri {
            if v >= count {
                return Err(MeshError::VertexOutOfRange {
                    tri: t,
                    vertex: v,
                    count,
                });
            }
        }
    }
    Ok(())
}

fn triangle_sides(tri: &[usize; 3]) -> [[usize; 2]; 3] {
    [
        sorted([tri[0], tri[1]]),
        sorted([tri[1], tri[2]]),
        sorted([tri[2], tri[0]]),
    ]
}

fn sorted([a, b]: [usize; 2]) -> [usize; 2] {
    if a <= b { [a, b] } else { [b, a] }
}

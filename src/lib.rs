//! # hydromesh
//!
//! hydromesh builds the unstructured polygonal meshes used by
//! finite-volume coastal ocean and estuary models. It consumes a Delaunay
//! triangulation (or a legacy structured grid), constructs the Voronoi
//! dual, stitches it into closed control volumes, deduplicates vertices,
//! derives cell-to-cell adjacency, removes landlocked "lakes", binds named
//! open boundaries to the mesh perimeter, and computes the per-edge
//! metrics a solver needs.
//!
//! ## Pipeline
//!
//! [`assembler::assemble`] runs the strict sequence:
//! polygons → land stripping → vertex pooling → adjacency → lake removal
//! → perimeter walk / open boundary binding → edge metrics, producing an
//! immutable [`assembler::Mesh`].
//!
//! ```no_run
//! use hydromesh::prelude::*;
//!
//! let grid = StructuredGrid::cartesian(3, 3, Point::new(0.0, 0.0), 1.0, 1.0);
//! let mesh = assemble(MeshInput::Grid(grid), None, &MeshConfig::default())?;
//! assert_eq!(mesh.cell_count(), 9);
//! # Ok::<(), hydromesh::mesh_error::MeshError>(())
//! ```
//!
//! ## Determinism
//!
//! Every stage is deterministic: ties in nearest-cell lookups resolve to
//! the first candidate, sorts are over total orders, and cell renumbering
//! preserves relative order.

pub mod assembler;
pub mod boundary;
pub mod config;
pub mod dual;
pub mod geometry;
pub mod grid;
pub mod io;
pub mod mesh_error;
pub mod pool;
pub mod topology;
pub mod triangulation;

/// A convenient prelude importing the most-used types.
pub mod prelude {
    pub use crate::assembler::{Mesh, MeshCell, MeshInput, assemble};
    pub use crate::boundary::{ObcEdge, OpenBoundarySegment, OpenBoundarySpec};
    pub use crate::config::MeshConfig;
    pub use crate::dual::{DegeneratePolicy, DualMesh, ObtusePolicy, VoronoiCell, build_dual};
    pub use crate::geometry::metrics::EdgeMetrics;
    pub use crate::geometry::{Point, Projection};
    pub use crate::grid::StructuredGrid;
    pub use crate::io::{read_mesh, write_mesh};
    pub use crate::mesh_error::MeshError;
    pub use crate::pool::{PooledCell, VertexPool, pool_vertices};
    pub use crate::topology::adjacency::{Adjacency, build_adjacency};
    pub use crate::topology::lakes::{CellRemap, lake_remap};
    pub use crate::topology::perimeter::walk_perimeter;
    pub use crate::triangulation::TriangulationInput;
}

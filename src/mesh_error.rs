//! MeshError: unified error type for hydromesh public APIs.
//!
//! Every fallible operation in the crate returns `Result<_, MeshError>`;
//! library code never panics on bad input.

use thiserror::Error;

/// Unified error type for hydromesh operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// A triangle references a vertex index outside the point list.
    #[error("triangle {tri} references vertex {vertex} outside point range 0..{count}")]
    VertexOutOfRange {
        tri: usize,
        vertex: usize,
        count: usize,
    },
    /// An input edge is not a side of any triangle.
    #[error("edge ({0}, {1}) is not a side of any triangle")]
    EdgeWithoutTriangle(usize, usize),
    /// An edge is shared by three or more triangles.
    #[error("edge ({0}, {1}) is shared by more than two triangles")]
    NonManifoldEdge(usize, usize),
    /// A vertex has no incident edges and cannot seed a dual cell.
    #[error("vertex {0} has no incident edges")]
    IsolatedVertex(usize),
    /// The mesh has no boundary edges, so no perimeter exists.
    #[error("mesh has no boundary edges; cannot trace a perimeter")]
    NoBoundary,
    /// The perimeter walk could not return to its starting cell.
    #[error("perimeter walk stuck at cell {stuck}; cannot return to start cell {start}")]
    PerimeterNotClosed { start: usize, stuck: usize },
    /// The mid point of an open boundary does not select a traversal
    /// direction between its start and end cells.
    #[error("open boundary `{name}`: mid point does not lie between start and end on the perimeter")]
    AmbiguousBoundary { name: String },
    /// An open boundary references a cell that lake removal eliminated.
    #[error("open boundary `{name}` references cell {cell} removed as a lake")]
    DanglingBoundaryCell { name: String, cell: usize },
    /// The interior seed coordinate matched no cell.
    #[error("no cell found near interior seed ({x}, {y})")]
    SeedOutsideMesh { x: f64, y: f64 },
    /// Bathymetry values do not line up one-to-one with cells.
    #[error("bathymetry has {got} values but the mesh has {expected} cells")]
    BathymetryMismatch { got: usize, expected: usize },
    /// Every candidate cell was dropped during assembly.
    #[error("every cell was dropped during assembly; no mesh to build")]
    EmptyMesh,
    /// A persisted mesh file could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
    /// An underlying I/O failure, flattened to a message so the error
    /// stays `Clone` + `PartialEq`.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for MeshError {
    fn from(err: std::io::Error) -> Self {
        MeshError::Io(err.to_string())
    }
}

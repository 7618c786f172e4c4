//! Mesh assembly configuration.
//!
//! `MeshConfig` carries everything the assembler needs besides the
//! geometry itself. It derives serde so model drivers can embed it in
//! their parameter files.

use serde::{Deserialize, Serialize};

use crate::boundary::OpenBoundarySpec;
use crate::dual::{DegeneratePolicy, ObtusePolicy};
use crate::geometry::{Point, Projection};

/// Configuration for [`crate::assembler::assemble`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Coordinate system used for edge metrics.
    pub projection: Projection,
    /// Coordinate quantum for vertex pooling; `0.0` collapses exactly
    /// equal coordinates only.
    pub dedup_tolerance: f64,
    /// A coordinate inside the main water body; when set, cells not
    /// connected to it are removed as lakes.
    pub interior_seed: Option<Point>,
    /// Open boundary definitions to bind against the perimeter.
    pub boundaries: Vec<OpenBoundarySpec>,
    /// Dual point placement for obtuse triangles.
    pub obtuse_policy: ObtusePolicy,
    /// Handling of cells that cannot be stitched cleanly.
    pub degenerate: DegeneratePolicy,
    /// Bathymetry value marking land cells; such cells are stripped
    /// before assembly.
    pub land_value: Option<f64>,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            projection: Projection::default(),
            dedup_tolerance: 0.0,
            interior_seed: None,
            boundaries: Vec::new(),
            obtuse_policy: ObtusePolicy::default(),
            degenerate: DegeneratePolicy::default(),
            land_value: None,
        }
    }
}

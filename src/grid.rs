//! Structured (curvilinear) grid input.
//!
//! Legacy model grids arrive as a lattice of cell corners; each cell is a
//! quadrilateral over four neighbouring corners. The assembler accepts
//! these directly, bypassing the Voronoi pipeline, so structured and
//! unstructured configurations share one mesh representation downstream.

use crate::dual::VoronoiCell;
use crate::geometry::Point;
use crate::mesh_error::MeshError;

/// An `nx` by `ny` grid of quadrilateral cells over an
/// `(nx + 1) * (ny + 1)` corner lattice.
///
/// Corners are row-major: corner `(i, j)` (column `i`, row `j`) lives at
/// `corners[j * (nx + 1) + i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredGrid {
    nx: usize,
    ny: usize,
    corners: Vec<Point>,
}

impl StructuredGrid {
    pub fn new(nx: usize, ny: usize, corners: Vec<Point>) -> Result<Self, MeshError> {
        let expected = (nx + 1) * (ny + 1);
        if corners.len() != expected {
            return Err(MeshError::Parse(format!(
                "structured grid needs {expected} corners for {nx}x{ny} cells, got {}",
                corners.len()
            )));
        }
        Ok(Self { nx, ny, corners })
    }

    /// A rectilinear grid with uniform spacing, for tests and simple
    /// domains.
    pub fn cartesian(nx: usize, ny: usize, origin: Point, dx: f64, dy: f64) -> Self {
        let mut corners = Vec::with_capacity((nx + 1) * (ny + 1));
        for j in 0..=ny {
            for i in 0..=nx {
                corners.push(Point::new(
                    origin.x + dx * i as f64,
                    origin.y + dy * j as f64,
                ));
            }
        }
        Self { nx, ny, corners }
    }

    pub fn cell_count(&self) -> usize {
        self.nx * self.ny
    }

    /// Cells as coordinate rings, clockwise from the south-west corner,
    /// with the corner mean as the reference centre. Cells touching the
    /// grid edge are flagged as boundary cells.
    pub fn cells(&self) -> Vec<VoronoiCell> {
        let stride = self.nx + 1;
        let mut cells = Vec::with_capacity(self.cell_count());
        for j in 0..self.ny {
            for i in 0..self.nx {
                let sw = self.corners[j * stride + i];
                let nw = self.corners[(j + 1) * stride + i];
                let ne = self.corners[(j + 1) * stride + i + 1];
                let se = self.corners[j * stride + i + 1];
                let ring = vec![sw, nw, ne, se];
                let centre = Point::new(
                    0.25 * (sw.x + nw.x + ne.x + se.x),
                    0.25 * (sw.y + nw.y + ne.y + se.y),
                );
                cells.push(VoronoiCell {
                    source: j * self.nx + i,
                    centre,
                    ring,
                    boundary: i == 0 || j == 0 || i == self.nx - 1 || j == self.ny - 1,
                });
            }
        }
        cells
    }
}

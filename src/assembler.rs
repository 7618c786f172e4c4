//! Mesh assembly pipeline.
//!
//! Runs the strict sequence that turns raw geometry into a solver-ready
//! mesh: polygon extraction (Voronoi dual or structured grid), land cell
//! stripping, vertex pooling, adjacency, lake removal, perimeter walk and
//! open boundary binding, then edge metrics. Each stage consumes the
//! output of the previous one; nothing is mutated after the `Mesh` is
//! built.

use log::{debug, info};

use crate::boundary::{OpenBoundarySegment, bind_boundaries};
use crate::config::MeshConfig;
use crate::dual::{VoronoiCell, assemble_cells, build_dual};
use crate::geometry::metrics::{EdgeMetrics, edge_metrics};
use crate::geometry::{Point, Projection};
use crate::grid::StructuredGrid;
use crate::mesh_error::MeshError;
use crate::pool::{PooledCell, pool_vertices};
use crate::topology::adjacency::{Adjacency, build_adjacency};
use crate::topology::lakes::lake_remap;
use crate::topology::perimeter::walk_perimeter;
use crate::triangulation::TriangulationInput;

/// Geometry source for a mesh build.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshInput {
    /// A Delaunay triangulation; cells are its Voronoi dual.
    Triangulation(TriangulationInput),
    /// A structured quadrilateral grid used as-is.
    Grid(StructuredGrid),
}

/// One cell of an assembled mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshCell {
    /// Pooled ring vertex indices, clockwise from the most south-westerly.
    pub ring: Vec<usize>,
    /// Pooled index of the cell centre.
    pub centroid: usize,
    /// Whether the cell has at least one boundary edge.
    pub boundary: bool,
}

impl MeshCell {
    pub fn sides(&self) -> usize {
        self.ring.len()
    }
}

/// An immutable, solver-ready unstructured mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Point>,
    cells: Vec<MeshCell>,
    adjacency: Adjacency,
    boundaries: Vec<OpenBoundarySegment>,
    metrics: EdgeMetrics,
    bathymetry: Option<Vec<f64>>,
    projection: Projection,
}

impl Mesh {
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn cells(&self) -> &[MeshCell] {
        &self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn boundaries(&self) -> &[OpenBoundarySegment] {
        &self.boundaries
    }

    pub fn metrics(&self) -> &EdgeMetrics {
        &self.metrics
    }

    pub fn bathymetry(&self) -> Option<&[f64]> {
        self.bathymetry.as_deref()
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Largest ring size over all cells.
    pub fn max_sides(&self) -> usize {
        self.cells.iter().map(MeshCell::sides).max().unwrap_or(0)
    }

    /// Assemble the final mesh from pooled parts, deriving boundary
    /// flags from the adjacency and computing metrics.
    pub(crate) fn from_parts(
        vertices: Vec<Point>,
        pooled: Vec<PooledCell>,
        boundaries: Vec<OpenBoundarySegment>,
        bathymetry: Option<Vec<f64>>,
        projection: Projection,
    ) -> Self {
        let adjacency = build_adjacency(
            &pooled.iter().map(|c| c.ring.as_slice()).collect::<Vec<_>>(),
        );
        let metrics = edge_metrics(
            &vertices,
            &pooled.iter().map(|c| c.ring.as_slice()).collect::<Vec<_>>(),
            projection,
        );
        let cells = pooled
            .into_iter()
            .enumerate()
            .map(|(i, c)| MeshCell {
                ring: c.ring,
                centroid: c.centroid,
                boundary: adjacency.is_boundary_cell(i),
            })
            .collect();
        Self {
            vertices,
            cells,
            adjacency,
            boundaries,
            metrics,
            bathymetry,
            projection,
        }
    }
}

/// Run the full assembly pipeline.
///
/// `bathymetry` is per input cell: one value per triangulation point for
/// [`MeshInput::Triangulation`], one per grid cell for [`MeshInput::Grid`].
pub fn assemble(
    input: MeshInput,
    bathymetry: Option<Vec<f64>>,
    config: &MeshConfig,
) -> Result<Mesh, MeshError> {
    // Polygon extraction.
    let (polys, source_count) = match input {
        MeshInput::Triangulation(tri) => {
            let dual = build_dual(&tri, config.obtuse_policy)?;
            let n = tri.points.len();
            (assemble_cells(&tri, &dual, config.degenerate), n)
        }
        MeshInput::Grid(grid) => {
            let n = grid.cell_count();
            (grid.cells(), n)
        }
    };
    debug!("assembly: {} candidate cells", polys.len());

    if let Some(b) = &bathymetry {
        if b.len() != source_count {
            return Err(MeshError::BathymetryMismatch {
                got: b.len(),
                expected: source_count,
            });
        }
    }
    let mut bathy: Option<Vec<f64>> =
        bathymetry.map(|b| polys.iter().map(|c| b[c.source]).collect());

    // Land stripping.
    let polys = match (config.land_value, &mut bathy) {
        (Some(land), Some(b)) => {
            let keep: Vec<bool> = b.iter().map(|&v| v != land).collect();
            let stripped: Vec<VoronoiCell> = polys
                .into_iter()
                .zip(&keep)
                .filter_map(|(c, &k)| k.then_some(c))
                .collect();
            *b = b
                .iter()
                .zip(&keep)
                .filter_map(|(&v, &k)| k.then_some(v))
                .collect();
            info!(
                "land stripping: {} cells removed",
                keep.iter().filter(|&&k| !k).count()
            );
            stripped
        }
        _ => polys,
    };
    if polys.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    // Vertex pooling and adjacency.
    let (pool, mut pooled) = pool_vertices(&polys, config.dedup_tolerance);
    let mut adjacency = build_adjacency(
        &pooled.iter().map(|c| c.ring.as_slice()).collect::<Vec<_>>(),
    );

    // Lake removal.
    if let Some(seed) = config.interior_seed {
        let centres: Vec<Point> = pooled.iter().map(|c| pool.coords[c.centroid]).collect();
        let remap = lake_remap(&adjacency, &centres, seed).ok_or(
            MeshError::SeedOutsideMesh {
                x: seed.x,
                y: seed.y,
            },
        )?;
        if remap.removed_count() > 0 {
            pooled = remap.select(&pooled);
            if let Some(b) = &mut bathy {
                *b = remap.select(b);
            }
            adjacency = adjacency.remap(&remap.old_to_new);
        }
    }

    // Perimeter walk and open boundary binding.
    let boundaries = if config.boundaries.is_empty() {
        Vec::new()
    } else {
        let path = walk_perimeter(&adjacency)?;
        bind_boundaries(&config.boundaries, &path, &pool, &pooled, &adjacency)?
    };

    Ok(Mesh::from_parts(
        pool.coords,
        pooled,
        boundaries,
        bathy,
        config.projection,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bathymetry_length_is_checked() {
        let grid = StructuredGrid::cartesian(2, 2, Point::new(0.0, 0.0), 1.0, 1.0);
        let err = assemble(
            MeshInput::Grid(grid),
            Some(vec![1.0; 3]),
            &MeshConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, MeshError::BathymetryMismatch { got: 3, expected: 4 });
    }

    #[test]
    fn land_cells_are_stripped() {
        let grid = StructuredGrid::cartesian(2, 1, Point::new(0.0, 0.0), 1.0, 1.0);
        let config = MeshConfig {
            land_value: Some(99.0),
            ..MeshConfig::default()
        };
        let mesh = assemble(
            MeshInput::Grid(grid),
            Some(vec![5.0, 99.0]),
            &config,
        )
        .unwrap();
        assert_eq!(mesh.cell_count(), 1);
        assert_eq!(mesh.bathymetry(), Some(&[5.0][..]));
    }

    #[test]
    fn all_land_is_an_empty_mesh() {
        let grid = StructuredGrid::cartesian(1, 1, Point::new(0.0, 0.0), 1.0, 1.0);
        let config = MeshConfig {
            land_value: Some(99.0),
            ..MeshConfig::default()
        };
        let err = assemble(MeshInput::Grid(grid), Some(vec![99.0]), &config).unwrap_err();
        assert_eq!(err, MeshError::EmptyMesh);
    }
}

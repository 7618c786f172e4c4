//! Per-edge length and orientation metrics for assembled cells.
//!
//! Finite-volume solvers need the length and orientation of every cell
//! edge to form face fluxes. Lengths and angles are kept as two separate
//! per-cell arrays, indexed the same way as the cell ring: entry `j` of a
//! cell describes the edge from ring vertex `j` to ring vertex `j + 1`
//! (wrapping).

use crate::geometry::{Point, Projection};

/// Edge lengths and orientations for every cell of a mesh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgeMetrics {
    /// `lengths[cell][j]`: length of edge `j`, in metres for geographic
    /// meshes and in coordinate units for planar meshes.
    pub lengths: Vec<Vec<f64>>,
    /// `angles[cell][j]`: orientation of edge `j` in radians (see
    /// [`Projection::bearing`]).
    pub angles: Vec<Vec<f64>>,
}

/// Compute edge metrics for rings of pooled vertex indices.
pub fn edge_metrics<R: AsRef<[usize]>>(
    vertices: &[Point],
    rings: &[R],
    projection: Projection,
) -> EdgeMetrics {
    let mut lengths = Vec::with_capacity(rings.len());
    let mut angles = Vec::with_capacity(rings.len());
    for ring in rings {
        let ring = ring.as_ref();
        let n = ring.len();
        let mut hs = Vec::with_capacity(n);
        let mut thetas = Vec::with_capacity(n);
        for j in 0..n {
            let a = vertices[ring[j]];
            let b = vertices[ring[(j + 1) % n]];
            hs.push(projection.distance(a, b));
            thetas.push(projection.bearing(a, b));
        }
        lengths.push(hs);
        angles.push(thetas);
    }
    EdgeMetrics { lengths, angles }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unit_square_metrics() {
        let vertices = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
        ];
        let rings = vec![vec![0usize, 1, 2, 3]];
        let m = edge_metrics(&vertices, &rings, Projection::Planar);
        assert_eq!(m.lengths[0].len(), 4);
        for h in &m.lengths[0] {
            assert_relative_eq!(*h, 1.0);
        }
        // Clockwise square: north, east, south, west in planar angles.
        use std::f64::consts::{FRAC_PI_2, PI};
        assert_relative_eq!(m.angles[0][0], FRAC_PI_2);
        assert_relative_eq!(m.angles[0][1], 0.0);
        assert_relative_eq!(m.angles[0][2], -FRAC_PI_2);
        assert_relative_eq!(m.angles[0][3].abs(), PI);
    }
}

//! Perimeter walk over boundary cells.
//!
//! Traces a closed path of cells along the domain boundary by rotating
//! around each cell's edges from the direction of entry and stepping to
//! the first unvisited neighbour that also touches the boundary. Dead ends
//! (single-cell spits) are escaped by relaxing the unvisited constraint
//! and re-entering through the edge after the one facing back.

use crate::mesh_error::MeshError;
use crate::topology::adjacency::Adjacency;

/// Walk the domain perimeter of `adj`.
///
/// Returns the path of boundary cells in traversal order. The walk starts
/// at the first cell with a boundary edge; that cell is not at the front
/// of the path but is appended once the walk returns to it. Fails with
/// [`MeshError::PerimeterNotClosed`] when no closed circuit exists and
/// with [`MeshError::NoBoundary`] when the mesh has no boundary edges.
pub fn walk_perimeter(adj: &Adjacency) -> Result<Vec<usize>, MeshError> {
    let ncells = adj.cell_count();
    // The start cell's first boundary edge seeds the rotational scan.
    let (start, mut jn) = (0..ncells)
        .find_map(|c| adj.first_boundary_edge(c).map(|j| (c, j)))
        .ok_or(MeshError::NoBoundary)?;

    let mut visited = vec![false; ncells];
    let mut path = Vec::new();
    let mut cn = start;

    for _ in 0..ncells {
        let mut found = false;
        let sides = adj.sides(cn);
        let mut j = jn;
        for _ in 0..sides {
            let step = adj.neighbor(cn, j);
            j = (j + 1) % sides;
            let Some((c, _)) = step else { continue };
            if let Some(js) = adj.first_boundary_edge(c) {
                if !visited[c] {
                    cn = c;
                    jn = js;
                    visited[cn] = true;
                    path.push(cn);
                    found = true;
                    break;
                }
            }
        }

        if !found {
            // Dead end: back out through any boundary neighbour, entering
            // it via the edge after the one that faces back here.
            let cp = cn;
            let mut j = jn;
            for _ in 0..sides {
                let step = adj.neighbor(cn, j);
                j = (j + 1) % sides;
                let Some((c, _)) = step else { continue };
                if adj.is_boundary_cell(c) {
                    cn = c;
                    for je in 0..adj.sides(cn) {
                        if adj.neighbor(cn, je).map(|(nc, _)| nc) == Some(cp) {
                            jn = (je + 1) % adj.sides(cn);
                        }
                    }
                    break;
                }
            }
        }

        if cn == start {
            return Ok(path);
        }
    }

    Err(MeshError::PerimeterNotClosed { start, stuck: cn })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::adjacency::build_adjacency;

    /// Quads of an `nx` by `ny` structured grid, clockwise rings over a
    /// corner lattice of `(nx + 1) * (ny + 1)` vertices.
    fn grid_rings(nx: usize, ny: usize) -> Vec<Vec<usize>> {
        let stride = nx + 1;
        let mut rings = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                let sw = j * stride + i;
                rings.push(vec![sw, sw + stride, sw + stride + 1, sw + 1]);
            }
        }
        rings
    }

    #[test]
    fn three_by_three_perimeter_visits_the_ring_cells() {
        let adj = build_adjacency(&grid_rings(3, 3));
        let path = walk_perimeter(&adj).unwrap();

        // Eight ring cells; the start cell is appended when the walk
        // closes.
        assert_eq!(path.len(), 8);
        assert_eq!(*path.last().unwrap(), 0);
        assert!(!path.contains(&4), "interior cell must not be on the path");
        // Every boundary cell appears exactly once.
        let mut seen = path.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn single_row_walk_backtracks_through_the_dead_end() {
        // A 3x1 strip: the walk reaches one end and must back out.
        let adj = build_adjacency(&grid_rings(3, 1));
        let path = walk_perimeter(&adj).unwrap();
        assert_eq!(*path.last().unwrap(), 0);
        assert!(path.contains(&2));
    }

    #[test]
    fn no_boundary_is_an_error() {
        // Tetrahedron surface: every edge is shared by exactly two
        // triangles, so there is no boundary to walk.
        let rings = vec![
            vec![0usize, 1, 2],
            vec![0usize, 3, 1],
            vec![1usize, 3, 2],
            vec![2usize, 3, 0],
        ];
        let adj = build_adjacency(&rings);
        assert_eq!(walk_perimeter(&adj), Err(MeshError::NoBoundary));
    }
}

//! Cell-to-cell adjacency from shared edges.
//!
//! Works on any polygon soup whose cells are rings of vertex indices: each
//! ring edge is emitted as a `(min, max, cell, local_edge)` tuple, the
//! tuples are sorted lexicographically, and duplicate edges end up
//! adjacent, identifying the neighbour pair. Edges that occur once are
//! domain boundary edges.

use crate::mesh_error::MeshError;

/// Symmetric neighbour map over cells.
///
/// `neighbor(cell, j)` yields the cell across local edge `j` together with
/// the matching local edge on that side, or `None` on the domain boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Adjacency {
    neighbors: Vec<Vec<Option<(usize, usize)>>>,
}

impl Adjacency {
    pub fn cell_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of edges of `cell`.
    pub fn sides(&self, cell: usize) -> usize {
        self.neighbors[cell].len()
    }

    pub fn neighbor(&self, cell: usize, edge: usize) -> Option<(usize, usize)> {
        self.neighbors[cell][edge]
    }

    pub fn is_boundary_edge(&self, cell: usize, edge: usize) -> bool {
        self.neighbors[cell][edge].is_none()
    }

    /// First local edge of `cell` with no neighbour, if any.
    pub fn first_boundary_edge(&self, cell: usize) -> Option<usize> {
        self.neighbors[cell].iter().position(Option::is_none)
    }

    pub fn is_boundary_cell(&self, cell: usize) -> bool {
        self.first_boundary_edge(cell).is_some()
    }

    /// Local boundary edges of `cell`, in ring order.
    pub fn boundary_edges(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors[cell]
            .iter()
            .enumerate()
            .filter_map(|(j, n)| n.is_none().then_some(j))
    }

    /// Rebuild the map over the retained cells of `old_to_new`.
    ///
    /// Neighbours mapped to `None` (removed cells) become boundary edges.
    pub fn remap(&self, old_to_new: &[Option<usize>]) -> Adjacency {
        let mut neighbors = vec![Vec::new(); old_to_new.iter().flatten().count()];
        for (old, new) in old_to_new.iter().enumerate() {
            let Some(new) = *new else { continue };
            neighbors[new] = self.neighbors[old]
                .iter()
                .map(|n| n.and_then(|(c, j)| old_to_new[c].map(|c2| (c2, j))))
                .collect();
        }
        Adjacency { neighbors }
    }

    /// Check the symmetry invariant: if `a` sees `b` across edge `j`, `b`
    /// sees `a` across the matching edge.
    pub fn check_symmetry(&self) -> Result<(), MeshError> {
        for (c, row) in self.neighbors.iter().enumerate() {
            for (j, n) in row.iter().enumerate() {
                if let Some((c2, j2)) = n {
                    if self.neighbors[*c2][*j2] != Some((c, j)) {
                        return Err(MeshError::Parse(format!(
                            "asymmetric adjacency: {c}/{j} -> {c2}/{j2}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Build the neighbour map for `rings` of vertex indices.
pub fn build_adjacency<R: AsRef<[usize]>>(rings: &[R]) -> Adjacency {
    let total: usize = rings.iter().map(|r| r.as_ref().len()).sum();
    let mut edges: Vec<(usize, usize, usize, usize)> = Vec::with_capacity(total);
    for (cell, ring) in rings.iter().enumerate() {
        let ring = ring.as_ref();
        let n = ring.len();
        for j in 0..n {
            let a = ring[j];
            let b = ring[(j + 1) % n];
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            edges.push((lo, hi, cell, j));
        }
    }

    // Duplicates are consecutive after the sort.
    edges.sort_unstable();

    let mut neighbors: Vec<Vec<Option<(usize, usize)>>> = rings
        .iter()
        .map(|r| vec![None; r.as_ref().len()])
        .collect();
    for w in edges.windows(2) {
        let (a1, b1, c1, j1) = w[0];
        let (a2, b2, c2, j2) = w[1];
        if a1 == a2 && b1 == b2 {
            neighbors[c1][j1] = Some((c2, j2));
            neighbors[c2][j2] = Some((c1, j1));
        }
    }

    let adj = Adjacency { neighbors };
    debug_assert!(adj.check_symmetry().is_ok());
    adj
}

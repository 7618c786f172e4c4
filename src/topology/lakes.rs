//! Lake removal.
//!
//! A mesh distilled from bathymetry can contain pockets of cells with no
//! connection to the main water body ("lakes"). Flood filling from a
//! nominated interior cell marks the connected component to keep; the rest
//! is removed and cell indices are renumbered densely, preserving the
//! relative order of the kept cells.

use log::info;

use crate::geometry::Point;

/// Dense renumbering produced by a cell-removal pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellRemap {
    /// Old indices of the kept cells, in order; `kept[new] == old`.
    pub kept: Vec<usize>,
    /// `old_to_new[old]` is the new index, or `None` for removed cells.
    pub old_to_new: Vec<Option<usize>>,
}

impl CellRemap {
    /// Build the remap from a keep mask.
    pub fn from_mask(mask: &[bool]) -> Self {
        let mut kept = Vec::new();
        let mut old_to_new = vec![None; mask.len()];
        for (old, &keep) in mask.iter().enumerate() {
            if keep {
                old_to_new[old] = Some(kept.len());
                kept.push(old);
            }
        }
        Self { kept, old_to_new }
    }

    pub fn removed_count(&self) -> usize {
        self.old_to_new.len() - self.kept.len()
    }

    /// Retain the kept entries of a per-cell vector, in order.
    pub fn select<T: Clone>(&self, values: &[T]) -> Vec<T> {
        self.kept.iter().map(|&old| values[old].clone()).collect()
    }
}

/// Index of the cell whose centre is nearest to `seed`.
pub fn nearest_cell(centres: &[Point], seed: Point) -> Option<usize> {
    let mut best = None;
    let mut dmin = f64::INFINITY;
    for (c, p) in centres.iter().enumerate() {
        let d = seed.dist(*p);
        if d < dmin {
            dmin = d;
            best = Some(c);
        }
    }
    best
}

/// Flood fill the connected component of `seed` over the neighbour map.
pub fn reachable_from(adj: &crate::topology::adjacency::Adjacency, seed: usize) -> Vec<bool> {
    let mut mark = vec![false; adj.cell_count()];
    let mut frontier = vec![seed];
    mark[seed] = true;
    while let Some(c) = frontier.pop() {
        for j in 0..adj.sides(c) {
            if let Some((cn, _)) = adj.neighbor(c, j) {
                if !mark[cn] {
                    mark[cn] = true;
                    frontier.push(cn);
                }
            }
        }
    }
    mark
}

/// Mark the component of the cell nearest `seed` and build the remap that
/// removes everything else.
pub fn lake_remap(
    adj: &crate::topology::adjacency::Adjacency,
    centres: &[Point],
    seed: Point,
) -> Option<CellRemap> {
    let start = nearest_cell(centres, seed)?;
    let mask = reachable_from(adj, start);
    let remap = CellRemap::from_mask(&mask);
    info!("lake removal: {} cells eliminated", remap.removed_count());
    Some(remap)
}

//! Grid Model
//!
//! The plate is a fixed 3x2 grid. Components cover either a single cell or
//! a 2x2 block, and no two components on the same layer may share a cell.

mod cell;
mod footprint;

pub use cell::{CellSet, GridCell, CELL_COUNT};
pub use footprint::{cells_occupied_by, Footprint, Placement};

/// Plate columns
pub const GRID_COLS: usize = 3;
/// Plate rows
pub const GRID_ROWS: usize = 2;

/// Union of the cells covered by a set of placements
pub fn occupied_cells<'a>(placements: impl IntoIterator<Item = &'a Placement>) -> CellSet {
    placements
        .into_iter()
        .fold(CellSet::EMPTY, |set, p| set.union(p.cells()))
}

/// Whether any of the placements covers `cell`
pub fn is_occupied<'a>(placements: impl IntoIterator<Item = &'a Placement>, cell: GridCell) -> bool {
    placements.into_iter().any(|p| p.cells().contains(cell))
}

/// Find an anchor for `footprint` that covers `cell` without touching `taken`.
///
/// Anchors are tried in ascending order, so a 4-cell block prefers anchor 0.
pub fn resolve_anchor(cell: GridCell, footprint: Footprint, taken: CellSet) -> Option<Placement> {
    footprint
        .valid_anchors()
        .into_iter()
        .filter_map(|anchor| Placement::new(anchor, footprint).ok())
        .find(|p| p.cells().contains(cell) && p.cells().is_disjoint(taken))
}

/// Lowest free cell, preferring `preferred` when it is free
pub fn first_free_cell(taken: CellSet, preferred: GridCell) -> Option<GridCell> {
    if !taken.contains(preferred) {
        return Some(preferred);
    }
    GridCell::ALL.into_iter().find(|c| !taken.contains(*c))
}

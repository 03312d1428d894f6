//! Plate cells and cell sets

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{GRID_COLS, GRID_ROWS};
use crate::error::{PlateError, Result};

/// Total number of cells on the plate
pub const CELL_COUNT: usize = GRID_COLS * GRID_ROWS;

/// A position on the plate, numbered row-major:
///
/// ```text
/// +---+---+---+
/// | 0 | 1 | 2 |
/// +---+---+---+
/// | 3 | 4 | 5 |
/// +---+---+---+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct GridCell(u8);

impl GridCell {
    /// Every cell on the plate in index order
    pub const ALL: [GridCell; CELL_COUNT] = [
        GridCell(0),
        GridCell(1),
        GridCell(2),
        GridCell(3),
        GridCell(4),
        GridCell(5),
    ];

    /// Create a cell from its index, rejecting anything off the plate
    pub fn new(index: usize) -> Result<Self> {
        if index < CELL_COUNT {
            Ok(GridCell(index as u8))
        } else {
            Err(PlateError::InvalidCell { index })
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn row(self) -> usize {
        self.index() / GRID_COLS
    }

    pub fn col(self) -> usize {
        self.index() % GRID_COLS
    }
}

impl TryFrom<usize> for GridCell {
    type Error = PlateError;

    fn try_from(index: usize) -> Result<Self> {
        GridCell::new(index)
    }
}

impl From<GridCell> for usize {
    fn from(cell: GridCell) -> usize {
        cell.index()
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A set of plate cells stored as a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellSet(u8);

impl CellSet {
    pub const EMPTY: CellSet = CellSet(0);

    pub fn single(cell: GridCell) -> Self {
        CellSet(1 << cell.0)
    }

    pub fn from_cells(cells: impl IntoIterator<Item = GridCell>) -> Self {
        cells
            .into_iter()
            .fold(CellSet::EMPTY, |set, cell| set.union(CellSet::single(cell)))
    }

    pub fn contains(self, cell: GridCell) -> bool {
        self.0 & (1 << cell.0) != 0
    }

    pub fn union(self, other: CellSet) -> CellSet {
        CellSet(self.0 | other.0)
    }

    pub fn is_disjoint(self, other: CellSet) -> bool {
        self.0 & other.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_full(self) -> bool {
        self.len() == CELL_COUNT
    }

    /// Cells in ascending index order
    pub fn iter(self) -> impl Iterator<Item = GridCell> {
        GridCell::ALL.into_iter().filter(move |cell| self.contains(*cell))
    }

    /// Cell indices in ascending order
    pub fn indices(self) -> Vec<usize> {
        self.iter().map(GridCell::index).collect()
    }
}

impl FromIterator<GridCell> for CellSet {
    fn from_iter<I: IntoIterator<Item = GridCell>>(iter: I) -> Self {
        CellSet::from_cells(iter)
    }
}

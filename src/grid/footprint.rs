//! Component footprints and validated placements

use std::fmt;

use serde::{Serialize, Serializer};

use super::cell::{CellSet, GridCell};
use crate::error::{PlateError, Result};

/// Anchors a 4-cell footprint may use, with the cells each one covers
const QUAD_FOOTPRINTS: [(usize, [usize; 4]); 2] = [(0, [0, 1, 3, 4]), (1, [1, 2, 4, 5])];

/// Number of cells a component covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Footprint {
    /// One cell at the anchor
    Single,
    /// A 2x2 block anchored at cell 0 or 1
    Quad,
}

impl Footprint {
    pub fn cell_count(self) -> usize {
        match self {
            Footprint::Single => 1,
            Footprint::Quad => 4,
        }
    }

    /// Anchors this footprint may be placed at
    pub fn valid_anchors(self) -> Vec<GridCell> {
        match self {
            Footprint::Single => GridCell::ALL.to_vec(),
            Footprint::Quad => QUAD_FOOTPRINTS
                .iter()
                .map(|(anchor, _)| GridCell::ALL[*anchor])
                .collect(),
        }
    }
}

impl Serialize for Footprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.cell_count() as u8)
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cell_count())
    }
}

/// Cells covered by a footprint at an anchor.
///
/// Fails for a 4-cell footprint anchored anywhere other than cell 0 or 1.
pub fn cells_occupied_by(position: GridCell, footprint: Footprint) -> Result<CellSet> {
    match footprint {
        Footprint::Single => Ok(CellSet::single(position)),
        Footprint::Quad => QUAD_FOOTPRINTS
            .iter()
            .find(|(anchor, _)| *anchor == position.index())
            .map(|(_, cells)| cells.iter().map(|i| GridCell::ALL[*i]).collect())
            .ok_or(PlateError::InvalidCell {
                index: position.index(),
            }),
    }
}

/// An anchor plus footprint that is known to fit on the plate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Placement {
    position: GridCell,
    #[serde(rename = "spaces")]
    footprint: Footprint,
    #[serde(skip)]
    cells: CellSet,
}

impl Placement {
    pub fn new(position: GridCell, footprint: Footprint) -> Result<Self> {
        let cells = cells_occupied_by(position, footprint)?;
        Ok(Self {
            position,
            footprint,
            cells,
        })
    }

    pub fn single(position: GridCell) -> Self {
        Self {
            position,
            footprint: Footprint::Single,
            cells: CellSet::single(position),
        }
    }

    pub fn position(&self) -> GridCell {
        self.position
    }

    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    pub fn cells(&self) -> CellSet {
        self.cells
    }
}

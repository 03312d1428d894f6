//! Read-only rendering snapshot of a session

use std::fmt;

use serde::Serialize;

use super::PlateSession;
use crate::grid::{GridCell, GRID_COLS, GRID_ROWS};
use crate::layers::{ComponentHandle, Layer};
use crate::wizard::WizardState;

/// One grid cell of the active layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub cell: GridCell,
    pub occupied: bool,
    /// Chosen for the placement in progress
    pub selected: bool,
    /// Can be picked right now
    pub hoverable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentView {
    pub layer: usize,
    pub index: usize,
    pub handle: ComponentHandle,
    pub label: String,
    pub spaces: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerView {
    pub id: usize,
    pub name: String,
    pub active: bool,
    pub components: Vec<ComponentView>,
}

impl LayerView {
    fn of(layer: &Layer, active: usize) -> Self {
        let components = layer
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| ComponentView {
                layer: layer.id(),
                index,
                handle: entry.handle,
                label: entry.component.label(),
                spaces: format!("Spaces: {}", entry.component.footprint()),
            })
            .collect();
        Self {
            id: layer.id(),
            name: layer.name(),
            active: layer.id() == active,
            components,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlateView {
    pub state: WizardState,
    pub prompt: &'static str,
    pub options: Vec<String>,
    pub active_layer: usize,
    pub cells: Vec<CellView>,
    pub layers: Vec<LayerView>,
}

impl PlateView {
    pub fn of(session: &PlateSession) -> Self {
        let state = session.state();
        let store = session.layers();
        let taken = store.active_layer().occupied_cells();
        let selected = session.wizard().selected_cell();

        let cells = GridCell::ALL
            .iter()
            .map(|&cell| {
                let occupied = taken.contains(cell);
                CellView {
                    cell,
                    occupied,
                    selected: selected == Some(cell),
                    hoverable: state == WizardState::SelectSquare && !occupied,
                }
            })
            .collect();

        let active = store.active_id();
        Self {
            state,
            prompt: state.prompt(),
            options: session.options(),
            active_layer: active,
            cells,
            layers: store.layers().iter().map(|l| LayerView::of(l, active)).collect(),
        }
    }

    pub fn cell(&self, index: usize) -> Option<&CellView> {
        self.cells.get(index)
    }
}

impl fmt::Display for PlateView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for layer in &self.layers {
            let marker = if layer.active { "*" } else { " " };
            write!(f, "{}{} ", marker, layer.name)?;
        }
        writeln!(f)?;

        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                let view = &self.cells[row * GRID_COLS + col];
                let mark = if view.selected {
                    '@'
                } else if view.occupied {
                    '#'
                } else if view.hoverable {
                    '+'
                } else {
                    '.'
                };
                write!(f, "[{} {}]", view.cell, mark)?;
            }
            writeln!(f)?;
        }

        if let Some(layer) = self.layers.iter().find(|l| l.active) {
            for component in &layer.components {
                writeln!(f, "  {}. {}  {}", component.index, component.label, component.spaces)?;
            }
        }

        write!(f, "{}", self.prompt)?;
        if !self.options.is_empty() {
            write!(f, " [{}]", self.options.join(", "))?;
        }
        Ok(())
    }
}

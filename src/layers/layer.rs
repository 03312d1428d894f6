//! A single plate layer
//!
//! A layer is an ordered list of placed components. Components keep the
//! order they were added in; removing one shifts the later ones down.

use std::fmt;

use serde::Serialize;

use crate::component::Component;
use crate::grid::{self, CellSet, GridCell};

/// Stable identity of a layer, unaffected by reindexing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LayerHandle(pub(crate) u64);

/// Stable identity of a placed component, unaffected by removals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ComponentHandle(pub(crate) u64);

impl fmt::Display for ComponentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// A component together with its stable handle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedComponent {
    pub handle: ComponentHandle,
    #[serde(flatten)]
    pub component: Component,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    #[serde(skip)]
    handle: LayerHandle,
    /// Position in the layer sequence
    id: usize,
    components: Vec<PlacedComponent>,
}

impl Layer {
    pub(crate) fn new(handle: LayerHandle, id: usize) -> Self {
        Self {
            handle,
            id,
            components: Vec::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: usize) {
        self.id = id;
    }

    pub fn handle(&self) -> LayerHandle {
        self.handle
    }

    /// Display name, numbered from 1
    pub fn name(&self) -> String {
        format!("Layer {}", self.id + 1)
    }

    /// Components in insertion order
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter().map(|entry| &entry.component)
    }

    pub fn entries(&self) -> &[PlacedComponent] {
        &self.components
    }

    pub fn get(&self, index: usize) -> Option<&Component> {
        self.components.get(index).map(|entry| &entry.component)
    }

    pub fn index_of(&self, handle: ComponentHandle) -> Option<usize> {
        self.components.iter().position(|entry| entry.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Every cell covered by a component on this layer
    pub fn occupied_cells(&self) -> CellSet {
        grid::occupied_cells(self.components().map(Component::placement))
    }

    pub fn is_occupied(&self, cell: GridCell) -> bool {
        grid::is_occupied(self.components().map(Component::placement), cell)
    }

    /// Append a component. The caller guarantees it does not overlap.
    pub(crate) fn push(&mut self, handle: ComponentHandle, component: Component) {
        self.components.push(PlacedComponent { handle, component });
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Option<PlacedComponent> {
        if index < self.components.len() {
            Some(self.components.remove(index))
        } else {
            None
        }
    }
}

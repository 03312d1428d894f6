//! Layer Store
//!
//! Owns every layer of the plate. Layer ids always equal their position
//! (`0..n`), layer 0 can never be removed, and at most [`MAX_LAYERS`] exist.
//! Layers and components also carry handles from monotonically increasing
//! counters so callers can refer to them across reindexing.

use log::{debug, info};
use serde::Serialize;

use super::layer::{ComponentHandle, Layer, LayerHandle};
use crate::component::Component;
use crate::error::{PlateError, Result};

/// Maximum number of layers on one plate
pub const MAX_LAYERS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct LayerStore {
    layers: Vec<Layer>,
    active: usize,
    #[serde(skip)]
    next_layer: u64,
    #[serde(skip)]
    next_component: u64,
}

impl LayerStore {
    /// A store holding a single empty layer 0
    pub fn new() -> Self {
        let mut store = Self {
            layers: Vec::new(),
            active: 0,
            next_layer: 0,
            next_component: 0,
        };
        let handle = store.allocate_layer();
        store.layers.push(Layer::new(handle, 0));
        store
    }

    fn allocate_layer(&mut self) -> LayerHandle {
        let handle = LayerHandle(self.next_layer);
        self.next_layer += 1;
        handle
    }

    fn allocate_component(&mut self) -> ComponentHandle {
        let handle = ComponentHandle(self.next_component);
        self.next_component += 1;
        handle
    }

    /// Append an empty layer and make it active.
    ///
    /// Returns the new layer id, or `None` when the plate already has
    /// [`MAX_LAYERS`] layers.
    pub fn add_layer(&mut self) -> Option<usize> {
        if self.layers.len() >= MAX_LAYERS {
            debug!("Add layer ignored: already at {} layers", MAX_LAYERS);
            return None;
        }
        let id = self.layers.len();
        let handle = self.allocate_layer();
        self.layers.push(Layer::new(handle, id));
        self.active = id;
        info!("Added {}", self.layers[id].name());
        Some(id)
    }

    /// Remove a layer and reindex the rest.
    ///
    /// Layer 0, the last remaining layer and unknown ids are left alone.
    /// The active layer becomes `min(id, new_count - 1)`.
    pub fn delete_layer(&mut self, id: usize) -> bool {
        if id == 0 || self.layers.len() <= 1 || id >= self.layers.len() {
            debug!("Delete layer {} ignored", id);
            return false;
        }
        self.layers.remove(id);
        for (index, layer) in self.layers.iter_mut().enumerate() {
            layer.set_id(index);
        }
        self.active = id.min(self.layers.len() - 1);
        info!("Deleted layer {}, {} remaining", id, self.layers.len());
        true
    }

    /// Switch the active layer; unknown ids are ignored
    pub fn set_active(&mut self, id: usize) -> bool {
        if id < self.layers.len() {
            self.active = id;
            true
        } else {
            debug!("Select layer {} ignored", id);
            false
        }
    }

    pub fn active_id(&self) -> usize {
        self.active
    }

    pub fn active_layer(&self) -> &Layer {
        &self.layers[self.active]
    }

    pub fn layer(&self, id: usize) -> Option<&Layer> {
        self.layers.get(id)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Current id of a layer, if it still exists
    pub fn resolve_layer(&self, handle: LayerHandle) -> Option<usize> {
        self.layers.iter().position(|layer| layer.handle() == handle)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_at_capacity(&self) -> bool {
        self.layers.len() >= MAX_LAYERS
    }

    /// Every component, in layer order then insertion order
    pub fn all_components(&self) -> impl Iterator<Item = &Component> {
        self.layers.iter().flat_map(|layer| layer.components())
    }

    /// Append a component to a layer.
    ///
    /// Rejected if the layer does not exist or the component would overlap
    /// one already on that layer.
    pub fn add_component(&mut self, layer_id: usize, component: Component) -> Result<ComponentHandle> {
        let layer = self
            .layers
            .get(layer_id)
            .ok_or(PlateError::LayerNotFound { id: layer_id })?;

        let overlap = layer.occupied_cells();
        if let Some(cell) = component.cells().iter().find(|c| overlap.contains(*c)) {
            return Err(PlateError::CellOccupied { cell: cell.index() });
        }

        let handle = self.allocate_component();
        info!(
            "Placed {} on {} at cell {}",
            component.label(),
            self.layers[layer_id].name(),
            component.position()
        );
        self.layers[layer_id].push(handle, component);
        Ok(handle)
    }

    /// Remove the component at `index` within a layer.
    ///
    /// Later components in that layer shift down by one.
    pub fn remove_component(&mut self, layer_id: usize, index: usize) -> Result<Component> {
        let layer = self
            .layers
            .get_mut(layer_id)
            .ok_or(PlateError::LayerNotFound { id: layer_id })?;
        let removed = layer
            .remove_at(index)
            .ok_or(PlateError::ComponentNotFound {
                layer: layer_id,
                index,
            })?;
        info!("Removed {} from layer {}", removed.component.label(), layer_id);
        Ok(removed.component)
    }

    /// Remove a component by handle, wherever it lives
    pub fn remove_by_handle(&mut self, handle: ComponentHandle) -> Option<Component> {
        let (layer_id, index) = self.locate(handle)?;
        self.remove_component(layer_id, index).ok()
    }

    /// Current layer id and index of a component
    pub fn locate(&self, handle: ComponentHandle) -> Option<(usize, usize)> {
        self.layers
            .iter()
            .enumerate()
            .find_map(|(id, layer)| layer.index_of(handle).map(|index| (id, index)))
    }
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new()
    }
}

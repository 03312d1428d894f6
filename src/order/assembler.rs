//! Order Assembler
//!
//! Flattens the plate into the order endpoint's payload. Assembly reads the
//! layers and never changes them, so a payload is a snapshot of the plate
//! at the moment it was taken.

use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::layers::Layer;
use crate::menu::Beverage;

/// One component as the order endpoint expects it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item: String,
    pub beverages: Option<Beverage>,
    pub add_ons: Vec<String>,
    pub category: String,
    pub subcategory: Option<String>,
    pub method: Option<String>,
    pub temp: Option<String>,
}

impl From<&Component> for OrderLine {
    fn from(component: &Component) -> Self {
        Self {
            item: component.item().to_string(),
            beverages: component.beverage().cloned(),
            add_ons: component.addons().to_vec(),
            category: component.category().to_string(),
            subcategory: component.subcategory().map(String::from),
            method: component.method().map(String::from),
            temp: component.temperature().map(String::from),
        }
    }
}

/// Request body for order creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub user_id: Option<String>,
    /// Every component of every layer, flattened
    pub layers: Vec<OrderLine>,
}

impl OrderPayload {
    /// Snapshot the plate for `user_id`
    pub fn snapshot(user_id: Option<&str>, layers: &[Layer]) -> Self {
        Self {
            user_id: user_id.map(String::from),
            layers: assemble(layers),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Order lines in layer order, then insertion order within each layer
pub fn assemble(layers: &[Layer]) -> Vec<OrderLine> {
    layers
        .iter()
        .flat_map(Layer::components)
        .map(OrderLine::from)
        .collect()
}

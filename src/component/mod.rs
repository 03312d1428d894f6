//! Plate Components
//!
//! A component is an immutable record of one food item placed on the
//! plate. Components are only produced by the factory functions here.

mod factory;

use serde::Serialize;

use crate::grid::{CellSet, Footprint, GridCell, Placement};
use crate::menu::Beverage;

pub use factory::{addon_component, beverage_component, build, footprint_for, seed_component};

/// One placed food item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    #[serde(flatten)]
    placement: Placement,
    category: String,
    subcategory: Option<String>,
    item: String,
    method: Option<String>,
    #[serde(rename = "temp")]
    temperature: Option<String>,
    addons: Vec<String>,
    beverage: Option<Beverage>,
}

impl Component {
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn position(&self) -> GridCell {
        self.placement.position()
    }

    pub fn footprint(&self) -> Footprint {
        self.placement.footprint()
    }

    /// Cells this component covers
    pub fn cells(&self) -> CellSet {
        self.placement.cells()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn subcategory(&self) -> Option<&str> {
        self.subcategory.as_deref()
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn temperature(&self) -> Option<&str> {
        self.temperature.as_deref()
    }

    pub fn addons(&self) -> &[String] {
        &self.addons
    }

    pub fn beverage(&self) -> Option<&Beverage> {
        self.beverage.as_ref()
    }

    /// Display label, e.g. `Medium Ribeye (Grilled)`
    pub fn label(&self) -> String {
        let mut label = String::new();
        if let Some(temp) = &self.temperature {
            label.push_str(temp);
            label.push(' ');
        }
        label.push_str(&self.item);
        if let Some(method) = &self.method {
            label.push_str(&format!(" ({})", method));
        }
        label
    }
}

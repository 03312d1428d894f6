//! The selection being assembled by the wizard

use serde::Serialize;

use crate::menu::{self, Beverage};

/// Choices made so far for the component being composed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PendingSelection {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub item: Option<String>,
    pub method: Option<String>,
    #[serde(rename = "temp")]
    pub temperature: Option<String>,
    pub addons: Vec<String>,
    pub beverage: Option<Beverage>,
}

impl PendingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the selection describes a 4-cell cut
    pub fn is_large_cut(&self) -> bool {
        menu::is_large_cut(self.category.as_deref(), self.subcategory.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

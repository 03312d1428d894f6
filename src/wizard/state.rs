//! Wizard states

use std::fmt;

use serde::Serialize;

/// Which input the UI must collect next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardState {
    /// Idle, waiting for "add component"
    Initial,
    /// Waiting for a free cell
    SelectSquare,
    SelectCategory,
    /// Only reached for Protein
    SelectSubcategory,
    SelectItem,
    SelectMethod,
    /// Only reached for Protein/Beef
    SelectTemperature,
    /// Seed dish add-ons
    SelectAddons,
    /// Seed dish beverage suggestions
    SelectBeverage,
}

impl WizardState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::SelectSquare => "select-square",
            Self::SelectCategory => "select-category",
            Self::SelectSubcategory => "select-subcategory",
            Self::SelectItem => "select-item",
            Self::SelectMethod => "select-method",
            Self::SelectTemperature => "select-temp",
            Self::SelectAddons => "select-addons",
            Self::SelectBeverage => "select-beverage",
        }
    }

    /// Prompt shown to the user in this state
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Initial => "Add Component",
            Self::SelectSquare => "Select a position on the plate",
            Self::SelectCategory => "Select Category",
            Self::SelectSubcategory => "Select Type",
            Self::SelectItem => "Select Item",
            Self::SelectMethod => "Select Cooking Method",
            Self::SelectTemperature => "Select Temperature",
            Self::SelectAddons => "Select Add-Ons",
            Self::SelectBeverage => "Select Beverage",
        }
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

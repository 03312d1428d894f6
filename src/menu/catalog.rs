//! Menu Catalog
//!
//! Read-only option tables the wizard offers at each step. The JSON shape
//! matches the front-end menu configuration:
//!
//! ```json
//! {
//!   "foodOptions": { "Protein": { "Beef": ["Ribeye"] }, "Dessert": ["Cake"] },
//!   "cookingMethods": { "Beef": ["Grilled"], "Dessert": ["Baked"] },
//!   "temperatures": ["Rare", "Medium"]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{BEEF, PROTEIN};
use crate::error::{PlateError, Result};

/// Items offered for a category, either directly or grouped by subcategory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FoodOptions {
    Items(Vec<String>),
    Subcategories(BTreeMap<String, Vec<String>>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCatalog {
    food_options: BTreeMap<String, FoodOptions>,
    /// Keyed by subcategory for Protein, by category otherwise
    cooking_methods: BTreeMap<String, Vec<String>>,
    temperatures: Vec<String>,
}

impl MenuCatalog {
    /// Build a catalog and check that the wizard can walk it
    pub fn new(
        food_options: BTreeMap<String, FoodOptions>,
        cooking_methods: BTreeMap<String, Vec<String>>,
        temperatures: Vec<String>,
    ) -> Result<Self> {
        let catalog = Self {
            food_options,
            cooking_methods,
            temperatures,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| PlateError::Config {
            reason: format!("Cannot open menu file {}: {}", path.display(), e),
        })?;
        let catalog: MenuCatalog = serde_json::from_reader(BufReader::new(file))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: MenuCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// The menu shipped with the application
    pub fn builtin() -> Self {
        fn list(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        let proteins = BTreeMap::from([
            ("Beef".to_string(), list(&["Ribeye", "Sirloin", "Filet Mignon"])),
            ("Chicken".to_string(), list(&["Breast", "Thigh", "Wings"])),
            ("Fish".to_string(), list(&["Salmon", "Cod", "Tuna"])),
            ("Pork".to_string(), list(&["Chop", "Tenderloin"])),
        ]);

        let food_options = BTreeMap::from([
            (PROTEIN.to_string(), FoodOptions::Subcategories(proteins)),
            (
                "Vegetables".to_string(),
                FoodOptions::Items(list(&["Broccoli", "Carrots", "Asparagus", "Green Beans"])),
            ),
            (
                "Starch".to_string(),
                FoodOptions::Items(list(&["Rice", "Mashed Potatoes", "Fries", "Pasta"])),
            ),
            (
                "Dessert".to_string(),
                FoodOptions::Items(list(&["Cake", "Pie", "Brownie"])),
            ),
        ]);

        let cooking_methods = BTreeMap::from([
            ("Beef".to_string(), list(&["Grilled", "Pan-Seared", "Broiled"])),
            ("Chicken".to_string(), list(&["Grilled", "Roasted", "Fried"])),
            ("Fish".to_string(), list(&["Grilled", "Baked", "Pan-Seared"])),
            ("Pork".to_string(), list(&["Grilled", "Roasted", "Braised"])),
            ("Vegetables".to_string(), list(&["Steamed", "Roasted", "Sauteed"])),
            ("Starch".to_string(), list(&["Boiled", "Baked", "Fried"])),
            ("Dessert".to_string(), list(&["Baked", "Chilled"])),
        ]);

        Self {
            food_options,
            cooking_methods,
            temperatures: list(&["Rare", "Medium Rare", "Medium", "Medium Well", "Well Done"]),
        }
    }

    /// Protein must be grouped by subcategory, every other category must be
    /// a flat list. Every list needs items and cooking methods, and Beef
    /// needs temperatures.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Err(PlateError::Config { reason });

        for (category, options) in &self.food_options {
            match (category.as_str(), options) {
                (PROTEIN, FoodOptions::Subcategories(subs)) => {
                    if subs.is_empty() {
                        return invalid("Protein has no subcategories".to_string());
                    }
                    for (sub, items) in subs {
                        if items.is_empty() {
                            return invalid(format!("No items for {}", sub));
                        }
                        if self.methods_for_key(sub).is_empty() {
                            return invalid(format!("No cooking methods for {}", sub));
                        }
                    }
                    if subs.contains_key(BEEF) && self.temperatures.is_empty() {
                        return invalid(format!("{} needs at least one temperature", BEEF));
                    }
                }
                (PROTEIN, FoodOptions::Items(_)) => {
                    return invalid("Protein must be grouped by subcategory".to_string());
                }
                (_, FoodOptions::Subcategories(_)) => {
                    return invalid(format!("Only Protein may have subcategories, not {}", category));
                }
                (_, FoodOptions::Items(items)) => {
                    if items.is_empty() {
                        return invalid(format!("No items for {}", category));
                    }
                    if self.methods_for_key(category).is_empty() {
                        return invalid(format!("No cooking methods for {}", category));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn categories(&self) -> Vec<&str> {
        self.food_options.keys().map(String::as_str).collect()
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.food_options.contains_key(category)
    }

    /// Subcategories of a category, empty for flat categories
    pub fn subcategories(&self, category: &str) -> Vec<&str> {
        match self.food_options.get(category) {
            Some(FoodOptions::Subcategories(subs)) => subs.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn items(&self, category: &str, subcategory: Option<&str>) -> Vec<&str> {
        let items = match (self.food_options.get(category), subcategory) {
            (Some(FoodOptions::Items(items)), None) => Some(items),
            (Some(FoodOptions::Subcategories(subs)), Some(sub)) => subs.get(sub),
            _ => None,
        };
        items
            .map(|items| items.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Cooking methods, looked up by subcategory when there is one
    pub fn methods(&self, category: &str, subcategory: Option<&str>) -> Vec<&str> {
        self.methods_for_key(subcategory.unwrap_or(category))
    }

    pub fn temperatures(&self) -> Vec<&str> {
        self.temperatures.iter().map(String::as_str).collect()
    }

    fn methods_for_key(&self, key: &str) -> Vec<&str> {
        self.cooking_methods
            .get(key)
            .map(|methods| methods.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl Default for MenuCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

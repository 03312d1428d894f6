//! Seed dishes
//!
//! A dish picked from the restaurant menu before composing. It pre-fills
//! layer 0 and may carry add-on and beverage suggestions.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PlateError, Result};

/// A beverage suggestion attached to a seed dish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beverage {
    pub beverage_id: serde_json::Value,
    pub name: String,
    #[serde(deserialize_with = "price_from_number_or_string")]
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
}

impl Beverage {
    /// Button label, e.g. `Lemonade - $3.50 (Soft Drink)`
    pub fn label(&self) -> String {
        match &self.category {
            Some(category) => format!("{} - ${:.2} ({})", self.name, self.price, category),
            None => format!("{} - ${:.2}", self.name, self.price),
        }
    }

    /// Match by id or by name
    pub fn matches(&self, key: &str) -> bool {
        self.name == key
            || match &self.beverage_id {
                serde_json::Value::String(id) => id == key,
                serde_json::Value::Number(id) => id.to_string() == key,
                _ => false,
            }
    }
}

/// Menu prices arrive either as numbers or as decimal strings
pub(crate) fn price_from_number_or_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Number(f64),
        Text(String),
    }

    match Price::deserialize(deserializer)? {
        Price::Number(price) => Ok(price),
        Price::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedDish {
    pub food_category: String,
    pub name: String,
    #[serde(default)]
    pub cooking_method: Option<String>,
    /// Comma-separated add-on names
    #[serde(default)]
    pub add_ons: Option<String>,
    #[serde(default)]
    pub recommended_beverage: Option<Vec<Beverage>>,
}

impl SeedDish {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| PlateError::Config {
            reason: format!("Cannot open seed dish {}: {}", path.display(), e),
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Add-on names, split on commas and trimmed
    pub fn addon_options(&self) -> Vec<String> {
        self.add_ons
            .as_deref()
            .map(|add_ons| {
                add_ons
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn beverage_options(&self) -> &[Beverage] {
        self.recommended_beverage.as_deref().unwrap_or(&[])
    }

    pub fn has_addons(&self) -> bool {
        !self.addon_options().is_empty()
    }

    pub fn has_beverages(&self) -> bool {
        !self.beverage_options().is_empty()
    }

    pub fn find_beverage(&self, key: &str) -> Option<&Beverage> {
        self.beverage_options().iter().find(|b| b.matches(key))
    }
}

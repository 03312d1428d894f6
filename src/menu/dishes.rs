//! Restaurant dish list
//!
//! The dishes a user can start a plate from, shown grouped by food
//! category. Picking one yields the [`SeedDish`] for a new session.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::seed::{price_from_number_or_string, SeedDish};
use crate::error::{PlateError, Result};

/// Food categories in the order the menu shows them
pub const DISH_SECTIONS: [&str; 3] = ["Appetizers", "Main Courses", "Desserts"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    #[serde(default)]
    pub dish_id: serde_json::Value,
    #[serde(default)]
    pub allergens: Option<String>,
    #[serde(default, deserialize_with = "optional_price")]
    pub price: Option<f64>,
    #[serde(flatten)]
    pub seed: SeedDish,
}

fn optional_price<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Price(#[serde(deserialize_with = "price_from_number_or_string")] f64);

    Ok(Option::<Price>::deserialize(deserializer)?.map(|p| p.0))
}

impl Dish {
    pub fn name(&self) -> &str {
        &self.seed.name
    }

    pub fn food_category(&self) -> &str {
        &self.seed.food_category
    }

    /// `No Allergens` when none are listed
    pub fn allergen_note(&self) -> String {
        match self.allergens.as_deref().map(str::trim) {
            Some(allergens) if !allergens.is_empty() => format!("Allergens: {}", allergens),
            _ => "No Allergens".to_string(),
        }
    }

    /// Menu line, e.g. `Wings - No Allergens - $9.50`
    pub fn listing(&self) -> String {
        match self.price {
            Some(price) => format!("{} - {} - ${:.2}", self.name(), self.allergen_note(), price),
            None => format!("{} - {}", self.name(), self.allergen_note()),
        }
    }
}

/// The dishes on offer, in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DishList {
    dishes: Vec<Dish>,
}

impl DishList {
    pub fn new(dishes: Vec<Dish>) -> Self {
        Self { dishes }
    }

    /// Load a JSON array of dishes
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| PlateError::Config {
            reason: format!("Cannot open dish list {}: {}", path.display(), e),
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    /// Find a dish by name, ignoring case, or by id
    pub fn find(&self, key: &str) -> Option<&Dish> {
        self.dishes.iter().find(|dish| {
            dish.name().eq_ignore_ascii_case(key)
                || match &dish.dish_id {
                    serde_json::Value::String(id) => id == key,
                    serde_json::Value::Number(id) => id.to_string() == key,
                    _ => false,
                }
        })
    }

    /// Dishes grouped by food category. The usual sections come first and
    /// are listed even when empty; other categories follow in file order.
    pub fn sections(&self) -> Vec<(&str, Vec<&Dish>)> {
        let mut sections: Vec<(&str, Vec<&Dish>)> =
            DISH_SECTIONS.iter().map(|name| (*name, Vec::new())).collect();
        for dish in &self.dishes {
            match sections.iter_mut().find(|(name, _)| *name == dish.food_category()) {
                Some((_, dishes)) => dishes.push(dish),
                None => sections.push((dish.food_category(), vec![dish])),
            }
        }
        sections
    }
}

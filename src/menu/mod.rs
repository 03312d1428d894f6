//! Menu Data
//!
//! Static option tables consulted by the wizard, the restaurant dish list,
//! and the optional seed dish that pre-populates a session.

mod catalog;
mod dishes;
mod seed;

pub use catalog::{FoodOptions, MenuCatalog};
pub use dishes::{Dish, DishList, DISH_SECTIONS};
pub use seed::{Beverage, SeedDish};

/// Category that branches into subcategories
pub const PROTEIN: &str = "Protein";
/// Protein subcategory that covers four cells and needs a temperature
pub const BEEF: &str = "Beef";
/// Category given to add-on components
pub const ADD_ON: &str = "Add-On";
/// Category given to beverage components
pub const BEVERAGE: &str = "Beverage";

/// Whether a category/subcategory pair is served as a large cut
pub fn is_large_cut(category: Option<&str>, subcategory: Option<&str>) -> bool {
    category == Some(PROTEIN) && subcategory == Some(BEEF)
}

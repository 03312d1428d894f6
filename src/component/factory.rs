//! Component Factory
//!
//! Turns a finished selection into an immutable [`Component`]. The footprint
//! is derived here and nowhere else: a Protein/Beef cut covers four cells,
//! everything else covers one.

use super::Component;
use crate::error::{PlateError, Result};
use crate::grid::{Footprint, GridCell, Placement};
use crate::menu::{Beverage, SeedDish, ADD_ON, BEVERAGE};
use crate::wizard::PendingSelection;

/// Footprint a selection will occupy
pub fn footprint_for(selection: &PendingSelection) -> Footprint {
    if selection.is_large_cut() {
        Footprint::Quad
    } else {
        Footprint::Single
    }
}

/// Build a component from a completed selection anchored at `position`.
///
/// Fails only for malformed input: a selection without category or item,
/// or a 4-cell cut anchored outside cells 0 and 1.
pub fn build(selection: &PendingSelection, position: GridCell) -> Result<Component> {
    let category = selection
        .category
        .clone()
        .ok_or(PlateError::IncompleteSelection { field: "category" })?;
    let item = selection
        .item
        .clone()
        .ok_or(PlateError::IncompleteSelection { field: "item" })?;
    let placement = Placement::new(position, footprint_for(selection))?;

    Ok(Component {
        placement,
        category,
        subcategory: selection.subcategory.clone(),
        item,
        method: selection.method.clone(),
        temperature: if selection.is_large_cut() {
            selection.temperature.clone()
        } else {
            None
        },
        addons: selection.addons.clone(),
        beverage: selection.beverage.clone(),
    })
}

/// A single-cell add-on with no cooking method
pub fn addon_component(addon: &str, position: GridCell) -> Component {
    Component {
        placement: Placement::single(position),
        category: ADD_ON.to_string(),
        subcategory: None,
        item: addon.to_string(),
        method: None,
        temperature: None,
        addons: Vec::new(),
        beverage: None,
    }
}

/// A single-cell beverage carrying its price for display
pub fn beverage_component(beverage: &Beverage, position: GridCell) -> Component {
    Component {
        placement: Placement::single(position),
        category: BEVERAGE.to_string(),
        subcategory: None,
        item: beverage.name.clone(),
        method: None,
        temperature: None,
        addons: Vec::new(),
        beverage: Some(beverage.clone()),
    }
}

/// The component a seed dish contributes to layer 0, always at cell 0
pub fn seed_component(seed: &SeedDish) -> Component {
    Component {
        placement: Placement::single(GridCell::ALL[0]),
        category: seed.food_category.clone(),
        subcategory: None,
        item: seed.name.clone(),
        method: seed.cooking_method.clone(),
        temperature: None,
        addons: Vec::new(),
        beverage: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cell(i: usize) -> GridCell {
        GridCell::new(i).unwrap()
    }

    fn selection(category: &str, subcategory: Option<&str>, item: &str, method: &str) -> PendingSelection {
        PendingSelection {
            category: Some(category.into()),
            subcategory: subcategory.map(String::from),
            item: Some(item.into()),
            method: Some(method.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_ribeye_covers_four_cells() {
        let mut ribeye = selection("Protein", Some("Beef"), "Ribeye", "Grilled");
        ribeye.temperature = Some("Medium".into());

        let component = build(&ribeye, cell(0)).unwrap();
        assert_eq!(component.footprint(), Footprint::Quad);
        assert_eq!(component.cells().indices(), vec![0, 1, 3, 4]);
        assert_eq!(component.temperature(), Some("Medium"));
        assert_eq!(component.label(), "Medium Ribeye (Grilled)");
    }

    #[test]
    fn test_other_selections_cover_one_cell() {
        let chicken = selection("Protein", Some("Chicken"), "Breast", "Roasted");
        let component = build(&chicken, cell(4)).unwrap();
        assert_eq!(component.footprint(), Footprint::Single);
        assert_eq!(component.cells().indices(), vec![4]);

        let cake = selection("Dessert", None, "Cake", "Baked");
        let component = build(&cake, cell(5)).unwrap();
        assert_eq!(component.footprint(), Footprint::Single);
        assert_eq!(component.subcategory(), None);
        assert_eq!(component.temperature(), None);
    }

    #[test]
    fn test_temperature_dropped_outside_large_cuts() {
        let mut fish = selection("Protein", Some("Fish"), "Salmon", "Grilled");
        fish.temperature = Some("Rare".into());
        assert_eq!(build(&fish, cell(2)).unwrap().temperature(), None);
    }

    #[test]
    fn test_malformed_selection() {
        let empty = PendingSelection::new();
        assert!(matches!(
            build(&empty, cell(0)),
            Err(PlateError::IncompleteSelection { field: "category" })
        ));

        let beef = selection("Protein", Some("Beef"), "Sirloin", "Broiled");
        assert!(matches!(
            build(&beef, cell(3)),
            Err(PlateError::InvalidCell { index: 3 })
        ));
    }

    #[test]
    fn test_accompaniments() {
        let addon = addon_component("Fries", cell(1));
        assert_eq!(addon.category(), "Add-On");
        assert_eq!(addon.method(), None);
        assert_eq!(addon.label(), "Fries");

        let lemonade = Beverage {
            beverage_id: serde_json::json!(3),
            name: "Lemonade".into(),
            price: 3.5,
            category: Some("Soft Drink".into()),
        };
        let drink = beverage_component(&lemonade, cell(2));
        assert_eq!(drink.category(), "Beverage");
        assert_eq!(drink.item(), "Lemonade");
        assert_eq!(drink.beverage(), Some(&lemonade));
    }

    #[test]
    fn test_component_json_shape() {
        let cake = build(&selection("Dessert", None, "Cake", "Baked"), cell(3)).unwrap();
        assert_eq!(
            serde_json::to_value(&cake).unwrap(),
            serde_json::json!({
                "position": 3,
                "spaces": 1,
                "category": "Dessert",
                "subcategory": null,
                "item": "Cake",
                "method": "Baked",
                "temp": null,
                "addons": [],
                "beverage": null
            })
        );
    }
}

//! Selection Wizard
//!
//! Drives the step-by-step capture of a component:
//!
//! ```text
//! Initial -> SelectSquare -> SelectCategory -> [SelectSubcategory] -> SelectItem
//!         -> SelectMethod -> [SelectTemperature] -> finalize -> Initial
//! ```
//!
//! A seed dish may instead start the wizard in `SelectAddons` or
//! `SelectBeverage`. Every transition either succeeds completely or returns
//! an error and leaves the wizard and the layers exactly as they were.

use log::debug;
use serde::Serialize;

use super::selection::PendingSelection;
use super::state::WizardState;
use crate::component::{self, Component};
use crate::error::{PlateError, Result};
use crate::grid::{self, CellSet, Footprint, GridCell};
use crate::layers::{ComponentHandle, LayerStore};
use crate::menu::{MenuCatalog, SeedDish, PROTEIN};

/// Result of an accepted transition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    /// State after the transition
    pub state: WizardState,
    /// Components appended to the active layer by this transition
    pub placed: Vec<ComponentHandle>,
}

impl Step {
    fn moved(state: WizardState) -> Self {
        Self {
            state,
            placed: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wizard {
    state: WizardState,
    selection: PendingSelection,
    /// Cell the user clicked
    cell: Option<GridCell>,
    /// Resolved anchor when the selection covers four cells
    anchor: Option<GridCell>,
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            state: WizardState::Initial,
            selection: PendingSelection::new(),
            cell: None,
            anchor: None,
        }
    }

    /// Starting point for a session seeded with a dish: add-ons first,
    /// then beverages, otherwise idle.
    pub fn for_seed(seed: &SeedDish) -> Self {
        let mut wizard = Self::new();
        wizard.state = if seed.has_addons() {
            WizardState::SelectAddons
        } else if seed.has_beverages() {
            WizardState::SelectBeverage
        } else {
            WizardState::Initial
        };
        wizard
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn selection(&self) -> &PendingSelection {
        &self.selection
    }

    /// Cell chosen for the placement in progress
    pub fn selected_cell(&self) -> Option<GridCell> {
        self.cell
    }

    /// Abort whatever is in progress. Always succeeds.
    pub fn reset(&mut self) {
        if self.state != WizardState::Initial {
            debug!("Wizard reset from {}", self.state);
        }
        self.state = WizardState::Initial;
        self.selection.clear();
        self.cell = None;
        self.anchor = None;
    }

    fn ensure_state(&self, expected: WizardState, action: &str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(PlateError::invalid_transition(self.state, action))
        }
    }

    fn advance(&mut self, state: WizardState) -> Step {
        debug!("Wizard {} -> {}", self.state, state);
        self.state = state;
        Step::moved(state)
    }

    /// `Initial -> SelectSquare`
    pub fn begin(&mut self) -> Result<Step> {
        self.ensure_state(WizardState::Initial, "add component")?;
        Ok(self.advance(WizardState::SelectSquare))
    }

    /// `SelectSquare -> SelectCategory`, only for a free cell on the active layer
    pub fn pick_cell(&mut self, index: usize, layers: &LayerStore) -> Result<Step> {
        self.ensure_state(WizardState::SelectSquare, "pick cell")?;
        let cell = GridCell::new(index)?;
        if layers.active_layer().is_occupied(cell) {
            return Err(PlateError::CellOccupied { cell: index });
        }
        self.cell = Some(cell);
        Ok(self.advance(WizardState::SelectCategory))
    }

    /// `SelectCategory -> SelectSubcategory` for Protein, `-> SelectItem` otherwise
    pub fn choose_category(&mut self, category: &str, catalog: &MenuCatalog) -> Result<Step> {
        self.ensure_state(WizardState::SelectCategory, "choose category")?;
        if !catalog.has_category(category) {
            return Err(PlateError::unknown_option(self.state, category));
        }
        self.selection.category = Some(category.to_string());
        let next = if category == PROTEIN {
            WizardState::SelectSubcategory
        } else {
            WizardState::SelectItem
        };
        Ok(self.advance(next))
    }

    /// `SelectSubcategory -> SelectItem`.
    ///
    /// Choosing Beef fixes the 4-cell anchor around the picked cell, and is
    /// rejected when no anchor fits on the active layer.
    pub fn choose_subcategory(
        &mut self,
        subcategory: &str,
        catalog: &MenuCatalog,
        layers: &LayerStore,
    ) -> Result<Step> {
        self.ensure_state(WizardState::SelectSubcategory, "choose subcategory")?;
        let category = self.selection.category.as_deref().unwrap_or_default();
        if !catalog.subcategories(category).contains(&subcategory) {
            return Err(PlateError::unknown_option(self.state, subcategory));
        }

        let mut selection = self.selection.clone();
        selection.subcategory = Some(subcategory.to_string());
        let anchor = if selection.is_large_cut() {
            let cell = self.require_cell()?;
            let taken = layers.active_layer().occupied_cells();
            let placement = grid::resolve_anchor(cell, Footprint::Quad, taken)
                .ok_or(PlateError::NoRoom { cell: cell.index() })?;
            Some(placement.position())
        } else {
            None
        };

        self.selection = selection;
        self.anchor = anchor;
        Ok(self.advance(WizardState::SelectItem))
    }

    /// `SelectItem -> SelectMethod`
    pub fn choose_item(&mut self, item: &str, catalog: &MenuCatalog) -> Result<Step> {
        self.ensure_state(WizardState::SelectItem, "choose item")?;
        let (category, subcategory) = self.menu_path();
        if !catalog.items(category, subcategory).contains(&item) {
            return Err(PlateError::unknown_option(self.state, item));
        }
        self.selection.item = Some(item.to_string());
        Ok(self.advance(WizardState::SelectMethod))
    }

    /// `SelectMethod -> SelectTemperature` for Protein/Beef, finalize otherwise
    pub fn choose_method(
        &mut self,
        method: &str,
        catalog: &MenuCatalog,
        layers: &mut LayerStore,
    ) -> Result<Step> {
        self.ensure_state(WizardState::SelectMethod, "choose method")?;
        let (category, subcategory) = self.menu_path();
        if !catalog.methods(category, subcategory).contains(&method) {
            return Err(PlateError::unknown_option(self.state, method));
        }

        let mut selection = self.selection.clone();
        selection.method = Some(method.to_string());
        if selection.is_large_cut() {
            self.selection = selection;
            Ok(self.advance(WizardState::SelectTemperature))
        } else {
            self.finalize(selection, layers)
        }
    }

    /// `SelectTemperature -> finalize`
    pub fn choose_temperature(
        &mut self,
        temperature: &str,
        catalog: &MenuCatalog,
        layers: &mut LayerStore,
    ) -> Result<Step> {
        self.ensure_state(WizardState::SelectTemperature, "choose temperature")?;
        if !catalog.temperatures().contains(&temperature) {
            return Err(PlateError::unknown_option(self.state, temperature));
        }
        let mut selection = self.selection.clone();
        selection.temperature = Some(temperature.to_string());
        self.finalize(selection, layers)
    }

    /// Build the component, append it to the active layer and go idle
    fn finalize(&mut self, selection: PendingSelection, layers: &mut LayerStore) -> Result<Step> {
        let position = match self.anchor {
            Some(anchor) => anchor,
            None => self.require_cell()?,
        };
        let component = component::build(&selection, position)?;
        let handle = layers.add_component(layers.active_id(), component)?;
        self.reset();
        Ok(Step {
            state: self.state,
            placed: vec![handle],
        })
    }

    /// `SelectAddons -> SelectBeverage | Initial`.
    ///
    /// One Add-On component per chosen name. Each goes to the picked cell
    /// if there is one and it is free, else cell 0, else the lowest free cell.
    pub fn choose_addons<S: AsRef<str>>(
        &mut self,
        addons: &[S],
        seed: &SeedDish,
        layers: &mut LayerStore,
    ) -> Result<Step> {
        self.ensure_state(WizardState::SelectAddons, "choose add-ons")?;
        let offered = seed.addon_options();
        let chosen: Vec<&str> = addons.iter().map(AsRef::as_ref).collect();
        if chosen.is_empty() {
            return Err(PlateError::unknown_option(self.state, ""));
        }
        if let Some(unknown) = chosen.iter().find(|a| !offered.iter().any(|o| o == *a)) {
            return Err(PlateError::unknown_option(self.state, *unknown));
        }

        let positions = self.accompaniment_cells(chosen.len(), layers.active_layer().occupied_cells())?;
        let components: Vec<Component> = chosen
            .iter()
            .zip(positions)
            .map(|(addon, cell)| component::addon_component(addon, cell))
            .collect();
        let placed = Self::place_all(components, layers)?;

        let next = if seed.has_beverages() {
            self.advance(WizardState::SelectBeverage).state
        } else {
            self.reset();
            self.state
        };
        Ok(Step { state: next, placed })
    }

    /// `SelectBeverage -> Initial`, matching the beverage by id or name
    pub fn choose_beverage(&mut self, key: &str, seed: &SeedDish, layers: &mut LayerStore) -> Result<Step> {
        self.ensure_state(WizardState::SelectBeverage, "choose beverage")?;
        let beverage = seed
            .find_beverage(key)
            .ok_or_else(|| PlateError::unknown_option(self.state, key))?;

        let positions = self.accompaniment_cells(1, layers.active_layer().occupied_cells())?;
        let components = vec![component::beverage_component(beverage, positions[0])];
        let placed = Self::place_all(components, layers)?;
        self.reset();
        Ok(Step {
            state: self.state,
            placed,
        })
    }

    /// Pass over an optional step
    pub fn skip(&mut self, seed: Option<&SeedDish>) -> Result<Step> {
        match self.state {
            WizardState::SelectAddons if seed.map_or(false, SeedDish::has_beverages) => {
                Ok(self.advance(WizardState::SelectBeverage))
            }
            WizardState::SelectAddons | WizardState::SelectBeverage => {
                self.reset();
                Ok(Step::moved(self.state))
            }
            _ => Err(PlateError::invalid_transition(self.state, "skip")),
        }
    }

    /// Choices to offer in the current state
    pub fn options(&self, catalog: &MenuCatalog, seed: Option<&SeedDish>) -> Vec<String> {
        let (category, subcategory) = self.menu_path();
        let options: Vec<&str> = match self.state {
            WizardState::Initial | WizardState::SelectSquare => Vec::new(),
            WizardState::SelectCategory => catalog.categories(),
            WizardState::SelectSubcategory => catalog.subcategories(category),
            WizardState::SelectItem => catalog.items(category, subcategory),
            WizardState::SelectMethod => catalog.methods(category, subcategory),
            WizardState::SelectTemperature => catalog.temperatures(),
            WizardState::SelectAddons => {
                return seed.map(SeedDish::addon_options).unwrap_or_default();
            }
            WizardState::SelectBeverage => {
                return seed
                    .map(|s| s.beverage_options().iter().map(|b| b.label()).collect())
                    .unwrap_or_default();
            }
        };
        options.into_iter().map(String::from).collect()
    }

    fn menu_path(&self) -> (&str, Option<&str>) {
        (
            self.selection.category.as_deref().unwrap_or_default(),
            self.selection.subcategory.as_deref(),
        )
    }

    fn require_cell(&self) -> Result<GridCell> {
        self.cell
            .ok_or_else(|| PlateError::invalid_transition(self.state, "finalize without a cell"))
    }

    /// Cells for `count` single-cell accompaniments, all chosen up front so
    /// nothing is placed unless everything fits
    fn accompaniment_cells(&self, count: usize, mut taken: CellSet) -> Result<Vec<GridCell>> {
        let preferred = self.cell.unwrap_or(GridCell::ALL[0]);
        let mut cells = Vec::with_capacity(count);
        for _ in 0..count {
            let cell = grid::first_free_cell(taken, preferred)
                .ok_or(PlateError::NoRoom { cell: preferred.index() })?;
            taken = taken.union(CellSet::single(cell));
            cells.push(cell);
        }
        Ok(cells)
    }

    fn place_all(components: Vec<Component>, layers: &mut LayerStore) -> Result<Vec<ComponentHandle>> {
        let layer_id = layers.active_id();
        components
            .into_iter()
            .map(|c| layers.add_component(layer_id, c))
            .collect()
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    struct Fixture {
        wizard: Wizard,
        catalog: MenuCatalog,
        layers: LayerStore,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                wizard: Wizard::new(),
                catalog: MenuCatalog::builtin(),
                layers: LayerStore::new(),
            }
        }

        fn at_category(cell: usize) -> Self {
            let mut f = Self::new();
            f.wizard.begin().unwrap();
            f.wizard.pick_cell(cell, &f.layers).unwrap();
            f
        }

        fn protein(&mut self, subcategory: &str, item: &str) {
            self.wizard.choose_category("Protein", &self.catalog).unwrap();
            self.wizard
                .choose_subcategory(subcategory, &self.catalog, &self.layers)
                .unwrap();
            self.wizard.choose_item(item, &self.catalog).unwrap();
        }
    }

    fn seed(add_ons: Option<&str>, beverages: bool) -> SeedDish {
        let recommended_beverage = beverages.then(|| {
            vec![crate::menu::Beverage {
                beverage_id: serde_json::json!(1),
                name: "Iced Tea".into(),
                price: 2.5,
                category: Some("Soft Drink".into()),
            }]
        });
        SeedDish {
            food_category: "Main Courses".into(),
            name: "Burger".into(),
            cooking_method: Some("Grilled".into()),
            add_ons: add_ons.map(String::from),
            recommended_beverage,
        }
    }

    #[test]
    fn test_dessert_flow_skips_subcategory_and_temperature() {
        let mut f = Fixture::at_category(0);
        let step = f.wizard.choose_category("Dessert", &f.catalog).unwrap();
        assert_eq!(step.state, WizardState::SelectItem);
        let step = f.wizard.choose_item("Cake", &f.catalog).unwrap();
        assert_eq!(step.state, WizardState::SelectMethod);

        let step = f.wizard.choose_method("Baked", &f.catalog, &mut f.layers).unwrap();
        assert_eq!(step.state, WizardState::Initial);
        assert_eq!(step.placed.len(), 1);

        let cake = f.layers.active_layer().get(0).unwrap();
        assert_eq!(cake.footprint(), Footprint::Single);
        assert_eq!(cake.position().index(), 0);
        assert_eq!(cake.temperature(), None);
        assert!(f.wizard.selection().is_empty());
        assert_eq!(f.wizard.selected_cell(), None);
    }

    #[test]
    fn test_beef_flow_asks_temperature() {
        let mut f = Fixture::at_category(0);
        f.protein("Beef", "Ribeye");
        let step = f.wizard.choose_method("Grilled", &f.catalog, &mut f.layers).unwrap();
        assert_eq!(step.state, WizardState::SelectTemperature);
        assert!(f.layers.active_layer().is_empty());

        f.wizard.choose_temperature("Medium", &f.catalog, &mut f.layers).unwrap();
        let ribeye = f.layers.active_layer().get(0).unwrap();
        assert_eq!(ribeye.footprint(), Footprint::Quad);
        assert_eq!(ribeye.cells().indices(), vec![0, 1, 3, 4]);
        assert_eq!(ribeye.temperature(), Some("Medium"));
        assert_eq!(f.wizard.state(), WizardState::Initial);
    }

    #[test_case("Chicken", "Breast", "Grilled")]
    #[test_case("Fish", "Salmon", "Baked")]
    #[test_case("Pork", "Chop", "Braised")]
    fn test_other_proteins_finalize_after_method(subcategory: &str, item: &str, method: &str) {
        let mut f = Fixture::at_category(2);
        f.protein(subcategory, item);
        let step = f.wizard.choose_method(method, &f.catalog, &mut f.layers).unwrap();
        assert_eq!(step.state, WizardState::Initial);
        assert_eq!(f.layers.active_layer().get(0).unwrap().cells().indices(), vec![2]);
    }

    #[test]
    fn test_beef_anchor_follows_picked_cell() {
        let mut f = Fixture::at_category(5);
        f.protein("Beef", "Sirloin");
        f.wizard.choose_method("Broiled", &f.catalog, &mut f.layers).unwrap();
        f.wizard.choose_temperature("Rare", &f.catalog, &mut f.layers).unwrap();
        assert_eq!(f.layers.active_layer().get(0).unwrap().position().index(), 1);
    }

    #[test]
    fn test_beef_rejected_without_room() {
        let mut f = Fixture::new();
        f.layers
            .add_component(0, component::addon_component("Bread", GridCell::ALL[1]))
            .unwrap();
        f.wizard.begin().unwrap();
        f.wizard.pick_cell(3, &f.layers).unwrap();
        f.wizard.choose_category("Protein", &f.catalog).unwrap();

        let before = f.wizard.clone();
        let err = f
            .wizard
            .choose_subcategory("Beef", &f.catalog, &f.layers)
            .unwrap_err();
        assert!(matches!(err, PlateError::NoRoom { cell: 3 }));
        assert_eq!(f.wizard, before);

        f.wizard.choose_subcategory("Fish", &f.catalog, &f.layers).unwrap();
        assert_eq!(f.wizard.state(), WizardState::SelectItem);
    }

    #[test]
    fn test_pick_cell_only_in_select_square() {
        let mut f = Fixture::new();
        assert!(matches!(
            f.wizard.pick_cell(0, &f.layers),
            Err(PlateError::InvalidTransition { .. })
        ));
        assert_eq!(f.wizard.state(), WizardState::Initial);

        f.wizard.begin().unwrap();
        assert!(f.wizard.begin().is_err());
        assert!(matches!(
            f.wizard.pick_cell(6, &f.layers),
            Err(PlateError::InvalidCell { index: 6 })
        ));
        assert_eq!(f.wizard.state(), WizardState::SelectSquare);
    }

    #[test]
    fn test_occupied_cell_keeps_select_square() {
        let mut f = Fixture::at_category(4);
        f.wizard.choose_category("Vegetables", &f.catalog).unwrap();
        f.wizard.choose_item("Carrots", &f.catalog).unwrap();
        f.wizard.choose_method("Steamed", &f.catalog, &mut f.layers).unwrap();

        f.wizard.begin().unwrap();
        let err = f.wizard.pick_cell(4, &f.layers).unwrap_err();
        assert!(matches!(err, PlateError::CellOccupied { cell: 4 }));
        assert_eq!(f.wizard.state(), WizardState::SelectSquare);
        assert_eq!(f.wizard.selected_cell(), None);
    }

    #[test]
    fn test_unknown_choices_leave_state_unchanged() {
        let mut f = Fixture::at_category(0);
        assert!(f.wizard.choose_category("Soup", &f.catalog).is_err());
        assert_eq!(f.wizard.state(), WizardState::SelectCategory);

        f.wizard.choose_category("Dessert", &f.catalog).unwrap();
        assert!(f.wizard.choose_item("Ribeye", &f.catalog).is_err());
        f.wizard.choose_item("Pie", &f.catalog).unwrap();
        assert!(f.wizard.choose_method("Grilled", &f.catalog, &mut f.layers).is_err());
        assert_eq!(f.wizard.state(), WizardState::SelectMethod);
        assert_eq!(f.wizard.selection().method, None);
        assert!(f.layers.active_layer().is_empty());
    }

    #[test]
    fn test_finalize_conflict_keeps_wizard() {
        let mut f = Fixture::at_category(0);
        f.wizard.choose_category("Dessert", &f.catalog).unwrap();
        f.wizard.choose_item("Cake", &f.catalog).unwrap();

        // The cell was filled behind the wizard's back.
        f.layers
            .add_component(0, component::addon_component("Bread", GridCell::ALL[0]))
            .unwrap();
        let err = f.wizard.choose_method("Baked", &f.catalog, &mut f.layers).unwrap_err();
        assert!(matches!(err, PlateError::CellOccupied { cell: 0 }));
        assert_eq!(f.wizard.state(), WizardState::SelectMethod);
        assert_eq!(f.layers.active_layer().len(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut f = Fixture::at_category(1);
        f.protein("Beef", "Ribeye");
        f.wizard.reset();
        assert_eq!(f.wizard, Wizard::new());
    }

    #[test]
    fn test_seed_entry_state() {
        assert_eq!(
            Wizard::for_seed(&seed(Some("Fries, Salad"), true)).state(),
            WizardState::SelectAddons
        );
        assert_eq!(
            Wizard::for_seed(&seed(None, true)).state(),
            WizardState::SelectBeverage
        );
        assert_eq!(Wizard::for_seed(&seed(None, false)).state(), WizardState::Initial);
    }

    #[test]
    fn test_addon_without_beverages_returns_to_initial() {
        let dish = seed(Some("Fries, Salad"), false);
        let mut layers = LayerStore::new();
        layers.add_component(0, component::seed_component(&dish)).unwrap();
        let mut wizard = Wizard::for_seed(&dish);

        let step = wizard.choose_addons(&["Fries"], &dish, &mut layers).unwrap();
        assert_eq!(step.state, WizardState::Initial);
        let fries = layers.active_layer().get(1).unwrap();
        assert_eq!(fries.category(), "Add-On");
        assert_eq!(fries.method(), None);
        // Cell 0 holds the seed dish.
        assert_eq!(fries.position().index(), 1);
    }

    #[test]
    fn test_addons_then_beverage() {
        let dish = seed(Some("Fries, Salad"), true);
        let mut layers = LayerStore::new();
        let mut wizard = Wizard::for_seed(&dish);

        let step = wizard.choose_addons(&["Fries", "Salad"], &dish, &mut layers).unwrap();
        assert_eq!(step.state, WizardState::SelectBeverage);
        assert_eq!(step.placed.len(), 2);
        let positions: Vec<usize> = layers
            .active_layer()
            .components()
            .map(|c| c.position().index())
            .collect();
        assert_eq!(positions, vec![0, 1]);

        assert!(wizard.choose_beverage("Coffee", &dish, &mut layers).is_err());
        let step = wizard.choose_beverage("Iced Tea", &dish, &mut layers).unwrap();
        assert_eq!(step.state, WizardState::Initial);
        let tea = layers.active_layer().get(2).unwrap();
        assert_eq!(tea.category(), "Beverage");
        assert_eq!(tea.position().index(), 2);
        assert_eq!(tea.beverage().map(|b| b.price), Some(2.5));
    }

    #[test]
    fn test_unknown_addon_places_nothing() {
        let dish = seed(Some("Fries"), false);
        let mut layers = LayerStore::new();
        let mut wizard = Wizard::for_seed(&dish);
        assert!(wizard.choose_addons(&["Fries", "Gravy"], &dish, &mut layers).is_err());
        assert!(wizard.choose_addons::<&str>(&[], &dish, &mut layers).is_err());
        assert!(layers.active_layer().is_empty());
        assert_eq!(wizard.state(), WizardState::SelectAddons);
    }

    #[test]
    fn test_skip_optional_steps() {
        let dish = seed(Some("Fries"), true);
        let mut wizard = Wizard::for_seed(&dish);
        assert_eq!(wizard.skip(Some(&dish)).unwrap().state, WizardState::SelectBeverage);
        assert_eq!(wizard.skip(Some(&dish)).unwrap().state, WizardState::Initial);
        assert!(wizard.skip(Some(&dish)).is_err());
    }

    #[test]
    fn test_options_follow_state() {
        let mut f = Fixture::at_category(0);
        assert_eq!(
            f.wizard.options(&f.catalog, None),
            vec!["Dessert", "Protein", "Starch", "Vegetables"]
        );
        f.wizard.choose_category("Protein", &f.catalog).unwrap();
        assert_eq!(
            f.wizard.options(&f.catalog, None),
            vec!["Beef", "Chicken", "Fish", "Pork"]
        );

        let dish = seed(Some("Fries, Salad"), true);
        let wizard = Wizard::for_seed(&dish);
        assert_eq!(wizard.options(&f.catalog, Some(&dish)), vec!["Fries", "Salad"]);
    }
}

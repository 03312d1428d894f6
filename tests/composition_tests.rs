//! Composition Tests
//!
//! End-to-end tests for placing components on a plate through a session.

use plated::component;
use plated::grid::{cells_occupied_by, CellSet, Footprint, GridCell};
use plated::layers::{LayerStore, MAX_LAYERS};
use plated::menu::{MenuCatalog, SeedDish};
use plated::session::{Action, Outcome, PlateSession};
use plated::wizard::{PendingSelection, WizardState};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn cells(indices: &[usize]) -> CellSet {
    indices.iter().map(|&i| GridCell::new(i).unwrap()).collect()
}

/// Apply actions that are all expected to be accepted
fn play(session: &mut PlateSession, actions: Vec<Action>) {
    for action in actions {
        let outcome = session.apply(action.clone()).unwrap();
        assert!(
            !matches!(outcome, Outcome::Ignored { .. }),
            "{:?} was ignored: {:?}",
            action,
            outcome
        );
    }
}

fn compose(cell: usize, category: &str, sub: Option<&str>, item: &str, method: &str, temp: Option<&str>) -> Vec<Action> {
    let mut actions = vec![
        Action::AddComponent,
        Action::PickCell(cell),
        Action::Category(category.into()),
    ];
    if let Some(sub) = sub {
        actions.push(Action::Subcategory(sub.into()));
    }
    actions.push(Action::Item(item.into()));
    actions.push(Action::Method(method.into()));
    if let Some(temp) = temp {
        actions.push(Action::Temperature(temp.into()));
    }
    actions
}

// === Grid Model ===

#[test]
fn test_quad_footprint_cells() {
    let zero = GridCell::new(0).unwrap();
    let one = GridCell::new(1).unwrap();
    assert_eq!(cells_occupied_by(zero, Footprint::Quad).unwrap(), cells(&[0, 1, 3, 4]));
    assert_eq!(cells_occupied_by(one, Footprint::Quad).unwrap(), cells(&[1, 2, 4, 5]));
    for anchor in 2..6 {
        assert!(cells_occupied_by(GridCell::new(anchor).unwrap(), Footprint::Quad).is_err());
    }
}

#[test]
fn test_beef_selection_builds_quad_component() {
    let selection = PendingSelection {
        category: Some("Protein".into()),
        subcategory: Some("Beef".into()),
        item: Some("Ribeye".into()),
        method: Some("Grilled".into()),
        temperature: Some("Medium".into()),
        ..PendingSelection::default()
    };
    let built = component::build(&selection, GridCell::new(0).unwrap()).unwrap();
    assert_eq!(built.footprint(), Footprint::Quad);
    assert_eq!(built.cells(), cells(&[0, 1, 3, 4]));
    assert_eq!(built.temperature(), Some("Medium"));
}

// === Layer Store ===

#[test]
fn test_layer_cap_scenario() {
    let mut store = LayerStore::new();
    for _ in 0..4 {
        assert!(store.add_layer().is_some());
    }
    assert_eq!(store.len(), MAX_LAYERS);
    assert_eq!(store.add_layer(), None);
    assert_eq!(store.len(), 5);
}

#[test]
fn test_delete_layer_zero_never_changes_count() {
    let mut store = LayerStore::new();
    assert!(!store.delete_layer(0));
    store.add_layer();
    store.add_layer();
    for _ in 0..3 {
        assert!(!store.delete_layer(0));
        assert_eq!(store.len(), 3);
    }
}

#[test_case(4, 1 ; "first non-zero")]
#[test_case(4, 2 ; "middle")]
#[test_case(4, 3 ; "last")]
#[test_case(2, 1 ; "only extra")]
fn test_delete_layer_reindexes(count: usize, id: usize) {
    let mut store = LayerStore::new();
    for _ in 1..count {
        store.add_layer();
    }
    let handles: Vec<_> = store.layers().iter().map(|l| l.handle()).collect();

    assert!(store.delete_layer(id));

    let ids: Vec<_> = store.layers().iter().map(|l| l.id()).collect();
    assert_eq!(ids, (0..count - 1).collect::<Vec<_>>());
    let remaining: Vec<_> = store.layers().iter().map(|l| l.handle()).collect();
    let mut expected = handles;
    expected.remove(id);
    assert_eq!(remaining, expected);
    assert_eq!(store.active_id(), id.min(count - 2));
}

// === Wizard through a session ===

#[test]
fn test_dessert_scenario() {
    init_logging();
    let mut session = PlateSession::new(MenuCatalog::builtin());
    session.apply(Action::AddComponent).unwrap();
    session.apply(Action::PickCell(0)).unwrap();
    assert_eq!(session.state(), WizardState::SelectCategory);
    session.apply(Action::Category("Dessert".into())).unwrap();
    assert_eq!(session.state(), WizardState::SelectItem);
    session.apply(Action::Item("Cake".into())).unwrap();
    assert_eq!(session.state(), WizardState::SelectMethod);
    session.apply(Action::Method("Baked".into())).unwrap();
    assert_eq!(session.state(), WizardState::Initial);

    let cake = session.layers().active_layer().get(0).unwrap();
    assert_eq!(cake.footprint(), Footprint::Single);
    assert_eq!(cake.position().index(), 0);
    assert_eq!(cake.temperature(), None);
}

#[test_case("Protein", Some("Chicken"), "Breast", "Roasted" ; "chicken")]
#[test_case("Protein", Some("Fish"), "Salmon", "Baked" ; "fish")]
#[test_case("Vegetables", None, "Broccoli", "Steamed" ; "vegetables")]
#[test_case("Starch", None, "Rice", "Boiled" ; "starch")]
fn test_only_beef_asks_for_temperature(category: &str, sub: Option<&str>, item: &str, method: &str) {
    let mut session = PlateSession::new(MenuCatalog::builtin());
    play(&mut session, compose(2, category, sub, item, method, None));
    assert_eq!(session.state(), WizardState::Initial);
    let placed = session.layers().active_layer().get(0).unwrap();
    assert_eq!(placed.footprint(), Footprint::Single);

    let outcome = session.apply(Action::Temperature("Rare".into())).unwrap();
    assert!(matches!(outcome, Outcome::Ignored { .. }));
}

#[test]
fn test_beef_flow_places_quad() {
    let mut session = PlateSession::new(MenuCatalog::builtin());
    let mut actions = compose(4, "Protein", Some("Beef"), "Sirloin", "Broiled", None);
    actions.push(Action::Temperature("Medium Rare".into()));
    play(&mut session, actions.clone());

    let sirloin = session.layers().active_layer().get(0).unwrap();
    assert_eq!(sirloin.footprint(), Footprint::Quad);
    assert_eq!(sirloin.cells(), cells(&[0, 1, 3, 4]));
    assert_eq!(sirloin.label(), "Medium Rare Sirloin (Broiled)");

    // the rest of the plate only has room for singles
    let outcome = session.apply(Action::AddComponent).unwrap();
    assert!(matches!(outcome, Outcome::Wizard(_)));
    let outcome = session.apply(Action::PickCell(4)).unwrap();
    assert!(matches!(outcome, Outcome::Ignored { code: "CELL_OCCUPIED", .. }));
}

#[test]
fn test_components_never_overlap() {
    let mut session = PlateSession::new(MenuCatalog::builtin());
    let mut beef = compose(2, "Protein", Some("Beef"), "Ribeye", "Grilled", None);
    beef.push(Action::Temperature("Rare".into()));
    play(&mut session, beef);
    play(&mut session, compose(0, "Dessert", None, "Pie", "Chilled", None));
    play(&mut session, compose(3, "Starch", None, "Fries", "Fried", None));

    // every free cell is gone
    let outcome = session.apply(Action::AddComponent).unwrap();
    assert!(matches!(outcome, Outcome::Wizard(_)));
    for cell in 0..6 {
        let outcome = session.apply(Action::PickCell(cell)).unwrap();
        assert!(matches!(outcome, Outcome::Ignored { .. }));
    }

    let layer = session.layers().active_layer();
    let components: Vec<_> = layer.components().collect();
    for (i, a) in components.iter().enumerate() {
        for b in &components[i + 1..] {
            assert!(a.cells().is_disjoint(b.cells()));
        }
    }
    assert!(layer.occupied_cells().is_full());
}

#[test]
fn test_seed_addons_without_beverages() {
    init_logging();
    let seed: SeedDish = serde_json::from_str(
        r#"{ "food_category": "Main Courses", "name": "Steak Frites", "add_ons": "Fries, Salad" }"#,
    )
    .unwrap();
    let mut session = PlateSession::with_seed(MenuCatalog::builtin(), seed).unwrap();
    assert_eq!(session.state(), WizardState::SelectAddons);

    play(&mut session, vec![Action::Addons(vec!["Fries".into()])]);
    assert_eq!(session.state(), WizardState::Initial);

    let layer = session.layers().layer(0).unwrap();
    assert_eq!(layer.len(), 2);
    let fries = layer.get(1).unwrap();
    assert_eq!(fries.category(), "Add-On");
    assert_eq!(fries.item(), "Fries");
    assert!(fries.cells().is_disjoint(layer.get(0).unwrap().cells()));
}

#[test]
fn test_seed_without_suggestions_starts_idle() {
    let seed: SeedDish =
        serde_json::from_str(r#"{ "food_category": "Desserts", "name": "Tiramisu", "add_ons": "" }"#).unwrap();
    let session = PlateSession::with_seed(MenuCatalog::builtin(), seed).unwrap();
    assert_eq!(session.state(), WizardState::Initial);
    assert_eq!(session.layers().layer(0).unwrap().len(), 1);
}

#[test]
fn test_deleting_layer_keeps_other_plates() {
    let mut session = PlateSession::new(MenuCatalog::builtin());
    play(&mut session, compose(0, "Dessert", None, "Cake", "Baked", None));
    play(&mut session, vec![Action::AddLayer]);
    play(&mut session, compose(1, "Vegetables", None, "Carrots", "Roasted", None));
    play(&mut session, vec![Action::AddLayer]);
    play(&mut session, compose(2, "Dessert", None, "Brownie", "Baked", None));

    play(&mut session, vec![Action::DeleteLayer(1)]);
    assert_eq!(session.layers().len(), 2);
    assert_eq!(session.layers().active_id(), 1);

    let items: Vec<_> = session
        .layers()
        .layers()
        .iter()
        .flat_map(|l| l.components().map(|c| c.item().to_string()))
        .collect();
    assert_eq!(items, vec!["Cake", "Brownie"]);
}

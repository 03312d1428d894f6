//! Plate Session
//!
//! One editing session owns the layers, the wizard, the menu and the
//! optional seed dish. User actions are applied one at a time, each to
//! completion. Actions that are not legal right now are absorbed: they are
//! logged, reported as ignored, and change nothing.

mod view;

use log::{debug, info, warn};
use serde::Serialize;

use crate::component;
use crate::error::{PlateError, Result};
use crate::layers::LayerStore;
use crate::menu::{MenuCatalog, SeedDish};
use crate::order::{OrderPayload, OrderReceipt, OrderSubmitter, ReviewPrompt, SubmissionObserver};
use crate::wizard::{Step, Wizard, WizardState};

pub use view::{CellView, ComponentView, LayerView, PlateView};

/// A user action coming from the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddComponent,
    PickCell(usize),
    Category(String),
    Subcategory(String),
    Item(String),
    Method(String),
    Temperature(String),
    Addons(Vec<String>),
    Beverage(String),
    Skip,
    Reset,
    AddLayer,
    DeleteLayer(usize),
    SelectLayer(usize),
    RemoveComponent { layer: usize, index: usize },
}

/// What an action did
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The wizard moved, possibly placing components
    Wizard(Step),
    /// Layers were added, deleted or switched
    Layers { count: usize, active: usize },
    /// A component was taken off the plate
    Removed { item: String },
    /// The action was not legal and nothing changed
    Ignored { code: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct PlateSession {
    catalog: MenuCatalog,
    seed: Option<SeedDish>,
    layers: LayerStore,
    wizard: Wizard,
}

impl PlateSession {
    /// An empty plate
    pub fn new(catalog: MenuCatalog) -> Self {
        Self {
            catalog,
            seed: None,
            layers: LayerStore::new(),
            wizard: Wizard::new(),
        }
    }

    /// A plate whose layer 0 starts with the seed dish
    pub fn with_seed(catalog: MenuCatalog, seed: SeedDish) -> Result<Self> {
        let mut layers = LayerStore::new();
        layers.add_component(0, component::seed_component(&seed))?;
        let wizard = Wizard::for_seed(&seed);
        info!("Session seeded with {}, wizard at {}", seed.name, wizard.state());
        Ok(Self {
            catalog,
            seed: Some(seed),
            layers,
            wizard,
        })
    }

    pub fn layers(&self) -> &LayerStore {
        &self.layers
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn state(&self) -> WizardState {
        self.wizard.state()
    }

    /// Choices the UI should offer right now
    pub fn options(&self) -> Vec<String> {
        self.wizard.options(&self.catalog, self.seed.as_ref())
    }

    /// Apply one user action.
    ///
    /// Illegal actions come back as [`Outcome::Ignored`]; only unexpected
    /// failures are returned as errors.
    pub fn apply(&mut self, action: Action) -> Result<Outcome> {
        debug!("Applying {:?} in {}", action, self.wizard.state());
        match self.dispatch(action) {
            Ok(outcome) => Ok(outcome),
            Err(e) if e.is_ignorable() => {
                debug!("Ignored: {}", e);
                Ok(Outcome::Ignored {
                    code: e.error_code(),
                    reason: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    fn dispatch(&mut self, action: Action) -> Result<Outcome> {
        let catalog = &self.catalog;
        let layers = &mut self.layers;
        let wizard = &mut self.wizard;

        let step = match action {
            Action::AddComponent => wizard.begin()?,
            Action::PickCell(index) => wizard.pick_cell(index, layers)?,
            Action::Category(category) => wizard.choose_category(&category, catalog)?,
            Action::Subcategory(sub) => wizard.choose_subcategory(&sub, catalog, layers)?,
            Action::Item(item) => wizard.choose_item(&item, catalog)?,
            Action::Method(method) => wizard.choose_method(&method, catalog, layers)?,
            Action::Temperature(temp) => wizard.choose_temperature(&temp, catalog, layers)?,
            Action::Addons(addons) => {
                let seed = Self::require_seed(self.seed.as_ref(), wizard.state(), "choose add-ons")?;
                wizard.choose_addons(addons.as_slice(), seed, layers)?
            }
            Action::Beverage(key) => {
                let seed = Self::require_seed(self.seed.as_ref(), wizard.state(), "choose beverage")?;
                wizard.choose_beverage(&key, seed, layers)?
            }
            Action::Skip => wizard.skip(self.seed.as_ref())?,
            Action::Reset => {
                wizard.reset();
                Step {
                    state: wizard.state(),
                    placed: Vec::new(),
                }
            }
            Action::AddLayer => {
                layers.add_layer().ok_or(PlateError::CapacityExceeded {
                    limit: crate::layers::MAX_LAYERS,
                })?;
                return Ok(self.layer_outcome());
            }
            Action::DeleteLayer(id) => {
                if id >= layers.len() {
                    return Err(PlateError::LayerNotFound { id });
                }
                if !layers.delete_layer(id) {
                    return Err(PlateError::ProtectedLayer { id });
                }
                return Ok(self.layer_outcome());
            }
            Action::SelectLayer(id) => {
                layers.layer(id).ok_or(PlateError::LayerNotFound { id })?;
                layers.set_active(id);
                return Ok(self.layer_outcome());
            }
            Action::RemoveComponent { layer, index } => {
                let removed = layers.remove_component(layer, index)?;
                return Ok(Outcome::Removed {
                    item: removed.item().to_string(),
                });
            }
        };
        Ok(Outcome::Wizard(step))
    }

    fn require_seed<'a>(seed: Option<&'a SeedDish>, state: WizardState, action: &str) -> Result<&'a SeedDish> {
        seed.ok_or_else(|| PlateError::invalid_transition(state, action))
    }

    fn layer_outcome(&self) -> Outcome {
        Outcome::Layers {
            count: self.layers.len(),
            active: self.layers.active_id(),
        }
    }

    /// Snapshot of the plate as an order for `user_id`
    pub fn payload(&self, user_id: Option<&str>) -> OrderPayload {
        OrderPayload::snapshot(user_id, self.layers.layers())
    }

    /// Submit the current plate.
    ///
    /// The payload is taken before sending, and the session is only borrowed,
    /// so edits made after a failed attempt are picked up by the next one.
    pub fn submit(
        &self,
        user_id: Option<&str>,
        submitter: &dyn OrderSubmitter,
        observer: &mut dyn SubmissionObserver,
    ) -> Result<OrderReceipt> {
        let payload = self.payload(user_id);
        info!("Submitting order with {} lines", payload.layers.len());
        match submitter.submit(&payload) {
            Ok(receipt) => {
                info!("Order {} accepted", receipt.submission_id);
                observer.on_success(&receipt, ReviewPrompt::for_receipt(&receipt));
                Ok(receipt)
            }
            Err(e) => {
                warn!("Order submission failed: {}", e);
                observer.on_failure(&e);
                Err(e)
            }
        }
    }

    /// Rendering snapshot of the active layer and the layer list
    pub fn view(&self) -> PlateView {
        PlateView::of(self)
    }
}

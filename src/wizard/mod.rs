//! Selection Wizard Module
//!
//! The finite-state flow that collects a component description one
//! choice at a time and places the finished component on the plate.

mod machine;
mod selection;
mod state;

pub use machine::{Step, Wizard};
pub use selection::PendingSelection;
pub use state::WizardState;

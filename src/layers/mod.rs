//! Layer Model Module
//!
//! A plate is a stack of up to five layers. Each layer is an independent
//! set of placements on the same 3x2 grid.

mod layer;
mod store;

pub use layer::{ComponentHandle, Layer, LayerHandle, PlacedComponent};
pub use store::{LayerStore, MAX_LAYERS};

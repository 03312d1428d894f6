//! Plated - Plate Composition Engine
//!
//! Plated lets a user build a meal on a plate before ordering it:
//! 1. Grid placement - a plate is a 3x2 grid of cells, portions cover 1 or 4 cells
//! 2. Guided selection - a wizard walks category, type, item, method and temperature
//!
//! # Architecture
//!
//! The plate is a stack of up to five layers:
//! - Layer 0: always present, may start with a seed dish from the menu
//! - Layers 1-4: added and removed freely, each with its own grid
//!
//! A finished plate is flattened into an order, one line per component,
//! and handed to an [`order::OrderSubmitter`].

pub mod cli;
pub mod component;
pub mod config;
pub mod error;
pub mod grid;
pub mod layers;
pub mod menu;
pub mod order;
pub mod session;
pub mod wizard;

pub use error::{PlateError, Result};

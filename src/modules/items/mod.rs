//! Inventory management: items with stock, availability and an optional image.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use model::*;
pub use router::{init_available_items_router, init_items_router};

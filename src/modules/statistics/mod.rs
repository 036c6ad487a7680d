//! Per-item daily loan statistics and their bar charts.

pub mod chart;
pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use router::init_statistics_router;

//! Student data models and DTOs, re-exported from `gearlend-models`.

pub use gearlend_models::students::*;

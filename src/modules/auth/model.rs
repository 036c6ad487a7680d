//! Authentication models, re-exported from `gearlend-models`.

pub use gearlend_models::auth::*;
pub use gearlend_models::principal::Principal;

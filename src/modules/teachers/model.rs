pub use gearlend_models::teachers::*;

pub use gearlend_models::loans::*;

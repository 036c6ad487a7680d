//! Loan orchestration: granting loans against stock and returning them.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use model::*;
pub use router::{init_loan_status_router, init_loans_router};

//! Login, logout and the home endpoints for both roles.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use router::{init_student_auth_router, init_teacher_auth_router};

//! # gearlend
//!
//! A REST API for lending school equipment, built with Axum and SQLite.
//!
//! ## Overview
//!
//! Teachers manage the inventory (items with a stock count, an availability
//! switch and an optional image), create student accounts, watch which
//! student holds what, and look at per-item daily loan statistics. Students
//! log in with their student number, borrow available items and return them.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Request context and role extractors
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Login, logout, home (both roles)
//! │   ├── teachers/    # Teacher accounts
//! │   ├── students/    # Student accounts
//! │   ├── items/       # Inventory and image upload
//! │   ├── loans/       # Grant and return orchestration
//! │   └── statistics/  # Daily loan aggregation and charts
//! ├── docs.rs          # OpenAPI document
//! ├── logging.rs       # Tracing setup and request logging
//! ├── metrics.rs       # Prometheus metrics
//! ├── router.rs        # Route groups
//! └── state.rs         # Shared application state
//! ```
//!
//! Each feature module has the same layout:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: business logic and queries
//! - `model.rs`: data models and DTOs
//! - `router.rs`: Axum router configuration
//!
//! ## Route groups and sessions
//!
//! Every route lives under `/teacher` or `/student`. A session is a signed
//! token holding the principal id and its role; it is set as an HttpOnly
//! cookie on login and may also be sent as `Authorization: Bearer`. Logout
//! revokes the token. Requests without a valid session are tagged with the
//! role of the group they were sent to, so a 401 always names the right
//! login endpoint.
//!
//! ## Stock invariant
//!
//! For every item, units in stock plus units on open loans equals the stock
//! the teacher entered. Grants and returns each run in one transaction that
//! touches both the item and the loan row.
//!
//! ## Quick Start
//!
//! ```bash
//! DATABASE_URL=sqlite://gearlend.db
//! SESSION_SECRET=your-secure-secret
//! cargo run --bin gearlend-cli -- create-teacher
//! cargo run
//! ```
//!
//! API documentation is served at `/swagger-ui` and `/scalar`.

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use gearlend_auth;
pub use gearlend_config;
pub use gearlend_core;
pub use gearlend_db;
pub use gearlend_models;

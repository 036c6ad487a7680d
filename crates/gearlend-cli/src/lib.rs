//! # gearlend CLI
//!
//! Administration and database seeding for gearlend.
//!
//! ## Usage
//!
//! ```ignore
//! use gearlend_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(3).with_students(40);
//! seed_all(&pool, config).await?;
//! ```

pub mod admin;
pub mod seeder;

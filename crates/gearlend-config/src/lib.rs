//! # gearlend Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`session`]: session token signing and cookie settings
//! - [`cors`]: CORS allowed origins
//! - [`storage`]: item image upload directory and limits
//! - [`server`]: listen address
//!
//! # Example
//!
//! ```ignore
//! use gearlend_config::{CorsConfig, ServerConfig, SessionConfig, StorageConfig};
//!
//! let session_config = SessionConfig::from_env();
//! let storage_config = StorageConfig::from_env();
//! ```

pub mod cors;
pub mod server;
pub mod session;
pub mod storage;

pub use cors::CorsConfig;
pub use server::ServerConfig;
pub use session::SessionConfig;
pub use storage::StorageConfig;

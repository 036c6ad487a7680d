//! # gearlend Auth
//!
//! Session primitives shared by the HTTP layer and tooling:
//!
//! - [`role`]: the two principal roles, teacher and student
//! - [`claims`]: claims carried by a session token
//! - [`session`]: session token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use gearlend_auth::{Role, create_session_token, verify_session_token};
//! use gearlend_config::SessionConfig;
//!
//! let config = SessionConfig::from_env();
//! let token = create_session_token(teacher.id, Role::Teacher, &config)?;
//! let claims = verify_session_token(&token, &config)?;
//! assert_eq!(claims.role, Role::Teacher);
//! ```

pub mod claims;
pub mod role;
pub mod session;

pub use claims::SessionClaims;
pub use role::Role;
pub use session::{create_session_token, verify_session_token};

//! # gearlend Core
//!
//! Foundational types shared by every gearlend crate:
//!
//! - [`errors`]: domain errors and the HTTP boundary [`AppError`]
//! - [`password`]: bcrypt hashing and verification
//! - [`file_storage`]: item image storage behind the [`FileStorage`] trait
//!
//! # Example
//!
//! ```ignore
//! use gearlend_core::{AppError, DomainError, hash_password};
//!
//! let hash = hash_password("secure_password")?;
//! let err: AppError = DomainError::not_found("Item", 7).into();
//! ```

pub mod errors;
pub mod file_storage;
pub mod password;

pub use errors::{AppError, DomainError, LoanDenial, conflict_on_unique};
pub use file_storage::{FileStorage, LocalFileStorage, StorageError};
pub use password::{hash_password, verify_password};

//! Session resolution and role checks.
//!
//! # Request Flow
//!
//! 1. [`auth::request_context_middleware`] runs for every request under
//!    `/teacher` and `/student`. It reads the session token (bearer header
//!    first, then the session cookie), rejects revoked or stale sessions and
//!    stores a [`auth::RequestContext`] in the request extensions.
//! 2. Handlers take [`role::CurrentTeacher`] or [`role::CurrentStudent`],
//!    which answer 401 for anonymous requests and 403 for the other role.
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::role::CurrentStudent;
//!
//! async fn open_loans(
//!     State(state): State<AppState>,
//!     CurrentStudent(student): CurrentStudent,
//! ) -> Result<Json<Vec<LoanDetails>>, AppError> {
//!     // only reached by a logged-in student
//! }
//! ```

pub mod auth;
pub mod role;

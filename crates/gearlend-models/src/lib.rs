//! # gearlend Models
//!
//! Entities and request/response DTOs shared by the API and the CLI.
//!
//! # Modules
//!
//! - [`auth`]: login requests and responses
//! - [`teachers`]: teacher accounts
//! - [`students`]: student accounts
//! - [`items`]: lendable inventory
//! - [`loans`]: loan ledger, grant and return DTOs
//! - [`statistics`]: per-item daily loan series
//! - [`principal`]: the authenticated principal

pub mod auth;
pub mod items;
pub mod loans;
pub mod principal;
pub mod statistics;
pub mod students;
pub mod teachers;

pub use auth::{LoginResponse, MessageResponse, StudentLoginRequest, TeacherLoginRequest};
pub use items::{CreateItemDto, Item, ItemFilter, ItemListParams, ItemResponse, UpdateItemDto};
pub use loans::{
    GrantLoanDto, Loan, LoanDetails, ReturnLoansDto, ReturnOutcome, StudentLoanStatus,
};
pub use principal::Principal;
pub use statistics::{DailyLoanPoint, ItemLoanReport, ItemLoanSeries};
pub use students::{CreateStudentDto, Student, UpdateStudentDto};
pub use teachers::{CreateTeacherDto, Teacher, TeacherWithPassword, UpdateTeacherDto};

pub mod auth;
pub mod items;
pub mod loans;
pub mod statistics;
pub mod students;
pub mod teachers;

pub use self::items::model::Item;
pub use self::loans::model::Loan;
pub use self::students::model::Student;
pub use self::teachers::model::Teacher;

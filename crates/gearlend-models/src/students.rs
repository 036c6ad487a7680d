use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A borrower. Students have no password and log in by student number.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub student_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 30, message = "Name must be 1 to 30 characters"))]
    #[schema(example = "Tanaka")]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "tanaka@campus.example")]
    pub email: String,
    #[validate(length(min = 1, max = 7, message = "Student number must be 1 to 7 characters"))]
    #[schema(example = "S000123")]
    pub student_number: String,
}

/// All fields are optional; only provided fields are updated.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 30, message = "Name must be 1 to 30 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 7, message = "Student number must be 1 to 7 characters"))]
    pub student_number: Option<String>,
}

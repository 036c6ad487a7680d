//! Teacher accounts.
//!
//! Teachers log in with email and password and manage everything else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Teacher row including the bcrypt hash, only used for login.
#[derive(Debug, Clone, FromRow)]
pub struct TeacherWithPassword {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TeacherWithPassword> for Teacher {
    fn from(t: TeacherWithPassword) -> Self {
        Teacher {
            id: t.id,
            name: t.name,
            email: t.email,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateTeacherDto {
    #[validate(length(min = 1, max = 30, message = "Name must be 1 to 30 characters"))]
    #[schema(example = "Sato")]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "sato@campus.example")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Self-edit of a teacher account. An absent password keeps the current one.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateTeacherDto {
    #[validate(length(min = 1, max = 30, message = "Name must be 1 to 30 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: Option<String>,
}

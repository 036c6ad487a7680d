//! Teacher accounts created from the command line.

use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

use gearlend_core::hash_password;
use gearlend_models::CreateTeacherDto;

/// Validates and inserts a teacher, returning the new id.
pub async fn create_teacher(
    db: &SqlitePool,
    dto: &CreateTeacherDto,
) -> Result<i64, Box<dyn std::error::Error>> {
    dto.validate()?;

    let password_hash =
        hash_password(&dto.password).map_err(|e| format!("Failed to hash password: {}", e.error))?;
    let now = Utc::now();

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO teachers (name, email, password_hash, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(&dto.name)
    .bind(&dto.email)
    .bind(&password_hash)
    .bind(now)
    .bind(now)
    .fetch_optional(db)
    .await?;

    id.ok_or_else(|| "Teacher with this email already exists".into())
}

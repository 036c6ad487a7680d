use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::instrument;

use gearlend_core::{AppError, DomainError, verify_password};
use gearlend_models::{Student, Teacher, TeacherWithPassword};

pub struct AuthService;

impl AuthService {
    /// Email and password login. Unknown email and wrong password are
    /// indistinguishable to the caller.
    #[instrument(skip(db, password))]
    pub async fn authenticate_teacher(
        db: &SqlitePool,
        email: &str,
        password: &str,
    ) -> Result<Teacher, AppError> {
        let teacher = sqlx::query_as::<_, TeacherWithPassword>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM teachers
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?
        .ok_or(DomainError::InvalidCredentials)?;

        if !verify_password(password, &teacher.password_hash)? {
            return Err(DomainError::InvalidCredentials.into());
        }

        Ok(teacher.into())
    }

    #[instrument(skip(db))]
    pub async fn authenticate_student(
        db: &SqlitePool,
        student_number: &str,
    ) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            SELECT id, name, email, student_number, created_at, updated_at
            FROM students
            WHERE student_number = ?
            "#,
        )
        .bind(student_number)
        .fetch_optional(db)
        .await?
        .ok_or(DomainError::UnknownStudentNumber)?;

        Ok(student)
    }

    /// Records `jti` as revoked and drops revocations that have expired anyway.
    #[instrument(skip(db))]
    pub async fn revoke_session(
        db: &SqlitePool,
        jti: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let now = Utc::now();

        sqlx::query("DELETE FROM revoked_sessions WHERE expires_at < ?")
            .bind(now)
            .execute(db)
            .await?;

        sqlx::query("INSERT OR IGNORE INTO revoked_sessions (jti, expires_at) VALUES (?, ?)")
            .bind(jti)
            .bind(expires_at)
            .execute(db)
            .await?;

        Ok(())
    }

    pub async fn is_session_revoked(db: &SqlitePool, jti: &str) -> Result<bool, AppError> {
        let revoked: Option<(String,)> =
            sqlx::query_as("SELECT jti FROM revoked_sessions WHERE jti = ?")
                .bind(jti)
                .fetch_optional(db)
                .await?;

        Ok(revoked.is_some())
    }
}

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

use gearlend_core::{AppError, DomainError, conflict_on_unique, hash_password};

use crate::modules::teachers::model::{CreateTeacherDto, Teacher, UpdateTeacherDto};

const TEACHER_COLUMNS: &str = "id, name, email, created_at, updated_at";

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn register_teacher(
        db: &SqlitePool,
        dto: CreateTeacherDto,
    ) -> Result<Teacher, AppError> {
        let password_hash = hash_password(&dto.password)?;
        let now = Utc::now();

        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            r#"
            INSERT INTO teachers (name, email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {TEACHER_COLUMNS}
            "#
        ))
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(db)
        .await
        .map_err(|e| {
            conflict_on_unique(e, || {
                format!("Teacher with email {} already exists", dto.email)
            })
        })?;

        tracing::info!(teacher_id = teacher.id, "teacher registered");
        Ok(teacher)
    }

    #[instrument(skip(db))]
    pub async fn list_teachers(db: &SqlitePool) -> Result<Vec<Teacher>, AppError> {
        let teachers = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers ORDER BY id"
        ))
        .fetch_all(db)
        .await?;

        Ok(teachers)
    }

    pub async fn find_teacher(db: &SqlitePool, id: i64) -> Result<Option<Teacher>, AppError> {
        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(teacher)
    }

    #[instrument(skip(db))]
    pub async fn get_teacher(db: &SqlitePool, id: i64) -> Result<Teacher, AppError> {
        Self::find_teacher(db, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Teacher", id).into())
    }

    /// Updates name and email, and the password when one is given.
    #[instrument(skip(db, dto))]
    pub async fn update_teacher(
        db: &SqlitePool,
        id: i64,
        dto: UpdateTeacherDto,
    ) -> Result<Teacher, AppError> {
        let password_hash = dto.password.as_deref().map(hash_password).transpose()?;

        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            r#"
            UPDATE teachers
            SET name = ?, email = ?, password_hash = COALESCE(?, password_hash), updated_at = ?
            WHERE id = ?
            RETURNING {TEACHER_COLUMNS}
            "#
        ))
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(password_hash)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            conflict_on_unique(e, || {
                format!("Teacher with email {} already exists", dto.email)
            })
        })?
        .ok_or(DomainError::not_found("Teacher", id))?;

        Ok(teacher)
    }

    /// Deletes a teacher who owns no items.
    #[instrument(skip(db))]
    pub async fn delete_teacher(db: &SqlitePool, id: i64) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let result = sqlx::query(
            r#"
            DELETE FROM teachers
            WHERE id = ? AND NOT EXISTS (SELECT 1 FROM items WHERE items.teacher_id = teachers.id)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            let (found, owned_items): (i64, i64) = sqlx::query_as(
                r#"
                SELECT EXISTS (SELECT 1 FROM teachers WHERE id = ?1),
                       (SELECT COUNT(*) FROM items WHERE teacher_id = ?1)
                "#,
            )
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

            return Err(if found > 0 {
                DomainError::Conflict(format!(
                    "Teacher {} still owns {} item(s) and cannot be deleted",
                    id, owned_items
                ))
            } else {
                DomainError::not_found("Teacher", id)
            }
            .into());
        }

        tx.commit().await?;
        tracing::info!(teacher_id = id, "teacher deleted");
        Ok(())
    }
}

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

use gearlend_core::{AppError, DomainError, conflict_on_unique};

use crate::modules::students::model::{CreateStudentDto, Student, UpdateStudentDto};

const STUDENT_COLUMNS: &str = "id, name, email, student_number, created_at, updated_at";

fn duplicate_message(email: &str, student_number: &str) -> String {
    format!(
        "A student with email {} or student number {} already exists",
        email, student_number
    )
}

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db, dto))]
    pub async fn create_student(
        db: &SqlitePool,
        dto: CreateStudentDto,
    ) -> Result<Student, AppError> {
        let now = Utc::now();

        let student = sqlx::query_as::<_, Student>(&format!(
            r#"
            INSERT INTO students (name, email, student_number, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {STUDENT_COLUMNS}
            "#
        ))
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.student_number)
        .bind(now)
        .bind(now)
        .fetch_one(db)
        .await
        .map_err(|e| conflict_on_unique(e, || duplicate_message(&dto.email, &dto.student_number)))?;

        tracing::info!(student_id = student.id, "student created");
        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn list_students(db: &SqlitePool) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students ORDER BY id"
        ))
        .fetch_all(db)
        .await?;

        Ok(students)
    }

    pub async fn find_student(db: &SqlitePool, id: i64) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &SqlitePool, id: i64) -> Result<Student, AppError> {
        Self::find_student(db, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Student", id).into())
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &SqlitePool,
        id: i64,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get_student(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let email = dto.email.unwrap_or(existing.email);
        let student_number = dto.student_number.unwrap_or(existing.student_number);

        let student = sqlx::query_as::<_, Student>(&format!(
            r#"
            UPDATE students
            SET name = ?, email = ?, student_number = ?, updated_at = ?
            WHERE id = ?
            RETURNING {STUDENT_COLUMNS}
            "#
        ))
        .bind(&name)
        .bind(&email)
        .bind(&student_number)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| conflict_on_unique(e, || duplicate_message(&email, &student_number)))?
        .ok_or(DomainError::not_found("Student", id))?;

        Ok(student)
    }

    /// Deletes a student with no loan history.
    #[instrument(skip(db))]
    pub async fn delete_student(db: &SqlitePool, id: i64) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let result = sqlx::query(
            r#"
            DELETE FROM students
            WHERE id = ? AND NOT EXISTS (SELECT 1 FROM loans WHERE loans.student_id = students.id)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            let (found, loans): (i64, i64) = sqlx::query_as(
                r#"
                SELECT EXISTS (SELECT 1 FROM students WHERE id = ?1),
                       (SELECT COUNT(*) FROM loans WHERE student_id = ?1)
                "#,
            )
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

            return Err(if found > 0 {
                DomainError::Conflict(format!(
                    "Student {} has {} loan record(s) and cannot be deleted",
                    id, loans
                ))
            } else {
                DomainError::not_found("Student", id)
            }
            .into());
        }

        tx.commit().await?;
        tracing::info!(student_id = id, "student deleted");
        Ok(())
    }
}

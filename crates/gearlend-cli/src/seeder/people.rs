//! Teacher and student seeding.

use fake::Fake;
use fake::faker::name::en::*;
use rayon::prelude::*;
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::time::Instant;

use chrono::Utc;

use super::models::{SEED_EMAIL_DOMAIN, SEED_STUDENT_PREFIX, StudentSeed, TeacherSeed};

const NAME_MAX_CHARS: usize = 30;

// SQLite allows 32766 bound parameters per statement.
const BATCH_SIZE: usize = 500;

fn fake_name() -> String {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    format!("{} {}", first_name, last_name)
        .chars()
        .take(NAME_MAX_CHARS)
        .collect()
}

fn seed_email(name: &str, tag: &str, idx: usize) -> String {
    let local: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '.' })
        .collect();
    format!("{}+{}{}@{}", local, tag, idx, SEED_EMAIL_DOMAIN)
}

/// Builds seeded student numbers such as `S000042`.
pub fn student_number(idx: usize) -> String {
    format!("{}{:06}", SEED_STUDENT_PREFIX, idx % 1_000_000)
}

/// Generates teachers, hashing each password on the rayon pool.
///
/// Seeding uses bcrypt cost 4; real accounts are hashed with the default cost.
pub fn generate_teachers(
    count: usize,
    offset: usize,
    password: &str,
) -> Result<Vec<TeacherSeed>, bcrypt::BcryptError> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let name = fake_name();
            let email = seed_email(&name, "teacher", offset + i);
            let password_hash = bcrypt::hash(password, 4)?;
            Ok(TeacherSeed {
                name,
                email,
                password_hash,
            })
        })
        .collect()
}

pub fn generate_students(count: usize, offset: usize) -> Vec<StudentSeed> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let name = fake_name();
            StudentSeed {
                email: seed_email(&name, "student", offset + i),
                name,
                student_number: student_number(offset + i),
            }
        })
        .collect()
}

pub async fn insert_teachers(
    tx: &mut Transaction<'_, Sqlite>,
    teachers: &[TeacherSeed],
) -> Result<Vec<i64>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let now = Utc::now();
    let mut ids = Vec::with_capacity(teachers.len());

    for chunk in teachers.chunks(BATCH_SIZE) {
        let placeholders = vec!["(?, ?, ?, ?, ?)"; chunk.len()].join(", ");
        let query = format!(
            "INSERT INTO teachers (name, email, password_hash, created_at, updated_at) VALUES {} RETURNING id",
            placeholders
        );

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for teacher in chunk {
            q = q
                .bind(&teacher.name)
                .bind(&teacher.email)
                .bind(&teacher.password_hash)
                .bind(now)
                .bind(now);
        }
        ids.extend(q.fetch_all(&mut **tx).await?);
    }

    println!(
        "   ✓ Inserted {} teachers in {:?}",
        ids.len(),
        start_time.elapsed()
    );
    Ok(ids)
}

pub async fn insert_students(
    tx: &mut Transaction<'_, Sqlite>,
    students: &[StudentSeed],
) -> Result<Vec<i64>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let now = Utc::now();
    let mut ids = Vec::with_capacity(students.len());

    for chunk in students.chunks(BATCH_SIZE) {
        let placeholders = vec!["(?, ?, ?, ?, ?)"; chunk.len()].join(", ");
        let query = format!(
            "INSERT INTO students (name, email, student_number, created_at, updated_at) VALUES {} RETURNING id",
            placeholders
        );

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for student in chunk {
            q = q
                .bind(&student.name)
                .bind(&student.email)
                .bind(&student.student_number)
                .bind(now)
                .bind(now);
        }
        ids.extend(q.fetch_all(&mut **tx).await?);
    }

    println!(
        "   ✓ Inserted {} students in {:?}",
        ids.len(),
        start_time.elapsed()
    );
    Ok(ids)
}

/// Number of seeded students already present, used to keep new numbers unique.
pub async fn seeded_student_count(db: &SqlitePool) -> Result<usize, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM students WHERE student_number LIKE ? AND email LIKE ?",
    )
    .bind(format!("{}%", SEED_STUDENT_PREFIX))
    .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
    .fetch_one(db)
    .await?;
    Ok(count.max(0) as usize)
}

pub async fn seeded_teacher_count(db: &SqlitePool) -> Result<usize, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teachers WHERE email LIKE ?")
        .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
        .fetch_one(db)
        .await?;
    Ok(count.max(0) as usize)
}

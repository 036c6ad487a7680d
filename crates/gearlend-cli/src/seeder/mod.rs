//! Fake teachers, students, items and loans for development databases.
//!
//! Seeded rows are recognisable by their `@example.com` addresses, which is
//! what [`clear_all`] deletes by.

pub mod inventory;
pub mod models;
pub mod people;

use chrono::Utc;
use sqlx::SqlitePool;
use std::time::Instant;

pub use models::{SEED_EMAIL_DOMAIN, SEED_PASSWORD, SeedConfig};

/// Seeds everything in one transaction.
pub async fn seed_all(
    db: &SqlitePool,
    config: SeedConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    println!("🌱 Starting database seeding...");
    println!(
        "   - Teachers: {} ({} items each)",
        config.teachers, config.items_per_teacher
    );
    println!(
        "   - Students: {} (up to {} loans each)",
        config.students, config.loans_per_student
    );

    let teacher_offset = people::seeded_teacher_count(db).await?;
    let student_offset = people::seeded_student_count(db).await?;

    println!("\n🔧 Generating fake data...");
    let gen_start = Instant::now();

    let teachers = people::generate_teachers(config.teachers, teacher_offset, SEED_PASSWORD)
        .map_err(|e| format!("Failed to hash password: {}", e))?;
    let students = people::generate_students(config.students, student_offset);
    let (items, loans) = {
        let mut rng = rand::thread_rng();
        inventory::generate_inventory(&mut rng, &config, Utc::now())
    };

    println!(
        "   ✓ Generated {} teachers, {} students, {} items and {} loans in {:?}",
        teachers.len(),
        students.len(),
        items.len(),
        loans.len(),
        gen_start.elapsed()
    );

    println!("\n📦 Inserting...");
    let mut tx = db.begin().await?;
    let teacher_ids = people::insert_teachers(&mut tx, &teachers).await?;
    let student_ids = people::insert_students(&mut tx, &students).await?;
    let item_ids = inventory::insert_items(&mut tx, &items, &teacher_ids).await?;
    inventory::insert_loans(&mut tx, &loans, &item_ids, &student_ids).await?;
    tx.commit().await?;

    println!(
        "\n✅ Seeding completed in {:?}. Teachers log in with password '{}'.",
        start_time.elapsed(),
        SEED_PASSWORD
    );
    Ok(())
}

/// Deletes all seeded rows, children first.
pub async fn clear_all(db: &SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded data...");

    let pattern = format!("%@{}", SEED_EMAIL_DOMAIN);
    let mut tx = db.begin().await?;

    // units still out with seeded students go back to items that stay
    sqlx::query(
        r#"
        UPDATE items
        SET quantity = quantity + (
            SELECT COALESCE(SUM(l.quantity), 0)
            FROM loans l
            JOIN students s ON s.id = l.student_id
            WHERE l.item_id = items.id AND l.return_date IS NULL AND s.email LIKE ?1
        )
        WHERE id IN (
            SELECT l.item_id
            FROM loans l
            JOIN students s ON s.id = l.student_id
            WHERE l.return_date IS NULL AND s.email LIKE ?1
        )
        "#,
    )
    .bind(&pattern)
    .execute(&mut *tx)
    .await?;

    let loans = sqlx::query(
        r#"
        DELETE FROM loans
        WHERE student_id IN (SELECT id FROM students WHERE email LIKE ?1)
           OR item_id IN (
               SELECT i.id FROM items i
               JOIN teachers t ON t.id = i.teacher_id
               WHERE t.email LIKE ?1
           )
        "#,
    )
    .bind(&pattern)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let items = sqlx::query(
        "DELETE FROM items WHERE teacher_id IN (SELECT id FROM teachers WHERE email LIKE ?)",
    )
    .bind(&pattern)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let students = sqlx::query("DELETE FROM students WHERE email LIKE ?")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let teachers = sqlx::query("DELETE FROM teachers WHERE email LIKE ?")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    println!(
        "   ✓ Deleted {} loans, {} items, {} students and {} teachers in {:?}",
        loans,
        items,
        students,
        teachers,
        start_time.elapsed()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrator = "gearlend_db::MIGRATOR")]
    async fn test_seed_then_clear_keeps_stock_consistent(pool: SqlitePool) {
        seed_all(&pool, SeedConfig::new(2).with_items(3).with_students(10).with_loans(2))
            .await
            .unwrap();

        let teachers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teachers")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(teachers, 2);

        let negative: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE quantity < 0")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(negative, 0);

        clear_all(&pool).await.unwrap();

        for table in ["loans", "items", "students", "teachers"] {
            let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
                .fetch_one(&pool)
                .await
                .unwrap();
            assert_eq!(count, 0, "{} not cleared", table);
        }
    }

    #[sqlx::test(migrator = "gearlend_db::MIGRATOR")]
    async fn test_seeding_twice_keeps_numbers_unique(pool: SqlitePool) {
        let config = SeedConfig::new(1).with_items(1).with_students(3).with_loans(0);
        seed_all(&pool, config.clone()).await.unwrap();
        seed_all(&pool, config).await.unwrap();

        let students: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(students, 6);
    }
}

//! Item and loan seeding.
//!
//! Loans are simulated in memory against each item's starting stock, so the
//! inserted quantities already satisfy `stock left + units on open loans =
//! starting stock`.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use sqlx::{Sqlite, Transaction};
use std::time::Instant;

use super::models::{ItemSeed, LoanSeed, SeedConfig};

const EQUIPMENT: [&str; 12] = [
    "Projector",
    "HDMI Cable",
    "Tripod",
    "Camera",
    "Microphone",
    "Laptop",
    "Speaker",
    "Extension Cord",
    "Tablet",
    "Document Camera",
    "Headphones",
    "Calculator",
];

const BATCH_SIZE: usize = 500;

/// Share of seeded loans that are already returned.
const RETURNED_RATIO: f64 = 0.4;

/// Generates items and a loan history for them.
pub fn generate_inventory<R: Rng>(
    rng: &mut R,
    config: &SeedConfig,
    now: DateTime<Utc>,
) -> (Vec<ItemSeed>, Vec<LoanSeed>) {
    let mut items: Vec<ItemSeed> = (0..config.total_items())
        .map(|i| ItemSeed {
            name: format!(
                "{} {}",
                EQUIPMENT.choose(rng).copied().unwrap_or("Item"),
                i + 1
            ),
            quantity: rng.gen_range(1..=10),
            // roughly one in ten switched off by its teacher
            available: !rng.gen_bool(0.1),
            teacher_idx: i / config.items_per_teacher.max(1),
        })
        .collect();

    let mut loans = Vec::new();
    if config.history_days <= 0 {
        return (items, loans);
    }

    for student_idx in 0..config.students {
        for _ in 0..config.loans_per_student {
            let borrowable: Vec<usize> = items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.available && item.quantity > 0)
                .map(|(idx, _)| idx)
                .collect();

            let Some(&item_idx) = borrowable.choose(rng) else {
                return (items, loans);
            };

            let item = &mut items[item_idx];
            let quantity = rng.gen_range(1..=item.quantity.min(3));
            let loan_date = now
                - Duration::days(rng.gen_range(0..config.history_days))
                - Duration::minutes(rng.gen_range(0..24 * 60));

            let return_date = if rng.gen_bool(RETURNED_RATIO) {
                let returned = loan_date + Duration::hours(rng.gen_range(1..72));
                Some(returned.min(now))
            } else {
                item.quantity -= quantity;
                None
            };

            loans.push(LoanSeed {
                item_idx,
                student_idx,
                loan_date,
                return_date,
                quantity,
            });
        }
    }

    (items, loans)
}

pub async fn insert_items(
    tx: &mut Transaction<'_, Sqlite>,
    items: &[ItemSeed],
    teacher_ids: &[i64],
) -> Result<Vec<i64>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let now = Utc::now();
    let mut ids = Vec::with_capacity(items.len());

    for chunk in items.chunks(BATCH_SIZE) {
        let placeholders = vec!["(?, NULL, ?, ?, ?, ?, ?)"; chunk.len()].join(", ");
        let query = format!(
            "INSERT INTO items (name, image, quantity, available, teacher_id, created_at, updated_at) VALUES {} RETURNING id",
            placeholders
        );

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for item in chunk {
            let teacher_id = teacher_ids
                .get(item.teacher_idx)
                .copied()
                .ok_or("item refers to a teacher that was not inserted")?;
            q = q
                .bind(&item.name)
                .bind(item.quantity)
                .bind(item.available)
                .bind(teacher_id)
                .bind(now)
                .bind(now);
        }
        ids.extend(q.fetch_all(&mut **tx).await?);
    }

    println!(
        "   ✓ Inserted {} items in {:?}",
        ids.len(),
        start_time.elapsed()
    );
    Ok(ids)
}

pub async fn insert_loans(
    tx: &mut Transaction<'_, Sqlite>,
    loans: &[LoanSeed],
    item_ids: &[i64],
    student_ids: &[i64],
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let mut inserted = 0;

    for chunk in loans.chunks(BATCH_SIZE) {
        let placeholders = vec!["(?, ?, ?, ?, ?)"; chunk.len()].join(", ");
        let query = format!(
            "INSERT INTO loans (item_id, student_id, loan_date, return_date, quantity) VALUES {}",
            placeholders
        );

        let mut q = sqlx::query(&query);
        for loan in chunk {
            let item_id = item_ids
                .get(loan.item_idx)
                .copied()
                .ok_or("loan refers to an item that was not inserted")?;
            let student_id = student_ids
                .get(loan.student_idx)
                .copied()
                .ok_or("loan refers to a student that was not inserted")?;
            q = q
                .bind(item_id)
                .bind(student_id)
                .bind(loan.loan_date)
                .bind(loan.return_date)
                .bind(loan.quantity);
        }
        inserted += q.execute(&mut **tx).await?.rows_affected();
    }

    println!(
        "   ✓ Inserted {} loans in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}

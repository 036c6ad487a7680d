//! Seed records and seeding configuration.

use chrono::{DateTime, Utc};

/// Every seeded teacher and student gets an address under this domain.
pub const SEED_EMAIL_DOMAIN: &str = "example.com";

/// Seeded student numbers start with this letter.
pub const SEED_STUDENT_PREFIX: char = 'S';

/// Password shared by all seeded teachers.
pub const SEED_PASSWORD: &str = "password123";

pub struct TeacherSeed {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

pub struct StudentSeed {
    pub name: String,
    pub email: String,
    pub student_number: String,
}

pub struct ItemSeed {
    pub name: String,
    /// Stock left after the seeded loans were taken out.
    pub quantity: i64,
    pub available: bool,
    /// Index into the seeded teachers.
    pub teacher_idx: usize,
}

pub struct LoanSeed {
    /// Index into the seeded items.
    pub item_idx: usize,
    /// Index into the seeded students.
    pub student_idx: usize,
    pub loan_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub quantity: i64,
}

#[derive(Clone)]
pub struct SeedConfig {
    pub teachers: usize,
    pub items_per_teacher: usize,
    pub students: usize,
    pub loans_per_student: usize,
    /// Loans are spread over this many days before today.
    pub history_days: i64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            teachers: 3,
            items_per_teacher: 8,
            students: 30,
            loans_per_student: 3,
            history_days: 30,
        }
    }
}

impl SeedConfig {
    pub fn new(teachers: usize) -> Self {
        Self {
            teachers,
            ..Default::default()
        }
    }

    pub fn with_items(mut self, items_per_teacher: usize) -> Self {
        self.items_per_teacher = items_per_teacher;
        self
    }

    pub fn with_students(mut self, students: usize) -> Self {
        self.students = students;
        self
    }

    pub fn with_loans(mut self, loans_per_student: usize) -> Self {
        self.loans_per_student = loans_per_student;
        self
    }

    pub fn total_items(&self) -> usize {
        self.teachers * self.items_per_teacher
    }
}

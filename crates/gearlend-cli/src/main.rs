use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sqlx::SqlitePool;

use gearlend_cli::admin::create_teacher;
use gearlend_cli::seeder::{self, SeedConfig};
use gearlend_db::{DatabaseConfig, init_db_pool, run_migrations};
use gearlend_models::CreateTeacherDto;

#[derive(Parser)]
#[command(name = "gearlend-cli")]
#[command(about = "gearlend CLI - Administrative tools for gearlend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a teacher account
    CreateTeacher {
        /// Display name (at most 30 characters)
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake teachers, students, items and loans
    Seed {
        /// Number of teachers to create
        #[arg(short = 't', long, default_value = "3")]
        teachers: usize,

        /// Number of items per teacher
        #[arg(long, default_value = "8")]
        items: usize,

        /// Number of students to create
        #[arg(short = 's', long, default_value = "30")]
        students: usize,

        /// Maximum number of loans per student
        #[arg(long, default_value = "3")]
        loans: usize,
    },
    /// Clear all seeded data
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match connect().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::CreateTeacher {
            name,
            email,
            password,
        } => handle_create_teacher(&pool, name, email, password).await,
        Commands::Seed {
            teachers,
            items,
            students,
            loans,
        } => handle_seed(&pool, teachers, items, students, loans).await,
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }
}

async fn connect() -> Result<SqlitePool, Box<dyn std::error::Error>> {
    let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

fn prompt_text(prompt: &str) -> String {
    match Input::new().with_prompt(prompt).interact_text() {
        Ok(value) => value,
        Err(e) => {
            eprintln!("❌ Failed to read {}: {}", prompt.to_lowercase(), e);
            std::process::exit(1);
        }
    }
}

async fn handle_create_teacher(
    pool: &SqlitePool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let name = name.unwrap_or_else(|| prompt_text("Name"));
    let email = email.unwrap_or_else(|| prompt_text("Email address"));
    let password = password.unwrap_or_else(|| {
        match Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
        {
            Ok(password) => password,
            Err(e) => {
                eprintln!("❌ Failed to read password: {}", e);
                std::process::exit(1);
            }
        }
    });

    let dto = CreateTeacherDto {
        name,
        email,
        password,
    };

    match create_teacher(pool, &dto).await {
        Ok(id) => {
            println!("\n✅ Teacher created successfully!");
            println!("   Id: {}", id);
            println!("   Email: {}", dto.email);
            println!("   Name: {}", dto.name);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating teacher: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(
    pool: &SqlitePool,
    teachers: usize,
    items: usize,
    students: usize,
    loans: usize,
) {
    let config = SeedConfig::new(teachers)
        .with_items(items)
        .with_students(students)
        .with_loans(loans);

    if let Err(e) = seeder::seed_all(pool, config).await {
        eprintln!("\n❌ Error seeding database: {}", e);
        std::process::exit(1);
    }
}

async fn handle_clear_seed(pool: &SqlitePool) {
    if let Err(e) = seeder::clear_all(pool).await {
        eprintln!("\n❌ Error clearing seeded data: {}", e);
        std::process::exit(1);
    }
}

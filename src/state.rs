use sqlx::SqlitePool;

use gearlend_config::{CorsConfig, SessionConfig, StorageConfig};
use gearlend_core::LocalFileStorage;
use gearlend_db::{DatabaseConfig, init_db_pool, run_migrations};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: SqlitePool,
    pub session_config: SessionConfig,
    pub cors_config: CorsConfig,
    pub storage_config: StorageConfig,
    pub storage: LocalFileStorage,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        session_config: SessionConfig,
        cors_config: CorsConfig,
        storage_config: StorageConfig,
    ) -> Self {
        let storage = LocalFileStorage::with_max_size(
            storage_config.upload_dir.clone(),
            storage_config.public_base_url.clone(),
            storage_config.max_file_size,
        );

        Self {
            db,
            session_config,
            cors_config,
            storage_config,
            storage,
        }
    }
}

/// Connects to the database, applies migrations and reads the remaining config.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db = init_db_pool(&DatabaseConfig::from_env()).await?;
    run_migrations(&db).await?;

    Ok(AppState::new(
        db,
        SessionConfig::from_env(),
        CorsConfig::from_env(),
        StorageConfig::from_env(),
    ))
}

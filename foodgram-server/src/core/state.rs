//! Server state
//!
//! [`ServerState`] holds the shared handles every handler needs: the config,
//! the SQLite pool and the JWT service. It is the explicit context passed to
//! every handler and query function; no global lookup anywhere.

use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool, jwt: Arc<JwtService>) -> Self {
        Self { config, pool, jwt }
    }

    /// Initialize server state: working directory, database, JWT service
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db = DbService::new(&config.database_path).await?;
        let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self::new(config.clone(), db.pool, jwt))
    }

    /// In-memory state for tests
    pub async fn for_tests(config: Config) -> Result<Self, AppError> {
        let db = DbService::new_in_memory().await?;
        let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));
        Ok(Self::new(config, db.pool, jwt))
    }

    pub fn media_dir(&self) -> PathBuf {
        self.config.media_path()
    }
}

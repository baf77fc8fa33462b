//! Server configuration
//!
//! All settings come from environment variables with sensible defaults:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WORK_DIR | ./data | Working directory (database, media, logs) |
//! | HTTP_PORT | 8000 | HTTP API port |
//! | DATABASE_PATH | WORK_DIR/foodgram.db | SQLite database file |
//! | MEDIA_DIR | WORK_DIR/media | Stored recipe images |
//! | SHOPPING_LIST_FILENAME | shopping_list.txt | Attachment name for the export |
//! | PAGE_SIZE | 6 | Default page size for listings |
//! | ENVIRONMENT | development | development / staging / production |
//! | JWT_SECRET, JWT_EXPIRATION_MINUTES, JWT_ISSUER, JWT_AUDIENCE | — | see auth::jwt |

use std::path::PathBuf;

use crate::auth::JwtConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory: database, media and logs live under it
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// Directory for stored recipe images
    pub media_dir: String,
    /// Attachment filename for the shopping-list export
    pub shopping_list_filename: String,
    /// Default page size for paginated listings
    pub page_size: u32,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| format!("{work_dir}/foodgram.db")),
            media_dir: std::env::var("MEDIA_DIR").unwrap_or_else(|_| format!("{work_dir}/media")),
            shopping_list_filename: std::env::var("SHOPPING_LIST_FILENAME")
                .unwrap_or_else(|_| "shopping_list.txt".into()),
            page_size: std::env::var("PAGE_SIZE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(6),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            work_dir,
        }
    }

    /// Make sure the working directory layout exists
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        std::fs::create_dir_all(self.media_path().join("recipes"))?;
        Ok(())
    }

    pub fn media_path(&self) -> PathBuf {
        PathBuf::from(&self.media_dir)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

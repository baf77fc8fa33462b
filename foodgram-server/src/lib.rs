//! Foodgram Server - recipe sharing backend
//!
//! # Architecture
//!
//! - **HTTP API** (`api`): RESTful routes for recipes, tags, ingredients,
//!   users, subscriptions, favorites and the shopping cart
//! - **Database** (`db`): embedded SQLite via sqlx, repository functions
//! - **Auth** (`auth`): JWT bearer tokens + argon2 password hashing
//! - **Core** (`core`): configuration, shared state, server bring-up
//!
//! # Module structure
//!
//! ```text
//! foodgram-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT, passwords, extractors
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models and repositories
//! └── utils/         # errors, logging, pagination, images
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging
pub fn setup_environment() {
    dotenv::dotenv().ok();
    init_logger();
}

//! Authentication
//!
//! JWT bearer tokens + argon2 password hashing. The caller reaches handlers
//! through the extractors in [`extractor`]; there is no ambient request
//! context.

pub mod extractor;
pub mod jwt;
pub mod password;

pub use extractor::OptionalUser;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};

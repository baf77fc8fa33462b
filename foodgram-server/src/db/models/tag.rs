//! Tag Model

use serde::{Deserialize, Serialize};

/// Recipe tag (reference data, admin-seeded)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    /// `#RRGGBB` hex color, unique per tag
    pub color: String,
    pub slug: String,
}

//! Ingredient Model

use serde::{Deserialize, Serialize};

/// Ingredient (reference data, admin-seeded)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

//! Database models and write payloads

pub mod ingredient;
pub mod recipe;
pub mod tag;
pub mod user;

pub use ingredient::Ingredient;
pub use recipe::{
    IngredientAmount, IngredientAmountWrite, Recipe, RecipeSummary, RecipeWrite, ShoppingItem,
};
pub use tag::Tag;
pub use user::{SetPassword, User, UserCreate};

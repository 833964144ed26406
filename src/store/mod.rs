//! Recipe persistence.
//!
//! Handlers only see the [`RecipeStore`] trait. Two backends implement it:
//! - [`postgres::PgRecipeStore`]: diesel over an r2d2 pool (production)
//! - [`memory::MemoryRecipeStore`]: a map behind a lock (tests, local runs)
//!
//! Every method is a single atomic operation; no caller ever observes a
//! half-applied write.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewRecipe, Recipe};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Recipe not found")]
    NotFound,

    #[error("Database connection failed: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("Database query failed: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("Database task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// All recipes in ascending id order. A non-blank `tag` keeps only the
    /// recipes whose `dietary_tags` contain it as a case-sensitive substring.
    async fn list(&self, tag: Option<&str>) -> Result<Vec<Recipe>, StoreError>;

    async fn get(&self, id: i32) -> Result<Option<Recipe>, StoreError>;

    /// Persist a new recipe under a freshly assigned id.
    async fn create(&self, recipe: NewRecipe) -> Result<Recipe, StoreError>;

    /// Overwrite every field except the id. Fails with
    /// [`StoreError::NotFound`] if `id` does not exist.
    async fn update(&self, id: i32, recipe: NewRecipe) -> Result<(), StoreError>;

    /// Permanently delete. Fails with [`StoreError::NotFound`] if absent.
    async fn remove(&self, id: i32) -> Result<(), StoreError>;

    async fn exists(&self, id: i32) -> Result<bool, StoreError>;
}

/// Treat a blank tag filter as no filter at all.
pub(crate) fn normalize_tag(tag: Option<&str>) -> Option<&str> {
    tag.filter(|t| !t.trim().is_empty())
}

/// The sample recipes every fresh database starts with.
pub fn seed_recipes() -> Vec<NewRecipe> {
    vec![
        NewRecipe {
            title: "Simple Tomato Pasta".to_string(),
            ingredients: "pasta, tomato sauce, garlic, olive oil, salt".to_string(),
            steps: "Boil pasta. Heat sauce. Combine and serve.".to_string(),
            cooking_time_minutes: 20,
            dietary_tags: Some("vegetarian".to_string()),
        },
        NewRecipe {
            title: "Greek Salad".to_string(),
            ingredients: "cucumber, tomato, red onion, feta, olive oil, lemon".to_string(),
            steps: "Chop ingredients, toss with dressing.".to_string(),
            cooking_time_minutes: 10,
            dietary_tags: Some("vegetarian,gluten-free".to_string()),
        },
        NewRecipe {
            title: "Avocado Toast".to_string(),
            ingredients: "bread, avocado, lemon, salt, pepper".to_string(),
            steps: "Toast bread, mash avocado, season, spread on toast.".to_string(),
            cooking_time_minutes: 5,
            dietary_tags: Some("vegetarian".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag(None), None);
        assert_eq!(normalize_tag(Some("")), None);
        assert_eq!(normalize_tag(Some("  ")), None);
        assert_eq!(normalize_tag(Some("vegan")), Some("vegan"));
    }

    #[test]
    fn test_seed_recipes_are_valid() {
        let seeds = seed_recipes();
        assert_eq!(seeds.len(), 3);
        for seed in seeds {
            assert!(!seed.title.trim().is_empty());
            assert!(seed.cooking_time_minutes >= 1);
        }
    }
}

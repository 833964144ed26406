use async_trait::async_trait;
use diesel::prelude::*;

use super::{normalize_tag, RecipeStore, StoreError};
use crate::db::DbPool;
use crate::models::{NewRecipe, Recipe};
use crate::schema::recipes;

/// Escape LIKE metacharacters so `tag` is matched literally, then wrap it
/// for substring containment. Pairs with `.escape('\\')`.
fn contains_pattern(tag: &str) -> String {
    let mut pattern = String::with_capacity(tag.len() + 2);
    pattern.push('%');
    for c in tag.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Recipe store over the `recipes` table.
#[derive(Clone)]
pub struct PgRecipeStore {
    pool: DbPool,
}

impl PgRecipeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run a diesel closure on the blocking pool with a pooled connection.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, StoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await?
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn list(&self, tag: Option<&str>) -> Result<Vec<Recipe>, StoreError> {
        let tag = normalize_tag(tag);
        // No stored row can contain NUL, and Postgres rejects it as a parameter
        if tag.is_some_and(|t| t.contains('\0')) {
            return Ok(Vec::new());
        }
        let pattern = tag.map(contains_pattern);
        self.with_conn(move |conn| {
            let mut query = recipes::table
                .select(Recipe::as_select())
                .order(recipes::id.asc())
                .into_boxed();
            if let Some(pattern) = pattern {
                query = query.filter(recipes::dietary_tags.like(pattern).escape('\\'));
            }
            Ok(query.load(conn)?)
        })
        .await
    }

    async fn get(&self, id: i32) -> Result<Option<Recipe>, StoreError> {
        self.with_conn(move |conn| {
            Ok(recipes::table
                .find(id)
                .select(Recipe::as_select())
                .first(conn)
                .optional()?)
        })
        .await
    }

    async fn create(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let created = self
            .with_conn(move |conn| {
                Ok(diesel::insert_into(recipes::table)
                    .values(&recipe)
                    .returning(Recipe::as_returning())
                    .get_result(conn)?)
            })
            .await?;
        tracing::debug!(id = created.id, "created recipe");
        Ok(created)
    }

    async fn update(&self, id: i32, recipe: NewRecipe) -> Result<(), StoreError> {
        let updated = self
            .with_conn(move |conn| {
                Ok(diesel::update(recipes::table.find(id))
                    .set(&recipe)
                    .execute(conn)?)
            })
            .await?;
        if updated == 0 {
            return Err(StoreError::NotFound);
        }
        tracing::debug!(id, "updated recipe");
        Ok(())
    }

    async fn remove(&self, id: i32) -> Result<(), StoreError> {
        let deleted = self
            .with_conn(move |conn| Ok(diesel::delete(recipes::table.find(id)).execute(conn)?))
            .await?;
        if deleted == 0 {
            return Err(StoreError::NotFound);
        }
        tracing::debug!(id, "deleted recipe");
        Ok(())
    }

    async fn exists(&self, id: i32) -> Result<bool, StoreError> {
        self.with_conn(move |conn| {
            Ok(diesel::select(diesel::dsl::exists(recipes::table.find(id))).get_result(conn)?)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_plain() {
        assert_eq!(contains_pattern("vegan"), "%vegan%");
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("gluten_free"), "%gluten\\_free%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}

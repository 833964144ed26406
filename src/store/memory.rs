use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{normalize_tag, seed_recipes, RecipeStore, StoreError};
use crate::models::{NewRecipe, Recipe};

#[derive(Default)]
struct Inner {
    last_id: i32,
    recipes: BTreeMap<i32, Recipe>,
}

/// In-process recipe store.
///
/// Ids increase monotonically and are never reused, even after a delete.
#[derive(Default)]
pub struct MemoryRecipeStore {
    inner: RwLock<Inner>,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with [`seed_recipes`] under ids 1..=3.
    pub fn seeded() -> Self {
        let mut inner = Inner::default();
        for recipe in seed_recipes() {
            inner.last_id += 1;
            inner
                .recipes
                .insert(inner.last_id, recipe.with_id(inner.last_id));
        }
        Self {
            inner: RwLock::new(inner),
        }
    }
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn list(&self, tag: Option<&str>) -> Result<Vec<Recipe>, StoreError> {
        let tag = normalize_tag(tag);
        let inner = self.inner.read().await;
        Ok(inner
            .recipes
            .values()
            .filter(|r| match tag {
                Some(tag) => r.dietary_tags.as_deref().is_some_and(|t| t.contains(tag)),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Recipe>, StoreError> {
        Ok(self.inner.read().await.recipes.get(&id).cloned())
    }

    async fn create(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let recipe = recipe.with_id(inner.last_id);
        inner.recipes.insert(recipe.id, recipe.clone());
        tracing::debug!(id = recipe.id, "created recipe");
        Ok(recipe)
    }

    async fn update(&self, id: i32, recipe: NewRecipe) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let slot = inner.recipes.get_mut(&id).ok_or(StoreError::NotFound)?;
        *slot = recipe.with_id(id);
        tracing::debug!(id, "updated recipe");
        Ok(())
    }

    async fn remove(&self, id: i32) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.recipes.remove(&id).ok_or(StoreError::NotFound)?;
        tracing::debug!(id, "deleted recipe");
        Ok(())
    }

    async fn exists(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.inner.read().await.recipes.contains_key(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn new_recipe(title: &str, tags: Option<&str>) -> NewRecipe {
        NewRecipe {
            title: title.to_string(),
            ingredients: "a, b".to_string(),
            steps: "mix".to_string(),
            cooking_time_minutes: 3,
            dietary_tags: tags.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_seeded_has_three_recipes() {
        let store = MemoryRecipeStore::seeded();
        let ids: Vec<i32> = store.list(None).await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = MemoryRecipeStore::new();
        let first = store.create(new_recipe("one", None)).await.unwrap();
        let second = store.create(new_recipe("two", None)).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.get(2).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_remove() {
        let store = MemoryRecipeStore::new();
        let first = store.create(new_recipe("one", None)).await.unwrap();
        store.remove(first.id).await.unwrap();
        let second = store.create(new_recipe("two", None)).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_tag_filter_is_case_sensitive_substring() {
        let store = MemoryRecipeStore::new();
        store.create(new_recipe("a", Some("vegan,nut-free"))).await.unwrap();
        store.create(new_recipe("b", Some("Vegan"))).await.unwrap();
        store.create(new_recipe("c", None)).await.unwrap();
        store.create(new_recipe("d", Some("non-vegan"))).await.unwrap();

        let titles: Vec<String> = store
            .list(Some("vegan"))
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["a", "d"]);

        assert_eq!(store.list(Some(" ")).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let store = MemoryRecipeStore::new();
        let created = store.create(new_recipe("old", Some("vegan"))).await.unwrap();

        store
            .update(created.id, new_recipe("new", None))
            .await
            .unwrap();

        let updated = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(updated.title, "new");
        assert_eq!(updated.dietary_tags, None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_unique_ids() {
        let store = Arc::new(MemoryRecipeStore::new());

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create(new_recipe(&format!("r{i}"), None))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            assert!(ids.insert(handle.await.unwrap()));
        }
        assert_eq!(ids.len(), 50);
        assert_eq!(store.list(None).await.unwrap().len(), 50);
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let store = MemoryRecipeStore::seeded();
        assert_eq!(store.get(99).await.unwrap(), None);
        assert!(!store.exists(99).await.unwrap());
        assert!(matches!(
            store.update(99, new_recipe("x", None)).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(store.remove(99).await, Err(StoreError::NotFound)));
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorites synchronization: membership load, toggle and explicit set.
//!
//! Every decision is made against the store, never against a client's copy
//! of the set, and a write error is returned to the caller instead of being
//! reported as a state change.

use crate::db::Store;
use crate::error::AppError;
use crate::models::Favorite;
use futures_util::{stream, StreamExt};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Recipe fields copied into a favorite document.
#[derive(Debug, Clone)]
pub struct RecipeRef {
    pub id: String,
    pub name: String,
    pub image: String,
}

/// Favorites operations for signed-in users.
#[derive(Clone)]
pub struct FavoritesService {
    store: Arc<dyn Store>,
}

impl FavoritesService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Recipe ids the user has favorited.
    pub async fn load_set(&self, user_id: &str) -> Result<HashSet<String>, AppError> {
        let ids: HashSet<String> = self
            .store
            .list_favorites(user_id)
            .await?
            .into_iter()
            .map(|f| f.recipe_id)
            .collect();

        tracing::debug!(user_id, count = ids.len(), "Loaded favorite set");
        Ok(ids)
    }

    /// Full favorite documents for the profile view, sorted by recipe name.
    pub async fn list(&self, user_id: &str) -> Result<Vec<Favorite>, AppError> {
        let mut favorites = self.store.list_favorites(user_id).await?;
        favorites.sort_by(|a, b| a.recipe_name.cmp(&b.recipe_name));
        Ok(favorites)
    }

    /// Whether one recipe is favorited.
    pub async fn is_favorite(&self, user_id: &str, recipe_id: &str) -> Result<bool, AppError> {
        Ok(self.store.get_favorite(user_id, recipe_id).await?.is_some())
    }

    /// Flip membership for `recipe`. Returns the new state.
    pub async fn toggle(&self, user_id: &str, recipe: &RecipeRef) -> Result<bool, AppError> {
        self.toggle_with(user_id, &recipe.id, || async { Ok(recipe.clone()) })
            .await
    }

    /// Flip membership for `recipe_id`, calling `resolve` for the recipe
    /// details only when a favorite has to be created.
    pub async fn toggle_with<F, Fut>(
        &self,
        user_id: &str,
        recipe_id: &str,
        resolve: F,
    ) -> Result<bool, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<RecipeRef, AppError>>,
    {
        let favorite = if self.is_favorite(user_id, recipe_id).await? {
            self.store.delete_favorite(user_id, recipe_id).await?;
            false
        } else {
            let recipe = resolve().await?;
            self.apply(user_id, &recipe, true).await?;
            true
        };

        tracing::info!(user_id, recipe_id, favorite, "Favorite toggled");
        Ok(favorite)
    }

    /// Make membership equal `favorite`. Idempotent.
    pub async fn set(
        &self,
        user_id: &str,
        recipe: &RecipeRef,
        favorite: bool,
    ) -> Result<bool, AppError> {
        self.apply(user_id, recipe, favorite).await?;
        Ok(favorite)
    }

    /// Remove the favorite for `recipe_id` if present. Idempotent.
    pub async fn remove(&self, user_id: &str, recipe_id: &str) -> Result<(), AppError> {
        self.store.delete_favorite(user_id, recipe_id).await
    }

    async fn apply(&self, user_id: &str, recipe: &RecipeRef, favorite: bool) -> Result<(), AppError> {
        if favorite {
            self.store
                .put_favorite(&Favorite {
                    user_id: user_id.to_string(),
                    recipe_id: recipe.id.clone(),
                    recipe_name: recipe.name.clone(),
                    recipe_image: recipe.image.clone(),
                })
                .await
        } else {
            self.store.delete_favorite(user_id, &recipe.id).await
        }
    }

    /// Delete every favorite of a user. Returns how many were deleted.
    pub async fn delete_all(&self, user_id: &str) -> Result<usize, AppError> {
        let favorites = self.store.list_favorites(user_id).await?;
        let count = favorites.len();
        let store = &self.store;

        stream::iter(favorites)
            .map(|favorite| async move {
                store
                    .delete_favorite(&favorite.user_id, &favorite.recipe_id)
                    .await
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, AppError>>()?;

        tracing::debug!(user_id, count, "Deleted all favorites");
        Ok(count)
    }
}

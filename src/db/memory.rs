//! In-process store for tests and local runs without Firestore.

use crate::db::Store;
use crate::error::AppError;
use crate::models::favorite::favorite_document_id;
use crate::models::{Favorite, User};
use async_trait::async_trait;
use dashmap::DashMap;

/// [`Store`] backed by concurrent hash maps, keyed like the Firestore
/// documents.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<String, User>,
    favorites: DashMap<String, Favorite>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored favorite documents across all users.
    pub fn favorite_count(&self) -> usize {
        self.favorites.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_user(&self, uid: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.get(uid).map(|u| u.clone()))
    }

    async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        self.users.insert(user.uid.clone(), user.clone());
        Ok(())
    }

    async fn delete_user(&self, uid: &str) -> Result<(), AppError> {
        self.users.remove(uid);
        Ok(())
    }

    async fn get_favorite(
        &self,
        user_id: &str,
        recipe_id: &str,
    ) -> Result<Option<Favorite>, AppError> {
        Ok(self
            .favorites
            .get(&favorite_document_id(user_id, recipe_id))
            .map(|f| f.clone()))
    }

    async fn put_favorite(&self, favorite: &Favorite) -> Result<(), AppError> {
        self.favorites
            .insert(favorite.document_id(), favorite.clone());
        Ok(())
    }

    async fn delete_favorite(&self, user_id: &str, recipe_id: &str) -> Result<(), AppError> {
        self.favorites
            .remove(&favorite_document_id(user_id, recipe_id));
        Ok(())
    }

    async fn list_favorites(&self, user_id: &str) -> Result<Vec<Favorite>, AppError> {
        Ok(self
            .favorites
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect())
    }
}

//! Database layer (Firestore, with an in-memory stand-in).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::{Favorite, User};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    /// User profiles (keyed by uid)
    pub const USERS: &str = "users";
    /// Favorite markers (keyed by `{uid}_{recipeId}`)
    pub const FAVORITES: &str = "favorites";
}

/// Document storage used by the services.
///
/// Favorites are create/delete only; a put on an existing key overwrites it
/// with identical content, so writes are idempotent.
#[async_trait]
pub trait Store: Send + Sync {
    async fn get_user(&self, uid: &str) -> Result<Option<User>, AppError>;

    async fn upsert_user(&self, user: &User) -> Result<(), AppError>;

    async fn delete_user(&self, uid: &str) -> Result<(), AppError>;

    async fn get_favorite(
        &self,
        user_id: &str,
        recipe_id: &str,
    ) -> Result<Option<Favorite>, AppError>;

    async fn put_favorite(&self, favorite: &Favorite) -> Result<(), AppError>;

    async fn delete_favorite(&self, user_id: &str, recipe_id: &str) -> Result<(), AppError>;

    /// All favorites whose `userId` equals `user_id`.
    async fn list_favorites(&self, user_id: &str) -> Result<Vec<Favorite>, AppError>;
}

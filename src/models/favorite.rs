// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorite recipe marker stored in Firestore.

use serde::{Deserialize, Serialize};

/// One favorite document per (user, recipe) pair.
///
/// Stored at `favorites/{userId}_{recipeId}`. The document's existence is the
/// favorited flag; there is no status field and no update path.
/// Field names are camelCase to stay readable alongside documents written by
/// the web client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    /// Firebase uid of the owner
    pub user_id: String,
    /// TheMealDB `idMeal`
    pub recipe_id: String,
    /// Recipe name at the time it was favorited
    pub recipe_name: String,
    /// Recipe thumbnail URL at the time it was favorited
    pub recipe_image: String,
}

impl Favorite {
    /// Firestore document id for this favorite.
    pub fn document_id(&self) -> String {
        favorite_document_id(&self.user_id, &self.recipe_id)
    }
}

/// Composite document id `{user_id}_{recipe_id}`.
pub fn favorite_document_id(user_id: &str, recipe_id: &str) -> String {
    format!("{}_{}", user_id, recipe_id)
}

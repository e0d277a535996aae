// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::recipe::is_valid_recipe_id;
use crate::models::Favorite;
use crate::services::RecipeRef;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/account", delete(delete_account))
        .route("/api/favorites", get(list_favorites))
        .route("/api/favorites/ids", get(list_favorite_ids))
        .route(
            "/api/favorites/{recipe_id}",
            axum::routing::put(add_favorite).delete(remove_favorite),
        )
        .route("/api/favorites/{recipe_id}/toggle", post(toggle_favorite))
}

// ─── User Profile ────────────────────────────────────────────

/// Favorite recipe as shown on the profile page.
#[derive(Serialize, Clone, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FavoriteSummary {
    pub recipe_id: String,
    pub recipe_name: String,
    pub recipe_image: String,
}

impl From<Favorite> for FavoriteSummary {
    fn from(favorite: Favorite) -> Self {
        Self {
            recipe_id: favorite.recipe_id,
            recipe_name: favorite.recipe_name,
            recipe_image: favorite.recipe_image,
        }
    }
}

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileResponse {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub favorites: Vec<FavoriteSummary>,
}

/// Get current user profile and favorites.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>> {
    let (profile, favorites) = tokio::try_join!(
        state.db.get_user(&user.uid),
        state.favorites.list(&user.uid),
    )?;
    let favorites = favorites.into_iter().map(FavoriteSummary::from).collect();

    // The profile write at sign-in is best effort; the session alone is
    // enough to show the account.
    let Some(profile) = profile else {
        tracing::debug!(uid = %user.uid, "No profile document, using session only");
        return Ok(Json(ProfileResponse {
            uid: user.uid,
            email: None,
            display_name: None,
            photo_url: None,
            favorites,
        }));
    };

    Ok(Json(ProfileResponse {
        uid: profile.uid,
        email: profile.email,
        display_name: profile.display_name,
        photo_url: profile.photo_url,
        favorites,
    }))
}

// ─── Account Deletion ────────────────────────────────────────

/// Response for account deletion.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub message: String,
    pub favorites_deleted: u32,
}

/// Delete the user's profile and all favorites.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DeleteAccountResponse>> {
    tracing::info!(uid = %user.uid, "User-initiated account deletion");

    let favorites_deleted = state.favorites.delete_all(&user.uid).await?;
    state.db.delete_user(&user.uid).await?;

    tracing::info!(uid = %user.uid, favorites_deleted, "Account deleted");

    Ok(Json(DeleteAccountResponse {
        success: true,
        message: "Account deleted. All data has been removed.".to_string(),
        favorites_deleted: favorites_deleted as u32,
    }))
}

// ─── Favorites ───────────────────────────────────────────────

async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<FavoriteSummary>>> {
    let favorites = state.favorites.list(&user.uid).await?;
    Ok(Json(favorites.into_iter().map(FavoriteSummary::from).collect()))
}

/// Membership set, sorted for stable output.
async fn list_favorite_ids(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<String>>> {
    let mut ids: Vec<String> = state.favorites.load_set(&user.uid).await?.into_iter().collect();
    ids.sort();
    Ok(Json(ids))
}

/// Optional recipe details sent with a favorite write.
///
/// When either field is missing the recipe is looked up in TheMealDB.
#[derive(Deserialize, Default)]
struct FavoriteBody {
    recipe_name: Option<String>,
    recipe_image: Option<String>,
}

fn parse_body(body: &Bytes) -> Result<FavoriteBody> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(FavoriteBody::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid favorite body: {}", e)))
}

fn check_recipe_id(recipe_id: &str) -> Result<()> {
    if is_valid_recipe_id(recipe_id) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!("Invalid recipe id: {recipe_id}")))
    }
}

async fn resolve_recipe(state: &AppState, recipe_id: &str, body: FavoriteBody) -> Result<RecipeRef> {
    if let (Some(name), Some(image)) = (body.recipe_name, body.recipe_image) {
        return Ok(RecipeRef {
            id: recipe_id.to_string(),
            name,
            image,
        });
    }

    let recipe = state
        .mealdb
        .lookup(recipe_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Recipe {recipe_id}")))?;

    Ok(RecipeRef {
        id: recipe.id,
        name: recipe.name,
        image: recipe.thumbnail.unwrap_or_default(),
    })
}

/// Favorite state after a write.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FavoriteStateResponse {
    pub recipe_id: String,
    pub is_favorite: bool,
}

async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(recipe_id): Path<String>,
    body: Bytes,
) -> Result<Json<FavoriteStateResponse>> {
    check_recipe_id(&recipe_id)?;
    let body = parse_body(&body)?;

    // Details are only looked up when the favorite is being created.
    let is_favorite = state
        .favorites
        .toggle_with(&user.uid, &recipe_id, || {
            resolve_recipe(&state, &recipe_id, body)
        })
        .await?;

    Ok(Json(FavoriteStateResponse {
        recipe_id,
        is_favorite,
    }))
}

async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(recipe_id): Path<String>,
    body: Bytes,
) -> Result<Json<FavoriteStateResponse>> {
    check_recipe_id(&recipe_id)?;
    let recipe = resolve_recipe(&state, &recipe_id, parse_body(&body)?).await?;

    let is_favorite = state.favorites.set(&user.uid, &recipe, true).await?;
    tracing::info!(uid = %user.uid, recipe_id = %recipe_id, "Favorite added");

    Ok(Json(FavoriteStateResponse {
        recipe_id,
        is_favorite,
    }))
}

async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(recipe_id): Path<String>,
) -> Result<Json<FavoriteStateResponse>> {
    check_recipe_id(&recipe_id)?;

    state.favorites.remove(&user.uid, &recipe_id).await?;
    tracing::info!(uid = %user.uid, recipe_id = %recipe_id, "Favorite removed");

    Ok(Json(FavoriteStateResponse {
        recipe_id,
        is_favorite: false,
    }))
}

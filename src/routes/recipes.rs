// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public recipe browsing routes.
//!
//! A session is optional here; when present, meals are annotated with the
//! caller's favorite state.

use crate::error::{AppError, Result};
use crate::middleware::auth::MaybeUser;
use crate::models::pagination::{paginate, Page};
use crate::models::recipe::is_valid_recipe_id;
use crate::models::{Category, Ingredient, MealSummary};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const MAX_NAME_LEN: usize = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/featured", get(get_featured))
        .route("/api/categories", get(get_categories))
        .route("/api/categories/{name}/meals", get(get_category_meals))
        .route("/api/search", get(search))
        .route("/api/recipes/{id}", get(get_recipe))
}

fn default_page() -> u32 {
    1
}

/// Meal card with the caller's favorite state.
#[derive(Serialize, Clone, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealCard {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
    pub category: Option<String>,
    pub is_favorite: bool,
}

impl MealCard {
    fn new(meal: MealSummary, favorites: &HashSet<String>) -> Self {
        let is_favorite = favorites.contains(&meal.id);
        Self {
            id: meal.id,
            name: meal.name,
            thumbnail: meal.thumbnail,
            category: meal.category,
            is_favorite,
        }
    }
}

/// Favorite ids of the caller, empty when signed out.
async fn favorite_set(state: &AppState, user: &MaybeUser) -> Result<HashSet<String>> {
    match &user.0 {
        Some(user) => state.favorites.load_set(&user.uid).await,
        None => Ok(HashSet::new()),
    }
}

fn cards(meals: Vec<MealSummary>, favorites: &HashSet<String>) -> Vec<MealCard> {
    meals
        .into_iter()
        .map(|meal| MealCard::new(meal, favorites))
        .collect()
}

// ─── Home ────────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct FeaturedQuery {
    #[validate(length(min = 1, max = 100))]
    category: Option<String>,
}

/// Up to one page of meals, optionally restricted to a category.
async fn get_featured(
    State(state): State<Arc<AppState>>,
    user: MaybeUser,
    Query(params): Query<FeaturedQuery>,
) -> Result<Json<Vec<MealCard>>> {
    params.validate()?;

    let (meals, favorites) = tokio::try_join!(
        state.mealdb.featured(params.category.as_deref()),
        favorite_set(&state, &user),
    )?;

    Ok(Json(cards(meals, &favorites)))
}

// ─── Categories ──────────────────────────────────────────────

async fn get_categories(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.mealdb.list_categories().await?))
}

#[derive(Deserialize, Validate)]
struct PageQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    page: u32,
}

/// Meals of one category, paginated.
async fn get_category_meals(
    State(state): State<Arc<AppState>>,
    user: MaybeUser,
    Path(name): Path<String>,
    Query(params): Query<PageQuery>,
) -> Result<Json<Page<MealCard>>> {
    params.validate()?;
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::BadRequest(
            "Category name must be 1-100 characters".to_string(),
        ));
    }

    let (meals, favorites) = tokio::try_join!(
        state.mealdb.filter_by_category(name),
        favorite_set(&state, &user),
    )?;

    tracing::debug!(category = name, count = meals.len(), page = params.page, "Category meals");

    let page = paginate(meals, params.page)?;
    Ok(Json(page.map(|meal| MealCard::new(meal, &favorites))))
}

// ─── Search ──────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct SearchQuery {
    #[validate(length(min = 1, max = 100))]
    q: String,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    page: u32,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SearchResponse {
    pub query: String,
    /// `total == 0` is the "no results" state.
    #[serde(flatten)]
    pub results: Page<MealCard>,
}

/// Search meals by name, paginated.
async fn search(
    State(state): State<Arc<AppState>>,
    user: MaybeUser,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    params.validate()?;
    let query = params.q.trim().to_string();
    if query.is_empty() {
        return Err(AppError::BadRequest("Search query is empty".to_string()));
    }

    let (meals, favorites) = tokio::try_join!(
        state.mealdb.search_by_name(&query),
        favorite_set(&state, &user),
    )?;

    tracing::debug!(query = %query, count = meals.len(), "Recipe search");

    let results = paginate(meals, params.page)?.map(|meal| MealCard::new(meal, &favorites));
    Ok(Json(SearchResponse { query, results }))
}

// ─── Recipe Detail ───────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecipeDetail {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
    pub category: Option<String>,
    pub area: Option<String>,
    pub tags: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    /// Instruction text split into steps
    pub steps: Vec<String>,
    pub youtube: Option<String>,
    pub source: Option<String>,
    /// `None` when signed out
    pub is_favorite: Option<bool>,
}

/// Full recipe with derived ingredient list and steps.
async fn get_recipe(
    State(state): State<Arc<AppState>>,
    user: MaybeUser,
    Path(id): Path<String>,
) -> Result<Json<RecipeDetail>> {
    if !is_valid_recipe_id(&id) {
        return Err(AppError::BadRequest(format!("Invalid recipe id: {id}")));
    }

    let is_favorite = async {
        match &user.0 {
            Some(user) => state.favorites.is_favorite(&user.uid, &id).await.map(Some),
            None => Ok(None),
        }
    };

    let (recipe, is_favorite) = tokio::try_join!(state.mealdb.lookup(&id), is_favorite)?;
    let recipe = recipe.ok_or_else(|| AppError::NotFound(format!("Recipe {id}")))?;

    Ok(Json(RecipeDetail {
        ingredients: recipe.ingredients(),
        tags: recipe.tag_list(),
        steps: recipe.instruction_steps(),
        id: recipe.id,
        name: recipe.name,
        thumbnail: recipe.thumbnail,
        category: recipe.category,
        area: recipe.area,
        youtube: recipe.youtube,
        source: recipe.source,
        is_favorite,
    }))
}

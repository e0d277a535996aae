// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! TheMealDB API client.
//!
//! Handles:
//! - Category listing
//! - Filter-by-category, search-by-name and lookup-by-id
//! - Envelope unwrapping (`meals` / `categories` may be `null`)

use crate::error::AppError;
use crate::models::{Category, MealSummary, RecipeRecord, PAGE_SIZE};
use serde::Deserialize;
use std::time::Duration;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// TheMealDB API client.
#[derive(Clone)]
pub struct MealDbClient {
    http: reqwest::Client,
    base_url: String,
}

/// `{"meals": [...]}` envelope; `null` when nothing matched.
#[derive(Debug, Deserialize)]
struct MealsEnvelope<T> {
    meals: Option<Vec<T>>,
}

/// `{"categories": [...]}` envelope.
#[derive(Debug, Deserialize)]
struct CategoriesEnvelope {
    #[serde(default)]
    categories: Option<Vec<Category>>,
}

impl MealDbClient {
    /// Create a client rooted at `base_url` (e.g. `https://www.themealdb.com/api/json/v1/1`).
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// All meal categories.
    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let url = format!("{}/categories.php", self.base_url);
        let envelope: CategoriesEnvelope = self.get_json(&url, &[]).await?;
        Ok(envelope.categories.unwrap_or_default())
    }

    /// Meals in a category. Unknown categories yield an empty list.
    pub async fn filter_by_category(&self, category: &str) -> Result<Vec<MealSummary>, AppError> {
        let url = format!("{}/filter.php", self.base_url);
        let envelope: MealsEnvelope<MealSummary> = self.get_json(&url, &[("c", category)]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    /// Meals whose name contains `query`.
    pub async fn search_by_name(&self, query: &str) -> Result<Vec<MealSummary>, AppError> {
        let url = format!("{}/search.php", self.base_url);
        let envelope: MealsEnvelope<MealSummary> = self.get_json(&url, &[("s", query)]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    /// Full recipe by id, or `None` if the id is unknown.
    pub async fn lookup(&self, recipe_id: &str) -> Result<Option<RecipeRecord>, AppError> {
        let url = format!("{}/lookup.php", self.base_url);
        let envelope: MealsEnvelope<RecipeRecord> =
            self.get_json(&url, &[("i", recipe_id)]).await?;
        Ok(envelope.meals.and_then(|meals| meals.into_iter().next()))
    }

    /// Home page selection: the first page of all meals, or of one category.
    pub async fn featured(&self, category: Option<&str>) -> Result<Vec<MealSummary>, AppError> {
        let mut meals = match category {
            Some(category) => self.filter_by_category(category).await?,
            None => self.search_by_name("").await?,
        };
        meals.truncate(PAGE_SIZE);
        Ok(meals)
    }

    /// GET with query parameters and JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, AppError> {
        tracing::debug!(url, ?query, "TheMealDB request");

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::RecipeApi(e.to_string()))?;

        check_response_json(response).await
    }
}

/// Check response status and parse JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 429 {
            tracing::warn!("TheMealDB rate limit hit (429)");
        }

        return Err(AppError::RecipeApi(format!("HTTP {}: {}", status, body)));
    }

    // TheMealDB answers some misses with an empty body instead of `{"meals":null}`.
    let body = response
        .text()
        .await
        .map_err(|e| AppError::RecipeApi(format!("Failed to read body: {}", e)))?;
    let body = if body.trim().is_empty() { "{}" } else { body.as_str() };

    serde_json::from_str(body).map_err(|e| AppError::RecipeApi(format!("JSON parse error: {}", e)))
}

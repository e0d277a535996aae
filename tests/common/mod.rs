// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{extract::Query, routing::get, Json, Router};
use forkfusion::config::Config;
use forkfusion::db::{FirestoreDb, MemoryStore, Store};
use forkfusion::routes::create_router;
use forkfusion::services::{IdentityVerifier, MealDbClient};
use forkfusion::AppState;
use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Secret the test identity verifier accepts for ID tokens.
#[allow(dead_code)]
pub const ID_TOKEN_SECRET: &[u8] = b"firebase-test-secret";
#[allow(dead_code)]
pub const ID_TOKEN_KID: &str = "test-kid";

/// Nothing listens on the discard port, so recipe lookups fail fast.
#[allow(dead_code)]
pub const UNREACHABLE_MEALDB: &str = "http://127.0.0.1:9/api/json/v1/1";

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

fn now_secs() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

/// Create a test app backed by an in-memory store.
/// Returns the router, the shared state and the store.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<MemoryStore>) {
    create_test_app_with_config(Config::test_default())
}

#[allow(dead_code)]
pub fn create_test_app_with_config(
    config: Config,
) -> (axum::Router, Arc<AppState>, Arc<MemoryStore>) {
    build_test_app(config, UNREACHABLE_MEALDB)
}

/// Create a test app whose recipe catalog is served by [`spawn_mealdb_stub`].
#[allow(dead_code)]
pub async fn create_test_app_with_catalog() -> (axum::Router, Arc<AppState>, Arc<MemoryStore>) {
    let base_url = spawn_mealdb_stub().await;
    build_test_app(Config::test_default(), &base_url)
}

fn build_test_app(
    config: Config,
    mealdb_base_url: &str,
) -> (axum::Router, Arc<AppState>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let db: Arc<dyn Store> = store.clone();

    let mealdb = MealDbClient::new(mealdb_base_url).unwrap();
    let identity = Arc::new(
        IdentityVerifier::new_with_static_key(
            &config,
            ID_TOKEN_KID,
            Algorithm::HS256,
            DecodingKey::from_secret(ID_TOKEN_SECRET),
        )
        .unwrap(),
    );

    let state = Arc::new(AppState::new(config, db, mealdb, identity));

    (create_router(state.clone()), state, store)
}

// ─── TheMealDB stub ──────────────────────────────────────────

/// Number of meals in the stub's "Seafood" category.
#[allow(dead_code)]
pub const SEAFOOD_COUNT: usize = 30;
/// Number of meals the stub returns for an empty search.
#[allow(dead_code)]
pub const ALL_MEALS_COUNT: usize = 20;

fn meal(id: usize, name: &str, category: Option<&str>) -> serde_json::Value {
    let mut meal = json!({
        "idMeal": id.to_string(),
        "strMeal": name,
        "strMealThumb": format!("https://example.com/{id}.jpg"),
    });
    if let Some(category) = category {
        meal["strCategory"] = json!(category);
    }
    meal
}

fn arrabiata() -> serde_json::Value {
    json!({
        "idMeal": "52771",
        "strMeal": "Spicy Arrabiata Penne",
        "strCategory": "Vegetarian",
        "strArea": "Italian",
        "strInstructions": "Bring a large pot of water to a boil.\r\nAdd the penne. Drain well.",
        "strMealThumb": "https://example.com/52771.jpg",
        "strTags": "Pasta,Curry",
        "strYoutube": "https://www.youtube.com/watch?v=1IszT_guI08",
        "strIngredient1": "penne rigate",
        "strMeasure1": "1 pound",
        "strIngredient2": "",
        "strMeasure2": "",
        "strIngredient3": "olive oil",
        "strMeasure3": "1/4 cup",
        "strIngredient4": null,
        "strMeasure4": null,
    })
}

async fn categories_php() -> Json<serde_json::Value> {
    Json(json!({
        "categories": [
            {"idCategory": "1", "strCategory": "Beef", "strCategoryThumb": "https://example.com/beef.png", "strCategoryDescription": "Beef is the culinary name for meat from cattle."},
            {"idCategory": "3", "strCategory": "Dessert", "strCategoryThumb": "https://example.com/dessert.png", "strCategoryDescription": "Dessert is a course that concludes a meal."},
        ]
    }))
}

async fn filter_php(Query(params): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
    let meals = match params.get("c").map(String::as_str) {
        Some("Seafood") => json!((0..SEAFOOD_COUNT)
            .map(|i| meal(53000 + i, &format!("Seafood {i}"), None))
            .collect::<Vec<_>>()),
        _ => serde_json::Value::Null,
    };
    Json(json!({ "meals": meals }))
}

async fn search_php(Query(params): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
    let query = params.get("s").map(String::as_str).unwrap_or("");
    let meals = if query.is_empty() {
        json!((0..ALL_MEALS_COUNT)
            .map(|i| meal(52000 + i, &format!("Meal {i}"), Some("Misc")))
            .collect::<Vec<_>>())
    } else if "spicy arrabiata penne".contains(&query.to_lowercase()) {
        json!([arrabiata()])
    } else {
        serde_json::Value::Null
    };
    Json(json!({ "meals": meals }))
}

async fn lookup_php(Query(params): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
    let meals = match params.get("i").map(String::as_str) {
        Some("52771") => json!([arrabiata()]),
        _ => serde_json::Value::Null,
    };
    Json(json!({ "meals": meals }))
}

/// Serve a small TheMealDB look-alike on an ephemeral port.
/// Returns its base URL.
#[allow(dead_code)]
pub async fn spawn_mealdb_stub() -> String {
    let app = Router::new()
        .route("/api/json/v1/1/categories.php", get(categories_php))
        .route("/api/json/v1/1/filter.php", get(filter_php))
        .route("/api/json/v1/1/search.php", get(search_php))
        .route("/api/json/v1/1/lookup.php", get(lookup_php));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/api/json/v1/1")
}

/// Create a session JWT the way `/auth/session` does.
#[allow(dead_code)]
pub fn create_test_jwt(uid: &str, signing_key: &[u8]) -> String {
    #[derive(Serialize)]
    struct Claims<'a> {
        sub: &'a str,
        exp: usize,
        iat: usize,
    }

    let now = now_secs();
    let claims = Claims {
        sub: uid,
        exp: now + 86400,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .unwrap()
}

/// Create a Firebase-style ID token for `test-project`.
#[allow(dead_code)]
pub fn create_test_id_token(uid: &str, email: Option<&str>) -> String {
    #[derive(Serialize)]
    struct Claims<'a> {
        iss: &'a str,
        aud: &'a str,
        sub: &'a str,
        iat: usize,
        exp: usize,
        email: Option<&'a str>,
        name: &'a str,
        picture: &'a str,
    }

    let now = now_secs();
    let claims = Claims {
        iss: "https://securetoken.google.com/test-project",
        aud: "test-project",
        sub: uid,
        iat: now,
        exp: now + 3600,
        email,
        name: "Test Cook",
        picture: "https://example.com/cook.png",
    };

    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some(ID_TOKEN_KID.to_string());
    encode(&header, &claims, &EncodingKey::from_secret(ID_TOKEN_SECRET)).unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorites API tests against the in-memory store.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use forkfusion::db::Store;
use forkfusion::models::favorite::favorite_document_id;
use tower::ServiceExt;

mod common;

fn authed(method: &str, uri: &str, token: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn corba() -> serde_json::Value {
    serde_json::json!({
        "recipe_name": "Corba",
        "recipe_image": "https://www.themealdb.com/images/media/meals/58oia61564916529.jpg",
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, common::body_json(response).await)
}

#[tokio::test]
async fn test_toggle_twice_round_trips() {
    let (app, state, store) = common::create_test_app();
    let token = common::create_test_jwt("uid-1", &state.config.jwt_signing_key);

    let (status, body) = send(
        &app,
        authed("POST", "/api/favorites/52977/toggle", &token, Some(corba())),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recipe_id"], "52977");
    assert_eq!(body["is_favorite"], true);

    let stored = store.get_favorite("uid-1", "52977").await.unwrap().unwrap();
    assert_eq!(stored.document_id(), favorite_document_id("uid-1", "52977"));
    assert_eq!(stored.recipe_name, "Corba");

    let (status, body) = send(
        &app,
        authed("POST", "/api/favorites/52977/toggle", &token, Some(corba())),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_favorite"], false);
    assert_eq!(store.favorite_count(), 0);
}

#[tokio::test]
async fn test_put_and_delete_are_idempotent() {
    let (app, state, store) = common::create_test_app();
    let token = common::create_test_jwt("uid-1", &state.config.jwt_signing_key);

    for _ in 0..2 {
        let (status, body) = send(
            &app,
            authed("PUT", "/api/favorites/52977", &token, Some(corba())),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_favorite"], true);
    }
    assert_eq!(store.favorite_count(), 1);

    for _ in 0..2 {
        let (status, body) = send(&app, authed("DELETE", "/api/favorites/52977", &token, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_favorite"], false);
    }
    assert_eq!(store.favorite_count(), 0);
}

#[tokio::test]
async fn test_favorites_listing_is_per_user() {
    let (app, state, _) = common::create_test_app();
    let alice = common::create_test_jwt("alice", &state.config.jwt_signing_key);
    let bob = common::create_test_jwt("bob", &state.config.jwt_signing_key);

    let arrabiata = serde_json::json!({
        "recipe_name": "Spicy Arrabiata Penne",
        "recipe_image": "https://example.com/arrabiata.jpg",
    });

    send(&app, authed("PUT", "/api/favorites/52977", &alice, Some(corba()))).await;
    send(&app, authed("PUT", "/api/favorites/52771", &alice, Some(arrabiata))).await;
    send(&app, authed("PUT", "/api/favorites/52977", &bob, Some(corba()))).await;

    let (status, body) = send(&app, authed("GET", "/api/favorites", &alice, None)).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["recipe_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Corba", "Spicy Arrabiata Penne"]);

    let (_, body) = send(&app, authed("GET", "/api/favorites/ids", &alice, None)).await;
    assert_eq!(body, serde_json::json!(["52771", "52977"]));

    let (_, body) = send(&app, authed("GET", "/api/favorites/ids", &bob, None)).await;
    assert_eq!(body, serde_json::json!(["52977"]));
}

#[tokio::test]
async fn test_invalid_recipe_id_rejected() {
    let (app, state, store) = common::create_test_app();
    let token = common::create_test_jwt("uid-1", &state.config.jwt_signing_key);

    for (method, uri) in [
        ("POST", "/api/favorites/abc/toggle"),
        ("PUT", "/api/favorites/12a"),
        ("DELETE", "/api/favorites/..%2Fusers"),
    ] {
        let (status, _) = send(&app, authed(method, uri, &token, Some(corba()))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
    }
    assert_eq!(store.favorite_count(), 0);
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let (app, state, store) = common::create_test_app();
    let token = common::create_test_jwt("uid-1", &state.config.jwt_signing_key);

    let request = Request::builder()
        .method("PUT")
        .uri("/api/favorites/52977")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from("{oops"))
        .unwrap();

    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.favorite_count(), 0);
}

#[tokio::test]
async fn test_missing_details_falls_back_to_lookup() {
    // Without recipe details the handler asks TheMealDB, which is
    // unreachable in tests.
    let (app, state, store) = common::create_test_app();
    let token = common::create_test_jwt("uid-1", &state.config.jwt_signing_key);

    let (status, body) = send(&app, authed("PUT", "/api/favorites/52977", &token, None)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "recipe_api_error");
    assert_eq!(store.favorite_count(), 0);
}

#[tokio::test]
async fn test_toggle_off_without_details_skips_lookup() {
    // TheMealDB is unreachable; removing a favorite must not depend on it.
    let (app, state, store) = common::create_test_app();
    let token = common::create_test_jwt("uid-1", &state.config.jwt_signing_key);

    let (status, _) = send(
        &app,
        authed("PUT", "/api/favorites/52977", &token, Some(corba())),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        authed("POST", "/api/favorites/52977/toggle", &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_favorite"], false);
    assert_eq!(store.favorite_count(), 0);
}

#[tokio::test]
async fn test_me_without_profile_document_uses_session() {
    let (app, state, _) = common::create_test_app();
    let token = common::create_test_jwt("uid-no-profile", &state.config.jwt_signing_key);

    send(&app, authed("PUT", "/api/favorites/52977", &token, Some(corba()))).await;

    let (status, body) = send(&app, authed("GET", "/api/me", &token, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["uid"], "uid-no-profile");
    assert!(body["email"].is_null());
    assert!(body["display_name"].is_null());
    assert_eq!(body["favorites"][0]["recipe_name"], "Corba");
}

#[tokio::test]
async fn test_me_returns_profile_with_favorites() {
    let (app, state, _) = common::create_test_app();

    let (status, _) = send(
        &app,
        authed(
            "GET",
            "/api/me",
            &common::create_test_jwt("firebase-uid-9", &state.config.jwt_signing_key),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let id_token = common::create_test_id_token("firebase-uid-9", Some("nine@example.com"));
    let (status, session) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/auth/session")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::json!({ "id_token": id_token }).to_string(),
            ))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = session["token"].as_str().unwrap().to_string();

    send(&app, authed("PUT", "/api/favorites/52977", &token, Some(corba()))).await;

    let (status, body) = send(&app, authed("GET", "/api/me", &token, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["uid"], "firebase-uid-9");
    assert_eq!(body["email"], "nine@example.com");
    assert_eq!(body["favorites"][0]["recipe_id"], "52977");
}

#[tokio::test]
async fn test_delete_account_removes_everything() {
    let (app, state, store) = common::create_test_app();
    let token = common::create_test_jwt("uid-1", &state.config.jwt_signing_key);
    let other = common::create_test_jwt("uid-2", &state.config.jwt_signing_key);

    send(&app, authed("PUT", "/api/favorites/52977", &token, Some(corba()))).await;
    send(&app, authed("PUT", "/api/favorites/52978", &token, Some(corba()))).await;
    send(&app, authed("PUT", "/api/favorites/52977", &other, Some(corba()))).await;

    let (status, body) = send(&app, authed("DELETE", "/api/account", &token, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["favorites_deleted"], 2);

    assert!(store.list_favorites("uid-1").await.unwrap().is_empty());
    assert_eq!(store.list_favorites("uid-2").await.unwrap().len(), 1);
}

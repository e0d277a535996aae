// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sign-in routes.
//!
//! The client signs in with Google through Firebase Authentication and posts
//! the resulting ID token here. A verified token is exchanged for a session
//! cookie; the profile document is refreshed on every sign-in.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::config::SESSION_COOKIE_NAME;
use crate::error::{AppError, Result};
use crate::middleware::auth::create_jwt;
use crate::models::User;
use crate::services::VerifiedIdentity;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/session", post(create_session))
        .route("/auth/logout", post(logout))
}

#[derive(Deserialize, Validate)]
struct SessionRequest {
    /// Firebase ID token from the client sign-in popup.
    #[validate(length(min = 1, max = 8192))]
    id_token: String,
}

/// Signed-in user as returned to the client.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    /// Same value as the session cookie, for clients that use bearer auth.
    pub token: String,
    pub user: SessionUser,
}

/// Exchange a Firebase ID token for a session.
async fn create_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: std::result::Result<Json<SessionRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let Json(body) = payload.map_err(|e| AppError::SignInRequest(e.body_text()))?;
    body.validate().map_err(|e| AppError::SignInRequest(e.to_string()))?;

    let identity = state.identity.verify_id_token(&body.id_token).await?;
    tracing::info!(uid = %identity.uid, "Firebase sign-in verified");

    // A failed profile write must not block sign-in.
    if let Err(e) = record_sign_in(&state, &identity).await {
        tracing::warn!(uid = %identity.uid, error = %e, "Failed to update user profile");
    }

    let token = create_jwt(&identity.uid, &state.config.jwt_signing_key)?;
    let jar = jar.add(session_cookie(&state, token.clone()));

    Ok((
        jar,
        Json(SessionResponse {
            token,
            user: SessionUser {
                uid: identity.uid,
                email: identity.email,
                display_name: identity.display_name,
                photo_url: identity.photo_url,
            },
        }),
    ))
}

/// Upsert the profile, keeping the original `created_at`.
async fn record_sign_in(state: &AppState, identity: &VerifiedIdentity) -> Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    let created_at = state
        .db
        .get_user(&identity.uid)
        .await?
        .map(|existing| existing.created_at)
        .unwrap_or_else(|| now.clone());

    let user = User {
        uid: identity.uid.clone(),
        email: identity.email.clone(),
        display_name: identity.display_name.clone(),
        photo_url: identity.photo_url.clone(),
        created_at,
        last_active: now,
    };

    state.db.upsert_user(&user).await
}

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.session_cookie_secure)
        .max_age(time::Duration::days(30))
        .build()
}

/// End the session by expiring the cookie.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let removal = Cookie::build(SESSION_COOKIE_NAME)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.session_cookie_secure)
        .build();

    (jar.remove(removal), StatusCode::NO_CONTENT)
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! ForkFusion API Server
//!
//! Serves recipe browsing over TheMealDB and per-account favorites for
//! users signed in with Firebase Authentication.

use forkfusion::{
    config::Config,
    db::{FirestoreDb, Store},
    services::{IdentityVerifier, MealDbClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting ForkFusion API");

    let db: Arc<dyn Store> = Arc::new(FirestoreDb::new(&config.gcp_project_id).await?);

    let mealdb = MealDbClient::new(&config.mealdb_base_url)?;
    tracing::info!(base_url = %config.mealdb_base_url, "TheMealDB client initialized");

    let identity = Arc::new(IdentityVerifier::new(&config)?);

    let port = config.port;
    let state = Arc::new(AppState::new(config, db, mealdb, identity));

    let app = forkfusion::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("forkfusion=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();

    Ok(())
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! ForkFusion: browse recipes and keep favorites
//!
//! This crate provides the backend API behind the ForkFusion web client:
//! recipe browsing over TheMealDB, sign-in with Firebase Authentication,
//! and per-account favorites stored in Firestore.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Store;
use services::{FavoritesService, IdentityVerifier, MealDbClient};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Arc<dyn Store>,
    pub favorites: FavoritesService,
    pub mealdb: MealDbClient,
    pub identity: Arc<IdentityVerifier>,
}

impl AppState {
    pub fn new(
        config: Config,
        db: Arc<dyn Store>,
        mealdb: MealDbClient,
        identity: Arc<IdentityVerifier>,
    ) -> Self {
        Self {
            config,
            favorites: FavoritesService::new(db.clone()),
            db,
            mealdb,
            identity,
        }
    }
}

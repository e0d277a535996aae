// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod favorites;
pub mod identity;
pub mod mealdb;

pub use favorites::{FavoritesService, RecipeRef};
pub use identity::{IdentityError, IdentityVerifier, VerifiedIdentity};
pub use mealdb::MealDbClient;

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod category;
pub mod favorite;
pub mod pagination;
pub mod recipe;
pub mod user;

pub use category::Category;
pub use favorite::Favorite;
pub use pagination::{paginate, Page, PAGE_SIZE};
pub use recipe::{Ingredient, MealSummary, RecipeRecord};
pub use user::User;

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! TheMealDB meal category.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Meal category from `categories.php`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Category {
    #[serde(rename(deserialize = "idCategory"))]
    pub id: String,
    #[serde(rename(deserialize = "strCategory"))]
    pub name: String,
    #[serde(rename(deserialize = "strCategoryThumb"), default)]
    pub thumbnail: Option<String>,
    #[serde(rename(deserialize = "strCategoryDescription"), default)]
    pub description: Option<String>,
}

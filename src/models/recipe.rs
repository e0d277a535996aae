// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! TheMealDB recipe records and the views derived from them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const INGREDIENT_PREFIX: &str = "strIngredient";
const MEASURE_PREFIX: &str = "strMeasure";
const INGREDIENT_IMAGE_BASE: &str = "https://www.themealdb.com/images/ingredients";

/// Meal as returned by the list endpoints (filter/search).
///
/// `filter.php` omits the category, `search.php` includes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealSummary {
    #[serde(rename(deserialize = "idMeal"))]
    pub id: String,
    #[serde(rename(deserialize = "strMeal"))]
    pub name: String,
    #[serde(rename(deserialize = "strMealThumb"), default)]
    pub thumbnail: Option<String>,
    #[serde(rename(deserialize = "strCategory"), default)]
    pub category: Option<String>,
}

/// Full recipe record from `lookup.php` / `search.php`.
///
/// Ingredient and measure fields are sparse and positional
/// (`strIngredient1` .. `strIngredient20`), so they stay in `fields`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeRecord {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "strTags", default)]
    pub tags: Option<String>,
    #[serde(rename = "strYoutube", default)]
    pub youtube: Option<String>,
    #[serde(rename = "strSource", default)]
    pub source: Option<String>,
    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
}

/// One line of a recipe's ingredient list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Ingredient {
    pub measure: String,
    pub ingredient: String,
    pub image_url: String,
}

impl RecipeRecord {
    fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_str())
    }

    /// Ingredient/measure pairs in positional order, skipping empty slots.
    pub fn ingredients(&self) -> Vec<Ingredient> {
        let mut numbered: Vec<(u32, &str)> = self
            .fields
            .iter()
            .filter_map(|(key, value)| {
                let position = key.strip_prefix(INGREDIENT_PREFIX)?.parse::<u32>().ok()?;
                let name = value.as_str()?.trim();
                (!name.is_empty()).then_some((position, name))
            })
            .collect();

        numbered.sort_unstable_by_key(|(position, _)| *position);

        numbered
            .into_iter()
            .map(|(position, name)| Ingredient {
                measure: self
                    .field(&format!("{MEASURE_PREFIX}{position}"))
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                ingredient: name.to_string(),
                image_url: ingredient_image_url(name),
            })
            .collect()
    }

    /// Comma-separated `strTags`, trimmed.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect()
    }

    /// Instruction text broken into steps.
    pub fn instruction_steps(&self) -> Vec<String> {
        split_instructions(self.instructions.as_deref().unwrap_or_default())
    }

    /// Reduce to the list-card shape.
    pub fn summary(&self) -> MealSummary {
        MealSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            thumbnail: self.thumbnail.clone(),
            category: self.category.clone(),
        }
    }
}

/// Thumbnail URL TheMealDB serves for an ingredient name.
pub fn ingredient_image_url(name: &str) -> String {
    format!(
        "{}/{}-Small.png",
        INGREDIENT_IMAGE_BASE,
        urlencoding::encode(name)
    )
}

/// Split free-text instructions into steps.
///
/// A step ends at a line break or at a period followed by whitespace or the
/// end of the text. Periods inside a token (`2.5`, `180.C`) do not split.
/// Abbreviations such as `approx. 5 min` still split.
pub fn split_instructions(text: &str) -> Vec<String> {
    let mut steps = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' | '\n' => flush_step(&mut current, &mut steps),
            '.' if chars.peek().map_or(true, |next| next.is_whitespace()) => {
                flush_step(&mut current, &mut steps)
            }
            _ => current.push(c),
        }
    }
    flush_step(&mut current, &mut steps);

    steps
}

fn flush_step(current: &mut String, steps: &mut Vec<String>) {
    let step = current.trim().trim_end_matches('.').trim_end();
    if !step.is_empty() {
        steps.push(step.to_string());
    }
    current.clear();
}

/// Recipe ids are numeric in TheMealDB; anything else is rejected before it
/// reaches a URL or a document path.
pub fn is_valid_recipe_id(id: &str) -> bool {
    !id.is_empty() && id.len() <= 16 && id.bytes().all(|b| b.is_ascii_digit())
}

//! Structured-data (JSON-LD / schema.org Recipe) extraction.
//!
//! Pages are scanned with a regex for `application/ld+json` script
//! blocks to avoid full DOM parsing; every block is parsed
//! independently and a block that fails to parse is skipped. When a
//! page carries several Recipe entries, the most complete one wins.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::ingredient::split_ingredient_line;
use crate::merge::dedup_preserving_order;
use crate::time::parse_minutes;
use crate::title::clean_title;
use crate::types::{ExtractedRecipe, Ingredient, DEFAULT_SERVINGS, DEFAULT_WEIGHT_UNIT};

/// Regex to find JSON-LD script tags (case-insensitive for type attribute)
static JSONLD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("Invalid JSON-LD regex")
});

static FIRST_INTEGER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Invalid integer regex"));

/// Extract the most complete Recipe from a page's JSON-LD blocks.
///
/// Candidates are ranked by `100 × ingredient count + instructions
/// length`; ties keep the first one discovered. Returns `None` when no
/// block anywhere on the page carries a Recipe entry.
pub fn extract_structured_data(html: &str) -> Option<ExtractedRecipe> {
    let mut best: Option<(u64, ExtractedRecipe)> = None;

    for cap in JSONLD_REGEX.captures_iter(html) {
        let Some(json_text) = cap.get(1) else { continue };

        let sanitized = sanitize_json(json_text.as_str());
        let json: Value = match serde_json::from_str(&sanitized) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unparseable JSON-LD block");
                continue;
            }
        };

        for candidate in recipe_candidates(&json) {
            let recipe = extract_recipe_fields(candidate);
            let score = completeness_score(&recipe);
            if best.as_ref().map(|(s, _)| score > *s).unwrap_or(true) {
                best = Some((score, recipe));
            }
        }
    }

    best.map(|(_, recipe)| recipe)
}

fn completeness_score(recipe: &ExtractedRecipe) -> u64 {
    100 * recipe.ingredients.len() as u64
        + recipe.instructions.as_deref().map(str::len).unwrap_or(0) as u64
}

/// Sanitize JSON-LD content to handle common malformed patterns.
/// Some sites include literal newlines/tabs inside JSON strings instead
/// of escaped versions.
fn sanitize_json(json: &str) -> String {
    let mut result = String::with_capacity(json.len());
    let mut in_string = false;
    let mut prev_char = '\0';

    for c in json.chars() {
        if c == '"' && prev_char != '\\' {
            in_string = !in_string;
            result.push(c);
        } else if in_string {
            match c {
                '\n' => result.push_str("\\n"),
                '\r' => result.push_str("\\r"),
                '\t' => result.push_str("\\t"),
                c if c.is_control() => {}
                _ => result.push(c),
            }
        } else {
            result.push(c);
        }
        prev_char = c;
    }

    result
}

/// Recipe-typed entries at the top level, inside a top-level array, or
/// one level inside an `@graph` collection.
fn recipe_candidates(json: &Value) -> Vec<&Value> {
    let mut found = Vec::new();
    match json {
        Value::Object(_) => collect_candidates(json, &mut found),
        Value::Array(items) => {
            for item in items {
                collect_candidates(item, &mut found);
            }
        }
        _ => {}
    }
    found
}

fn collect_candidates<'a>(value: &'a Value, found: &mut Vec<&'a Value>) {
    if is_recipe(value) {
        found.push(value);
        return;
    }
    if let Some(graph) = value.get("@graph").and_then(Value::as_array) {
        for entry in graph {
            if is_recipe(entry) {
                found.push(entry);
            }
        }
    }
}

fn is_recipe(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(s)) => s == "Recipe",
        Some(Value::Array(types)) => types.iter().any(|t| t == "Recipe"),
        _ => false,
    }
}

fn extract_recipe_fields(recipe: &Value) -> ExtractedRecipe {
    let (calories_per_unit, weight_unit) = extract_nutrition(recipe.get("nutrition"));

    ExtractedRecipe {
        title: recipe
            .get("name")
            .and_then(Value::as_str)
            .map(clean_title),
        images: extract_images(recipe),
        ingredients: extract_ingredients(recipe),
        instructions: extract_instructions(recipe.get("recipeInstructions")),
        prep_time: parse_minutes(field_string(recipe, "prepTime").as_deref()),
        cook_time: parse_minutes(field_string(recipe, "cookTime").as_deref()),
        // no schema.org field carries a resting time
        rest_time: 0,
        total_time: parse_minutes(field_string(recipe, "totalTime").as_deref()),
        servings: extract_servings(recipe.get("recipeYield")),
        calories_per_unit,
        weight_unit,
        categories: extract_categories(recipe.get("recipeCategory")),
    }
}

fn field_string(recipe: &Value, key: &str) -> Option<String> {
    match recipe.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn extract_ingredients(recipe: &Value) -> Vec<Ingredient> {
    let Some(lines) = recipe.get("recipeIngredient").and_then(Value::as_array) else {
        return Vec::new();
    };
    lines
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(split_ingredient_line)
        .collect()
}

/// Extract instructions from the recipeInstructions field.
///
/// Three shapes are supported: a single string (used verbatim), an
/// array of plain strings, and an array of HowToStep/HowToSection
/// objects (sections are flattened recursively). List shapes are
/// numbered sequentially and joined with blank lines.
fn extract_instructions(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        Value::Array(items) => {
            let mut steps = Vec::new();
            for item in items {
                flatten_instruction(item, &mut steps);
            }
            if steps.is_empty() {
                None
            } else {
                Some(
                    steps
                        .iter()
                        .enumerate()
                        .map(|(i, step)| format!("{}. {}", i + 1, step))
                        .collect::<Vec<_>>()
                        .join("\n\n"),
                )
            }
        }
        _ => None,
    }
}

/// A step may be a plain string, a HowToStep (text or name field), or a
/// HowToSection whose itemListElement nests further steps.
fn flatten_instruction(item: &Value, steps: &mut Vec<String>) {
    if let Some(s) = item.as_str() {
        let s = s.trim();
        if !s.is_empty() {
            steps.push(s.to_string());
        }
        return;
    }
    if let Some(section) = item.get("itemListElement").and_then(Value::as_array) {
        for nested in section {
            flatten_instruction(nested, steps);
        }
        return;
    }
    let text = item
        .get("text")
        .and_then(Value::as_str)
        .or_else(|| item.get("name").and_then(Value::as_str));
    if let Some(text) = text {
        let text = text.trim();
        if !text.is_empty() {
            steps.push(text.to_string());
        }
    }
}

fn extract_servings(value: Option<&Value>) -> u32 {
    let text = match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Array(items)) => items.first().and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }),
        _ => None,
    };
    text.and_then(|s| first_integer(&s)).unwrap_or(DEFAULT_SERVINGS)
}

fn first_integer(text: &str) -> Option<u32> {
    FIRST_INTEGER_REGEX
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

/// Extract image URLs from the recipe, including thumbnails.
fn extract_images(recipe: &Value) -> Vec<String> {
    let mut urls = Vec::new();
    if let Some(image) = recipe.get("image") {
        collect_image_urls(image, &mut urls);
    }
    if let Some(thumbnail) = recipe.get("thumbnailUrl") {
        collect_image_urls(thumbnail, &mut urls);
    }
    dedup_preserving_order(urls)
}

/// An image may be a bare URL string, an object carrying url/contentUrl,
/// a node reference (@id), or an array of any of those.
fn collect_image_urls(value: &Value, urls: &mut Vec<String>) {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if !s.is_empty() {
                urls.push(s.to_string());
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_image_urls(item, urls);
            }
        }
        Value::Object(obj) => {
            let url = obj
                .get("url")
                .or_else(|| obj.get("contentUrl"))
                .or_else(|| obj.get("@id"))
                .and_then(Value::as_str);
            if let Some(url) = url {
                let url = url.trim();
                if !url.is_empty() {
                    urls.push(url.to_string());
                }
            }
        }
        _ => {}
    }
}

fn extract_nutrition(value: Option<&Value>) -> (u32, String) {
    let Some(nutrition) = value else {
        return (0, DEFAULT_WEIGHT_UNIT.to_string());
    };
    let calories = match nutrition.get("calories") {
        Some(Value::String(s)) => first_integer(s).unwrap_or(0),
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
        _ => 0,
    };
    let weight_unit = nutrition
        .get("servingSize")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_WEIGHT_UNIT.to_string());
    (calories, weight_unit)
}

fn extract_categories(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

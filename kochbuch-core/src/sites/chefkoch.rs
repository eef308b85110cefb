//! chefkoch.de extraction.
//!
//! Chefkoch ships a JSON-LD Recipe, but the ingredient amounts live in a
//! two-column table the JSON-LD flattens away, the preparation text is a
//! free-form block, and most gallery URLs only appear in inline JSON
//! with escaped slashes. Everything here supplements the structured
//! data through the merge policy.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::{first_heading, fragment_to_text, SiteExtractor};
use crate::ingredient::split_ingredient_line;
use crate::merge::dedup_preserving_order;
use crate::title::clean_title;
use crate::types::{Ingredient, SiteRecipe};

static IMG_SRC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<img[^>]*\b(?:data-src|src)\s*=\s*["']([^"']+)["']"#)
        .expect("Invalid img src regex")
});

/// Gallery URLs inside inline JSON, slashes escaped ("https:\/\/...").
/// The escape is required so plain attribute values stay with the img
/// pass and its small-variant filter.
static ESCAPED_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(https?:\\/\\/[^"\s]*chefkoch[^"\s]*?\.(?:jpe?g|png|webp))""#)
        .expect("Invalid escaped URL regex")
});

static SRCSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\bsrcset\s*=\s*["']([^"']+)["']"#).expect("Invalid srcset regex")
});

pub struct Chefkoch;

impl SiteExtractor for Chefkoch {
    fn matches(&self, host: &str) -> bool {
        host.contains("chefkoch")
    }

    fn extract(&self, html: &str) -> SiteRecipe {
        let document = Html::parse_document(html);
        SiteRecipe {
            title: first_heading(html).map(|t| clean_title(&t)),
            images: extract_images(html),
            ingredients: extract_ingredients(&document),
            instructions: extract_instructions(&document),
        }
    }
}

/// Ingredients from the two-column table (amount cell, name cell) plus
/// list items carrying an "ingredient" class on older templates. Both
/// passes contribute; nothing is deduplicated.
fn extract_ingredients(document: &Html) -> Vec<Ingredient> {
    let mut ingredients = table_ingredients(document);
    ingredients.extend(list_ingredients(document));
    ingredients
}

fn table_ingredients(document: &Html) -> Vec<Ingredient> {
    let row_selector = Selector::parse("table.ingredients tr").expect("Invalid selector");
    let cell_selector = Selector::parse("td").expect("Invalid selector");

    let mut out = Vec::new();
    for row in document.select(&row_selector) {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|cell| normalize_whitespace(&cell.text().collect::<String>()))
            .collect();
        // header rows use <th> cells and collect no <td>s
        if cells.len() != 2 {
            continue;
        }
        let (amount, name) = (cells[0].as_str(), cells[1].as_str());
        if name.is_empty() || is_header_text(amount) || is_header_text(name) {
            continue;
        }
        out.push(Ingredient {
            name: name.to_string(),
            amount: amount.to_string(),
        });
    }
    out
}

fn list_ingredients(document: &Html) -> Vec<Ingredient> {
    let selector = Selector::parse(r#"li[class*="ingredient"]"#).expect("Invalid selector");
    document
        .select(&selector)
        .map(|el| split_ingredient_line(&normalize_whitespace(&el.text().collect::<String>())))
        .filter(|ingredient| !ingredient.name.is_empty())
        .collect()
}

fn is_header_text(text: &str) -> bool {
    matches!(
        text.to_lowercase().as_str(),
        "menge" | "zutat" | "zutaten"
    )
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First block whose class marks it as the preparation text. Converted
/// from inner HTML manually because the line breaks inside the block are
/// meaningful (steps are separated by br pairs, not markup).
fn extract_instructions(document: &Html) -> Option<String> {
    let selector = Selector::parse(
        r#"div[class*="zubereitung"], div[class*="preparation"], div[class*="instructions"]"#,
    )
    .expect("Invalid selector");
    let block = document.select(&selector).next()?;
    let text = fragment_to_text(&block.inner_html());
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Gallery images from three passes: img tags (src or data-src) that
/// point at the recipe CDN and aren't scaled-down variants, escaped
/// URLs in inline JSON, and srcset candidates.
fn extract_images(html: &str) -> Vec<String> {
    let mut urls = Vec::new();

    for cap in IMG_SRC_REGEX.captures_iter(html) {
        if let Some(url) = cap.get(1) {
            let url = url.as_str();
            if is_content_image(url) && !is_small_variant(url) {
                urls.push(url.to_string());
            }
        }
    }

    for cap in ESCAPED_URL_REGEX.captures_iter(html) {
        if let Some(url) = cap.get(1) {
            let url = url.as_str().replace("\\/", "/");
            if is_content_image(&url) {
                urls.push(url);
            }
        }
    }

    for cap in SRCSET_REGEX.captures_iter(html) {
        let Some(srcset) = cap.get(1) else { continue };
        for candidate in srcset.as_str().split(',') {
            let Some(url) = candidate.split_whitespace().next() else {
                continue;
            };
            if is_content_image(url) {
                urls.push(url.to_string());
            }
        }
    }

    dedup_preserving_order(urls)
}

fn is_content_image(url: &str) -> bool {
    url.contains("chefkoch-cdn") || url.contains("img.chefkoch")
}

fn is_small_variant(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.contains("thumb") || lower.contains("-klein") || lower.contains("crop-klein")
}

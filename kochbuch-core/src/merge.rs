//! Combining structured-data and site-extractor results.

use std::collections::HashSet;

use crate::types::{ExtractedRecipe, SiteRecipe};

/// Exact-string deduplication, preserving first-seen order.
pub fn dedup_preserving_order(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter().filter(|url| seen.insert(url.clone())).collect()
}

/// Merge structured-data and HTML-extractor output for a known site
/// family.
///
/// Structured data wins on every field except images, which are unioned
/// with the structured-data entries first: the JSON-LD text fields are
/// the more reliable source, but portals keep most of their galleries
/// out of the JSON-LD.
pub fn merge_site_data(
    structured: Option<ExtractedRecipe>,
    site: Option<SiteRecipe>,
) -> Option<ExtractedRecipe> {
    match (structured, site) {
        (None, None) => None,
        (Some(structured), None) => Some(structured),
        (None, Some(site)) => Some(ExtractedRecipe {
            title: site.title,
            images: dedup_preserving_order(site.images),
            ingredients: site.ingredients,
            instructions: site.instructions,
            ..ExtractedRecipe::default()
        }),
        (Some(mut merged), Some(site)) => {
            merged.images.extend(site.images);
            merged.images = dedup_preserving_order(std::mem::take(&mut merged.images));
            if !has_text(&merged.title) && site.title.is_some() {
                merged.title = site.title;
            }
            if !has_text(&merged.instructions) && site.instructions.is_some() {
                merged.instructions = site.instructions;
            }
            if merged.ingredients.is_empty() {
                merged.ingredients = site.ingredients;
            }
            Some(merged)
        }
    }
}

fn has_text(field: &Option<String>) -> bool {
    field.as_deref().map(|t| !t.trim().is_empty()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Ingredient;

    fn ingredient(amount: &str, name: &str) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            amount: amount.to_string(),
        }
    }

    #[test]
    fn test_dedup_is_order_preserving_and_idempotent() {
        let first = vec!["a".to_string(), "b".to_string()];
        let second = vec!["b".to_string(), "c".to_string(), "a".to_string()];

        let mut once = first.clone();
        once.extend(second.clone());
        let once = dedup_preserving_order(once);
        assert_eq!(once, vec!["a", "b", "c"]);

        let mut twice = once.clone();
        twice.extend(second);
        assert_eq!(dedup_preserving_order(twice), once);
    }

    #[test]
    fn test_structured_ingredients_win_when_non_empty() {
        let structured = ExtractedRecipe {
            title: Some("Gulasch".to_string()),
            ingredients: vec![ingredient("500 g", "Rindfleisch")],
            ..ExtractedRecipe::default()
        };
        let site = SiteRecipe {
            ingredients: vec![ingredient("1 kg", "irgendwas"), ingredient("", "anderes")],
            ..SiteRecipe::default()
        };

        let merged = merge_site_data(Some(structured.clone()), Some(site)).unwrap();
        assert_eq!(merged.ingredients, structured.ingredients);
    }

    #[test]
    fn test_site_ingredients_fill_empty_structured_list() {
        let structured = ExtractedRecipe {
            title: Some("Gulasch".to_string()),
            ..ExtractedRecipe::default()
        };
        let site = SiteRecipe {
            ingredients: vec![ingredient("500 g", "Rindfleisch")],
            ..SiteRecipe::default()
        };

        let merged = merge_site_data(Some(structured), Some(site)).unwrap();
        assert_eq!(merged.ingredients, vec![ingredient("500 g", "Rindfleisch")]);
    }

    #[test]
    fn test_images_are_unioned_structured_first() {
        let structured = ExtractedRecipe {
            title: Some("Gulasch".to_string()),
            images: vec!["a.jpg".to_string(), "b.jpg".to_string()],
            ..ExtractedRecipe::default()
        };
        let site = SiteRecipe {
            images: vec!["b.jpg".to_string(), "c.jpg".to_string()],
            ..SiteRecipe::default()
        };

        let merged = merge_site_data(Some(structured), Some(site)).unwrap();
        assert_eq!(merged.images, vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn test_empty_structured_title_falls_back_to_site() {
        let structured = ExtractedRecipe {
            title: Some(String::new()),
            ..ExtractedRecipe::default()
        };
        let site = SiteRecipe {
            title: Some("Gulasch".to_string()),
            ..SiteRecipe::default()
        };

        let merged = merge_site_data(Some(structured), Some(site)).unwrap();
        assert_eq!(merged.title.as_deref(), Some("Gulasch"));
    }

    #[test]
    fn test_site_only_result_gets_defaults() {
        let site = SiteRecipe {
            title: Some("Gulasch".to_string()),
            instructions: Some("Anbraten.".to_string()),
            ..SiteRecipe::default()
        };

        let merged = merge_site_data(None, Some(site)).unwrap();
        assert_eq!(merged.title.as_deref(), Some("Gulasch"));
        assert_eq!(merged.servings, 4);
        assert_eq!(merged.weight_unit, "100g");
        assert_eq!(merged.prep_time, 0);
    }

    #[test]
    fn test_nothing_found_is_none() {
        assert!(merge_site_data(None, None).is_none());
    }
}

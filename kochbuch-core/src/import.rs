//! The import orchestrator: one URL in, one normalized recipe out.
//!
//! Linear pipeline, no retries: URL validation and the page fetch fail
//! the import with a typed error; everything past that point degrades
//! to partial data instead of aborting.

use url::Url;

use crate::error::ImportError;
use crate::extract::extract_structured_data;
use crate::http::HttpClient;
use crate::image::{acquire_images, MAX_IMAGES_PER_IMPORT};
use crate::merge::merge_site_data;
use crate::sites::find_extractor;
use crate::title::clean_title;
use crate::types::{ExtractedRecipe, ImportedRecipe};

/// Title used when a page yields a recipe with no usable name.
pub const FALLBACK_TITLE: &str = "Importiertes Rezept";

/// Import a recipe from a URL.
pub async fn import_from_url<C: HttpClient>(
    client: &C,
    url: &str,
) -> Result<ImportedRecipe, ImportError> {
    let parsed = Url::parse(url).map_err(|e| ImportError::InvalidUrl(e.to_string()))?;

    let html = client.fetch_html(url).await?;

    let structured = extract_structured_data(&html);

    let combined = match parsed.host_str().and_then(find_extractor) {
        Some(extractor) => {
            tracing::debug!(host = parsed.host_str().unwrap_or(""), "running site extractor");
            merge_site_data(structured, Some(extractor.extract(&html)))
        }
        None => structured,
    };

    let recipe = combined.ok_or(ImportError::NoRecipeFound)?;
    if recipe.title.is_none() {
        return Err(ImportError::NoRecipeFound);
    }

    let images = acquire_images(client, &recipe.images, MAX_IMAGES_PER_IMPORT).await;

    Ok(assemble(recipe, images, url))
}

/// Apply final defaults and shape the response record.
fn assemble(recipe: ExtractedRecipe, images: Vec<String>, source_url: &str) -> ImportedRecipe {
    let title = recipe
        .title
        .map(|t| clean_title(&t))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string());

    let total_time = if recipe.total_time == 0 && recipe.prep_time + recipe.cook_time > 0 {
        recipe.prep_time + recipe.cook_time
    } else {
        recipe.total_time
    };

    ImportedRecipe {
        title,
        images,
        ingredients: recipe.ingredients,
        instructions: recipe.instructions.unwrap_or_default(),
        prep_time: recipe.prep_time,
        rest_time: recipe.rest_time,
        cook_time: recipe.cook_time,
        total_time,
        servings: recipe.servings,
        calories_per_unit: recipe.calories_per_unit,
        weight_unit: recipe.weight_unit,
        categories: recipe.categories,
        source_url: source_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_derives_total_time() {
        let recipe = ExtractedRecipe {
            title: Some("Brot".to_string()),
            prep_time: 10,
            cook_time: 20,
            ..ExtractedRecipe::default()
        };
        let assembled = assemble(recipe, Vec::new(), "https://example.com/brot");
        assert_eq!(assembled.total_time, 30);
    }

    #[test]
    fn test_assemble_keeps_declared_total_time() {
        let recipe = ExtractedRecipe {
            title: Some("Brot".to_string()),
            prep_time: 10,
            cook_time: 20,
            total_time: 45,
            ..ExtractedRecipe::default()
        };
        let assembled = assemble(recipe, Vec::new(), "https://example.com/brot");
        assert_eq!(assembled.total_time, 45);
    }

    #[test]
    fn test_assemble_falls_back_to_placeholder_title() {
        let recipe = ExtractedRecipe {
            title: Some("   ".to_string()),
            ..ExtractedRecipe::default()
        };
        let assembled = assemble(recipe, Vec::new(), "https://example.com/x");
        assert_eq!(assembled.title, FALLBACK_TITLE);
    }
}

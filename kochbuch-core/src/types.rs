use serde::{Deserialize, Serialize};

/// Servings to assume when a page doesn't say.
pub const DEFAULT_SERVINGS: u32 = 4;

/// Reference amount for the calorie count when the page doesn't declare one.
pub const DEFAULT_WEIGHT_UNIT: &str = "100g";

/// One ingredient line, split into an amount phrase and a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Quantity plus unit as found on the page ("500 g", "1 Prise").
    /// Empty when the line couldn't be split.
    pub amount: String,
}

/// Recipe data recovered from a page, before final defaults are applied.
/// Lives only for the duration of one import request.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRecipe {
    pub title: Option<String>,
    /// Image URLs in discovery order, exact-string deduplicated.
    pub images: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Option<String>,
    pub prep_time: u32,
    pub cook_time: u32,
    pub rest_time: u32,
    pub total_time: u32,
    pub servings: u32,
    pub calories_per_unit: u32,
    pub weight_unit: String,
    pub categories: Vec<String>,
}

impl Default for ExtractedRecipe {
    fn default() -> Self {
        Self {
            title: None,
            images: Vec::new(),
            ingredients: Vec::new(),
            instructions: None,
            prep_time: 0,
            cook_time: 0,
            rest_time: 0,
            total_time: 0,
            servings: DEFAULT_SERVINGS,
            calories_per_unit: 0,
            weight_unit: DEFAULT_WEIGHT_UNIT.to_string(),
            categories: Vec::new(),
        }
    }
}

/// Best-effort partial result from a site-specific HTML extractor.
/// `None` / empty means "not found", so the merge policy can fall back
/// to structured data per field.
#[derive(Debug, Clone, Default)]
pub struct SiteRecipe {
    pub title: Option<String>,
    pub images: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Option<String>,
}

/// The finished import result handed back to the caller. Every field is
/// populated, and `images` holds embedded data URIs rather than the
/// remote URLs they were fetched from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedRecipe {
    pub title: String,
    pub images: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
    pub prep_time: u32,
    pub rest_time: u32,
    pub cook_time: u32,
    pub total_time: u32,
    pub servings: u32,
    pub calories_per_unit: u32,
    pub weight_unit: String,
    pub categories: Vec<String>,
    pub source_url: String,
}

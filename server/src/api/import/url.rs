use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use kochbuch_core::{import_from_url, ImportError, ImportedRecipe, Ingredient};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::ErrorResponse;
use crate::AppState;

/// Request body for importing a recipe from a URL
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ImportUrlRequest {
    /// Recipe page URL to import from
    pub url: String,
}

/// The imported recipe (mirrors kochbuch_core::ImportedRecipe)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportedRecipeResponse {
    pub title: String,
    /// Embedded data URIs, not remote URLs
    pub images: Vec<String>,
    pub ingredients: Vec<IngredientResponse>,
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

/// One ingredient line (mirrors kochbuch_core::Ingredient)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientResponse {
    pub name: String,
    /// Quantity plus unit as found on the page; empty when unparseable
    pub amount: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            name: ingredient.name,
            amount: ingredient.amount,
        }
    }
}

impl From<ImportedRecipe> for ImportedRecipeResponse {
    fn from(recipe: ImportedRecipe) -> Self {
        Self {
            title: recipe.title,
            images: recipe.images,
            ingredients: recipe.ingredients.into_iter().map(Into::into).collect(),
            instructions: recipe.instructions,
            prep_time: recipe.prep_time,
            rest_time: recipe.rest_time,
            cook_time: recipe.cook_time,
            total_time: recipe.total_time,
            servings: recipe.servings,
            calories_per_unit: recipe.calories_per_unit,
            weight_unit: recipe.weight_unit,
            categories: recipe.categories,
            source_url: recipe.source_url,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/import/url",
    tag = "import",
    request_body = ImportUrlRequest,
    responses(
        (status = 200, description = "Recipe imported", body = ImportedRecipeResponse),
        (status = 400, description = "Invalid URL or page not reachable", body = ErrorResponse),
        (status = 422, description = "No recipe found on page", body = ErrorResponse)
    )
)]
pub async fn import_url(
    State(client): State<AppState>,
    Json(request): Json<ImportUrlRequest>,
) -> impl IntoResponse {
    match import_from_url(client.as_ref(), &request.url).await {
        Ok(recipe) => {
            tracing::info!(url = %request.url, title = %recipe.title, "recipe imported");
            (StatusCode::OK, Json(ImportedRecipeResponse::from(recipe))).into_response()
        }
        Err(e @ ImportError::InvalidUrl(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e @ ImportError::Fetch(_)) => {
            tracing::warn!(url = %request.url, error = %e, "page fetch failed");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
        Err(e @ ImportError::NoRecipeFound) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

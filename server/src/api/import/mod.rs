pub mod url;

use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

use crate::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(url::import_url),
    components(schemas(
        url::ImportUrlRequest,
        url::ImportedRecipeResponse,
        url::IngredientResponse
    ))
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/url", post(url::import_url))
}

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use crate::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::error::ApiError;
use crate::models::RecipePayload;

pub const PATH: &str = "/api/recipes";

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
}

/// A non-integer id can't name any recipe, so it is reported as not found.
pub(crate) fn recipe_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    path.map(|Path(id)| id).map_err(|_| ApiError::NotFound)
}

/// Body extraction failures become 400s rather than axum's default 422,
/// except a non-JSON content type, which stays 415.
pub(crate) fn recipe_payload(
    body: Result<Json<RecipePayload>, JsonRejection>,
) -> Result<RecipePayload, ApiError> {
    body.map(|Json(payload)| payload)
        .map_err(|rejection| match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::UnsupportedMediaType(rejection.body_text())
            }
            _ => ApiError::InvalidBody(rejection.body_text()),
        })
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        get::get_recipe,
        create::create_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(crate::models::Recipe, RecipePayload))
)]
pub struct ApiDoc;

use super::{recipe_id, recipe_payload};
use crate::api::ErrorResponse;
use crate::error::ApiError;
use crate::models::RecipePayload;
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID; must equal the body's id")
    ),
    request_body = RecipePayload,
    responses(
        (status = 204, description = "Recipe replaced"),
        (status = 400, description = "ID mismatch or invalid request", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(store): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<RecipePayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = recipe_id(id)?;
    let payload = recipe_payload(body)?;

    if payload.id != Some(id) {
        return Err(ApiError::IdMismatch);
    }

    let recipe = payload.validate().map_err(ApiError::Validation)?;

    if !store.exists(id).await? {
        return Err(ApiError::NotFound);
    }

    // Still NotFound if a concurrent delete won the race since the check
    store.update(id, recipe).await?;
    tracing::info!(id, "recipe updated");

    Ok(StatusCode::NO_CONTENT)
}

use super::{recipe_payload, PATH};
use crate::api::ErrorResponse;
use crate::error::ApiError;
use crate::models::{Recipe, RecipePayload};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = RecipePayload,
    responses(
        (status = 201, description = "Recipe created; Location points at the new recipe", body = Recipe),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(store): State<AppState>,
    body: Result<Json<RecipePayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // Any client-supplied id is dropped here; the store assigns one
    let recipe = recipe_payload(body)?
        .validate()
        .map_err(ApiError::Validation)?;

    let created: Recipe = store.create(recipe).await?;
    tracing::info!(id = created.id, "recipe created");

    let location = format!("{}/{}", PATH, created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

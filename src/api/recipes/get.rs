use super::recipe_id;
use crate::api::ErrorResponse;
use crate::error::ApiError;
use crate::models::Recipe;
use crate::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = Recipe),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(store): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Recipe>, ApiError> {
    let id = recipe_id(id)?;

    match store.get(id).await? {
        Some(recipe) => Ok(Json(recipe)),
        None => Err(ApiError::NotFound),
    }
}

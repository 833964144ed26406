use crate::error::ApiError;
use crate::models::Recipe;
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRecipesParams {
    /// Keep only recipes whose dietary tags contain this text
    /// (case-sensitive substring, e.g. "vegan")
    pub tag: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "All recipes, optionally filtered by dietary tag", body = Vec<Recipe>)
    )
)]
pub async fn list_recipes(
    State(store): State<AppState>,
    params: Result<Query<ListRecipesParams>, QueryRejection>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    // An unparseable query string is treated the same as no filter
    let params = params.map(|Query(p)| p).unwrap_or_default();

    let recipes = store.list(params.tag.as_deref()).await?;
    Ok(Json(recipes))
}

use axum::{
    Json,
    extract::{Path, Query, State},
};
use foodgram_recipe::IngredientRow;
use serde::Deserialize;

use super::AppState;
use crate::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct IngredientQuery {
    pub name: Option<String>,
}

pub async fn get_ingredients(
    State(state): State<AppState>,
    Query(query): Query<IngredientQuery>,
) -> ApiResult<Json<Vec<IngredientRow>>> {
    let ingredients =
        foodgram_recipe::list_ingredients(&state.pool, query.name.as_deref()).await?;

    Ok(Json(ingredients))
}

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<IngredientRow>> {
    let ingredient = foodgram_recipe::get_ingredient(&state.pool, id)
        .await?
        .ok_or_else(|| foodgram_shared::Error::NotFound("Not found.".to_string()))?;

    Ok(Json(ingredient))
}

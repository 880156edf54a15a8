use axum::{
    Json,
    extract::{Path, State},
};
use foodgram_recipe::TagRow;

use super::AppState;
use crate::error::ApiResult;

pub async fn get_tags(State(state): State<AppState>) -> ApiResult<Json<Vec<TagRow>>> {
    let tags = foodgram_recipe::list_tags(&state.pool).await?;

    Ok(Json(tags))
}

pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<TagRow>> {
    let tag = foodgram_recipe::get_tag(&state.pool, id)
        .await?
        .ok_or_else(|| foodgram_shared::Error::NotFound("Not found.".to_string()))?;

    Ok(Json(tag))
}

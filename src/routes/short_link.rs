use axum::{
    extract::{Path, State},
    response::Redirect,
};

use super::AppState;
use crate::error::ApiResult;

/// Resolve a short link to the recipe page on the frontend.
pub async fn resolve_short_link(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Redirect> {
    foodgram_recipe::get_recipe(&state.pool, id)
        .await?
        .ok_or_else(|| foodgram_shared::Error::NotFound("Not found.".to_string()))?;

    let base = state.base_url.trim_end_matches('/');

    Ok(Redirect::to(&format!("{base}/recipes/{id}")))
}

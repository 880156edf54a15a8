use axum::{Json, extract::State, http::StatusCode};
use foodgram_user::jwt::generate_jwt;
use serde::Deserialize;
use serde_json::{Value, json};

use super::AppState;
use crate::error::ApiResult;
use crate::middleware::Auth;

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn post_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> ApiResult<Json<Value>> {
    let user = foodgram_user::login(&state.pool, &payload.email, &payload.password).await?;
    let token = generate_jwt(user.id, &state.jwt_secret, state.jwt_lifetime_seconds)?;

    Ok(Json(json!({ "auth_token": token })))
}

/// Tokens are stateless, logout just confirms the caller was
/// authenticated.
pub async fn post_logout(_auth: Auth) -> StatusCode {
    StatusCode::NO_CONTENT
}

use axum::{extract::State, http::StatusCode};

use super::AppState;

pub async fn health() -> &'static str {
    "OK"
}

pub async fn ready(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => StatusCode::OK,
        Err(err) => {
            tracing::error!("Readiness check failed: {:?}", err);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

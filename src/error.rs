use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// HTTP-facing wrapper around the domain error type.
#[derive(Debug)]
pub struct ApiError(pub foodgram_shared::Error);

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl<E> From<E> for ApiError
where
    E: Into<foodgram_shared::Error>,
{
    fn from(value: E) -> Self {
        Self(value.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use foodgram_shared::Error;

        let (status, detail) = match self.0 {
            Error::Validate(errors) => (StatusCode::BAD_REQUEST, errors.to_string()),
            Error::Invalid(detail) => (StatusCode::BAD_REQUEST, detail),
            Error::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authentication credentials were not provided.".to_string(),
            ),
            Error::Forbidden => (
                StatusCode::FORBIDDEN,
                "You do not have permission to perform this action.".to_string(),
            ),
            Error::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            Error::Unknown(err) => {
                tracing::error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error.".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use foodgram_user::jwt::validate_jwt;

use crate::error::ApiError;
use crate::routes::AppState;

/// Extractor for authenticated requests. Validates the bearer token and
/// confirms the user still exists.
#[derive(Clone, Debug)]
pub struct Auth {
    pub user_id: i64,
}

impl FromRequestParts<AppState> for Auth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(foodgram_shared::Error::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(foodgram_shared::Error::Unauthorized)?;

        let claims = validate_jwt(token, &state.jwt_secret)
            .map_err(|_| foodgram_shared::Error::Unauthorized)?;

        // The user may have been deleted since the token was issued
        let user = foodgram_user::get_user(&state.pool, claims.sub).await?;
        if user.is_none() {
            return Err(foodgram_shared::Error::Unauthorized.into());
        }

        Ok(Auth {
            user_id: claims.sub,
        })
    }
}

/// Extractor for endpoints that behave differently for anonymous users.
#[derive(Clone, Debug)]
pub struct MaybeAuth(pub Option<Auth>);

impl MaybeAuth {
    pub fn user_id(&self) -> Option<i64> {
        self.0.as_ref().map(|auth| auth.user_id)
    }
}

impl FromRequestParts<AppState> for MaybeAuth {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuth(Auth::from_request_parts(parts, state).await.ok()))
    }
}

pub mod config;
pub mod db;
pub mod error;
pub mod fixtures;
pub mod media;
pub mod middleware;
pub mod migrate;
pub mod observability;
pub mod pagination;
pub mod routes;

pub use routes::AppState;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Build the Axum router with every route configured. Also used by the
/// integration tests, which drive it without binding a socket.
pub fn create_app(state: AppState) -> Router {
    use routes::*;

    let media_dir = ServeDir::new(state.media_root.clone());

    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/api/users/", get(get_users).post(post_register))
        .route("/api/users/me/", get(get_me))
        .route("/api/users/me/avatar/", put(put_avatar).delete(delete_avatar))
        .route("/api/users/set_password/", post(post_set_password))
        .route("/api/users/subscriptions/", get(get_subscriptions))
        .route("/api/users/{id}/", get(get_user_detail))
        .route(
            "/api/users/{id}/subscribe/",
            post(post_subscribe).delete(delete_subscribe),
        )
        .route("/api/auth/token/login/", post(post_login))
        .route("/api/auth/token/logout/", post(post_logout))
        .route("/api/tags/", get(get_tags))
        .route("/api/tags/{id}/", get(get_tag))
        .route("/api/ingredients/", get(get_ingredients))
        .route("/api/ingredients/{id}/", get(get_ingredient))
        .route("/api/recipes/", get(get_recipes).post(post_recipe))
        .route(
            "/api/recipes/download_shopping_cart/",
            get(download_shopping_cart),
        )
        .route(
            "/api/recipes/{id}/",
            get(get_recipe).patch(patch_recipe).delete(delete_recipe),
        )
        .route(
            "/api/recipes/{id}/favorite/",
            post(post_favorite).delete(delete_favorite),
        )
        .route(
            "/api/recipes/{id}/shopping_cart/",
            post(post_shopping_cart).delete(delete_shopping_cart),
        )
        .route("/api/recipes/{id}/get-link/", get(get_link))
        .route("/s/{id}", get(resolve_short_link))
        .nest_service("/media", media_dir)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

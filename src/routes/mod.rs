use std::path::PathBuf;

mod auth;
mod health;
mod ingredients;
mod recipes;
mod serializers;
mod short_link;
mod tags;
mod users;

pub use auth::*;
pub use health::*;
pub use ingredients::*;
pub use recipes::*;
pub use short_link::*;
pub use tags::*;
pub use users::*;

#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::SqlitePool,
    pub jwt_secret: String,
    pub jwt_lifetime_seconds: u64,
    pub base_url: String,
    pub media_root: PathBuf,
    pub page_size: i64,
}

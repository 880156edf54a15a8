use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use std::path::Path;
use std::str::FromStr;

use crate::config::Config;

/// Run all database migrations
pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    let options =
        SqliteConnectOptions::from_str(&config.database.url)?.create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;

    let mut conn = pool.acquire().await?;
    foodgram_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);

    pool.close().await;

    tracing::info!("Migrations completed");

    Ok(())
}

/// Drop the database file and run migrations from scratch
pub async fn reset(config: &Config) -> anyhow::Result<()> {
    let path = config
        .database
        .url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");

    if Path::new(path).exists() {
        std::fs::remove_file(path)?;
        tracing::info!("Dropped database: {}", path);
    }

    migrate(config).await?;

    Ok(())
}

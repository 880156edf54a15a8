use std::{path::PathBuf, str::FromStr};

use foodgram_user::{RegisterInput, UserRow, register};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    foodgram_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(pool)
}

#[allow(dead_code)]
pub async fn create_user(pool: &SqlitePool, name: &str) -> anyhow::Result<UserRow> {
    let user = register(
        pool,
        RegisterInput {
            email: format!("{name}@foodgram.localhost"),
            username: name.to_owned(),
            first_name: name.to_owned(),
            last_name: "Tester".to_owned(),
            password: "my_password".to_owned(),
        },
    )
    .await?;

    Ok(user)
}

use std::{path::PathBuf, str::FromStr};

use foodgram_recipe::{CreateRecipeInput, RecipeIngredientInput, RecipeRow};
use foodgram_user::{RegisterInput, UserRow};
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

pub async fn create_user(pool: &SqlitePool, name: &str) -> anyhow::Result<UserRow> {
    let user = foodgram_user::register(
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

pub async fn create_tag(pool: &SqlitePool, name: &str, slug: &str) -> anyhow::Result<i64> {
    let id = sqlx::query("INSERT INTO tag (name, slug) VALUES (?1, ?2)")
        .bind(name)
        .bind(slug)
        .execute(pool)
        .await?
        .last_insert_rowid();

    Ok(id)
}

pub async fn create_ingredient(pool: &SqlitePool, name: &str, unit: &str) -> anyhow::Result<i64> {
    let id = sqlx::query("INSERT INTO ingredient (name, measurement_unit) VALUES (?1, ?2)")
        .bind(name)
        .bind(unit)
        .execute(pool)
        .await?
        .last_insert_rowid();

    Ok(id)
}

#[allow(dead_code)]
pub async fn create_recipe(
    pool: &SqlitePool,
    author_id: i64,
    name: &str,
    tags: Vec<i64>,
    ingredients: Vec<(i64, i64)>,
) -> anyhow::Result<RecipeRow> {
    let recipe = foodgram_recipe::create_recipe(
        pool,
        author_id,
        CreateRecipeInput {
            name: name.to_owned(),
            image: format!("recipes/{name}.png"),
            text: format!("How to cook {name}"),
            cooking_time: 30,
            ingredients: ingredients
                .into_iter()
                .map(|(id, amount)| RecipeIngredientInput { id, amount })
                .collect(),
            tags,
        },
    )
    .await?;

    Ok(recipe)
}

use std::path::Path;

use foodgram_db::table::{Ingredient, Tag};
use sea_query::{OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct IngredientFixture {
    name: String,
    measurement_unit: String,
}

#[derive(Debug, Deserialize)]
struct TagFixture {
    name: String,
    slug: String,
}

/// Load the ingredient catalog from a JSON fixture. Already known
/// ingredients are skipped.
pub async fn load_ingredients(pool: &sqlx::SqlitePool, path: &Path) -> anyhow::Result<usize> {
    let raw = std::fs::read_to_string(path)?;
    let fixtures: Vec<IngredientFixture> = serde_json::from_str(&raw)?;
    let total = fixtures.len();

    for fixture in fixtures {
        let statment = Query::insert()
            .into_table(Ingredient::Table)
            .columns([Ingredient::Name, Ingredient::MeasurementUnit])
            .values_panic([fixture.name.into(), fixture.measurement_unit.into()])
            .on_conflict(
                OnConflict::columns([Ingredient::Name, Ingredient::MeasurementUnit])
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();
        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(pool).await?;
    }

    tracing::info!("Loaded {} ingredients from {}", total, path.display());

    Ok(total)
}

/// Load tags from a JSON fixture, skipping slugs that already exist.
pub async fn load_tags(pool: &sqlx::SqlitePool, path: &Path) -> anyhow::Result<usize> {
    let raw = std::fs::read_to_string(path)?;
    let fixtures: Vec<TagFixture> = serde_json::from_str(&raw)?;
    let total = fixtures.len();

    for fixture in fixtures {
        let statment = Query::insert()
            .into_table(Tag::Table)
            .columns([Tag::Name, Tag::Slug])
            .values_panic([fixture.name.into(), fixture.slug.into()])
            .on_conflict(OnConflict::column(Tag::Slug).do_nothing().to_owned())
            .to_owned();
        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(pool).await?;
    }

    tracing::info!("Loaded {} tags from {}", total, path.display());

    Ok(total)
}

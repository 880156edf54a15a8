use std::time::{SystemTime, UNIX_EPOCH};

use foodgram_db::table::Favourite;
use foodgram_shared::{Result, invalid, not_found};
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

pub async fn add_favorite(pool: &sqlx::SqlitePool, user_id: i64, recipe_id: i64) -> Result<()> {
    let created_at = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64;

    let statment = Query::insert()
        .into_table(Favourite::Table)
        .columns([Favourite::UserId, Favourite::RecipeId, Favourite::CreatedAt])
        .values_panic([user_id.into(), recipe_id.into(), created_at.into()])
        .on_conflict(
            OnConflict::columns([Favourite::UserId, Favourite::RecipeId])
                .do_nothing()
                .to_owned(),
        )
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    if result.rows_affected() == 0 {
        invalid!("Recipe is already in favorites.");
    }

    Ok(())
}

pub async fn remove_favorite(pool: &sqlx::SqlitePool, user_id: i64, recipe_id: i64) -> Result<()> {
    let statment = Query::delete()
        .from_table(Favourite::Table)
        .and_where(Expr::col(Favourite::UserId).eq(user_id))
        .and_where(Expr::col(Favourite::RecipeId).eq(recipe_id))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    if result.rows_affected() == 0 {
        not_found!("Recipe is not in favorites.");
    }

    Ok(())
}

pub async fn is_favorited(pool: &sqlx::SqlitePool, user_id: i64, recipe_id: i64) -> Result<bool> {
    let statment = Query::select()
        .expr(Expr::cust("COUNT(*)"))
        .from(Favourite::Table)
        .and_where(Expr::col(Favourite::UserId).eq(user_id))
        .and_where(Expr::col(Favourite::RecipeId).eq(recipe_id))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let count = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

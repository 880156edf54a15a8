use std::time::{SystemTime, UNIX_EPOCH};

use foodgram_db::table::ShoppingCart;
use foodgram_shared::{Result, invalid, not_found};
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

pub async fn add_to_cart(pool: &sqlx::SqlitePool, user_id: i64, recipe_id: i64) -> Result<()> {
    let created_at = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64;

    let statment = Query::insert()
        .into_table(ShoppingCart::Table)
        .columns([
            ShoppingCart::UserId,
            ShoppingCart::RecipeId,
            ShoppingCart::CreatedAt,
        ])
        .values_panic([user_id.into(), recipe_id.into(), created_at.into()])
        .on_conflict(
            OnConflict::columns([ShoppingCart::UserId, ShoppingCart::RecipeId])
                .do_nothing()
                .to_owned(),
        )
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    if result.rows_affected() == 0 {
        invalid!("Recipe is already in shopping cart.");
    }

    Ok(())
}

pub async fn remove_from_cart(pool: &sqlx::SqlitePool, user_id: i64, recipe_id: i64) -> Result<()> {
    let statment = Query::delete()
        .from_table(ShoppingCart::Table)
        .and_where(Expr::col(ShoppingCart::UserId).eq(user_id))
        .and_where(Expr::col(ShoppingCart::RecipeId).eq(recipe_id))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    if result.rows_affected() == 0 {
        not_found!("Recipe is not in shopping cart.");
    }

    Ok(())
}

pub async fn in_cart(pool: &sqlx::SqlitePool, user_id: i64, recipe_id: i64) -> Result<bool> {
    let statment = Query::select()
        .expr(Expr::cust("COUNT(*)"))
        .from(ShoppingCart::Table)
        .and_where(Expr::col(ShoppingCart::UserId).eq(user_id))
        .and_where(Expr::col(ShoppingCart::RecipeId).eq(recipe_id))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let count = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

use foodgram_db::table::User;
use foodgram_shared::Result;
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::types::UserRow;

const USER_COLUMNS: [User; 8] = [
    User::Id,
    User::Email,
    User::Username,
    User::FirstName,
    User::LastName,
    User::HashedPassword,
    User::Avatar,
    User::CreatedAt,
];

pub async fn get_user(pool: &sqlx::SqlitePool, id: i64) -> Result<Option<UserRow>> {
    let statment = Query::select()
        .columns(USER_COLUMNS)
        .from(User::Table)
        .and_where(Expr::col(User::Id).eq(id))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let user = sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn find_by_email(pool: &sqlx::SqlitePool, email: &str) -> Result<Option<UserRow>> {
    let statment = Query::select()
        .columns(USER_COLUMNS)
        .from(User::Table)
        .and_where(Expr::col(User::Email).eq(email))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let user = sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn list_users(pool: &sqlx::SqlitePool, limit: i64, offset: i64) -> Result<Vec<UserRow>> {
    let statment = Query::select()
        .columns(USER_COLUMNS)
        .from(User::Table)
        .order_by(User::Id, Order::Asc)
        .limit(limit as u64)
        .offset(offset as u64)
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let users = sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(users)
}

pub async fn count_users(pool: &sqlx::SqlitePool) -> Result<i64> {
    let statment = Query::select()
        .expr(Expr::cust("COUNT(*)"))
        .from(User::Table)
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let count = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

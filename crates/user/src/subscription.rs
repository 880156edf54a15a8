use std::time::{SystemTime, UNIX_EPOCH};

use foodgram_db::table::{Subscription, User};
use foodgram_shared::{Result, invalid, not_found};
use sea_query::{Expr, ExprTrait, OnConflict, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::types::UserRow;

pub async fn subscribe(pool: &sqlx::SqlitePool, user_id: i64, author_id: i64) -> Result<()> {
    if user_id == author_id {
        invalid!("You cannot subscribe to yourself.");
    }

    let created_at = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64;

    let statment = Query::insert()
        .into_table(Subscription::Table)
        .columns([
            Subscription::UserId,
            Subscription::AuthorId,
            Subscription::CreatedAt,
        ])
        .values_panic([user_id.into(), author_id.into(), created_at.into()])
        .on_conflict(
            OnConflict::columns([Subscription::UserId, Subscription::AuthorId])
                .do_nothing()
                .to_owned(),
        )
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    if result.rows_affected() == 0 {
        invalid!("You are already subscribed to this author.");
    }

    Ok(())
}

pub async fn unsubscribe(pool: &sqlx::SqlitePool, user_id: i64, author_id: i64) -> Result<()> {
    let statment = Query::delete()
        .from_table(Subscription::Table)
        .and_where(Expr::col(Subscription::UserId).eq(user_id))
        .and_where(Expr::col(Subscription::AuthorId).eq(author_id))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    if result.rows_affected() == 0 {
        not_found!("You are not subscribed to this author.");
    }

    Ok(())
}

pub async fn is_subscribed(pool: &sqlx::SqlitePool, user_id: i64, author_id: i64) -> Result<bool> {
    let statment = Query::select()
        .expr(Expr::cust("COUNT(*)"))
        .from(Subscription::Table)
        .and_where(Expr::col(Subscription::UserId).eq(user_id))
        .and_where(Expr::col(Subscription::AuthorId).eq(author_id))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let count = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

pub async fn list_subscribed_authors(
    pool: &sqlx::SqlitePool,
    user_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<UserRow>> {
    let statment = Query::select()
        .columns([
            (User::Table, User::Id),
            (User::Table, User::Email),
            (User::Table, User::Username),
            (User::Table, User::FirstName),
            (User::Table, User::LastName),
            (User::Table, User::HashedPassword),
            (User::Table, User::Avatar),
            (User::Table, User::CreatedAt),
        ])
        .from(User::Table)
        .inner_join(
            Subscription::Table,
            Expr::col((Subscription::Table, Subscription::AuthorId))
                .equals((User::Table, User::Id)),
        )
        .and_where(Expr::col((Subscription::Table, Subscription::UserId)).eq(user_id))
        .order_by((Subscription::Table, Subscription::Id), Order::Asc)
        .limit(limit as u64)
        .offset(offset as u64)
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let authors = sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(authors)
}

pub async fn count_subscribed_authors(pool: &sqlx::SqlitePool, user_id: i64) -> Result<i64> {
    let statment = Query::select()
        .expr(Expr::cust("COUNT(*)"))
        .from(Subscription::Table)
        .and_where(Expr::col(Subscription::UserId).eq(user_id))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let count = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

use foodgram_db::table::{Favourite, Ingredient, Recipe, RecipeIngredient, RecipeTag, ShoppingCart, Tag};
use foodgram_shared::Result;
use sea_query::{Expr, ExprTrait, LikeExpr, Order, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::types::{IngredientRow, RecipeFilter, RecipeIngredientRow, RecipePreview, RecipeRow, TagRow};

pub async fn list_tags(pool: &sqlx::SqlitePool) -> Result<Vec<TagRow>> {
    let statment = Query::select()
        .columns([Tag::Id, Tag::Name, Tag::Slug])
        .from(Tag::Table)
        .order_by(Tag::Id, Order::Asc)
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let tags = sqlx::query_as_with::<_, TagRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(tags)
}

pub async fn get_tag(pool: &sqlx::SqlitePool, id: i64) -> Result<Option<TagRow>> {
    let statment = Query::select()
        .columns([Tag::Id, Tag::Name, Tag::Slug])
        .from(Tag::Table)
        .and_where(Expr::col(Tag::Id).eq(id))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let tag = sqlx::query_as_with::<_, TagRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(tag)
}

pub async fn list_ingredients(
    pool: &sqlx::SqlitePool,
    name_prefix: Option<&str>,
) -> Result<Vec<IngredientRow>> {
    let mut statment = Query::select()
        .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
        .from(Ingredient::Table)
        .order_by(Ingredient::Name, Order::Asc)
        .to_owned();

    if let Some(prefix) = name_prefix {
        // % and _ must match literally in the prefix
        let escaped = prefix
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        statment.and_where(
            Expr::col(Ingredient::Name).like(LikeExpr::new(format!("{escaped}%")).escape('\\')),
        );
    }

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let ingredients = sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(ingredients)
}

pub async fn get_ingredient(pool: &sqlx::SqlitePool, id: i64) -> Result<Option<IngredientRow>> {
    let statment = Query::select()
        .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
        .from(Ingredient::Table)
        .and_where(Expr::col(Ingredient::Id).eq(id))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let ingredient = sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(ingredient)
}

fn apply_filter(statment: &mut SelectStatement, filter: &RecipeFilter) {
    if let Some(author) = filter.author {
        statment.and_where(Expr::col((Recipe::Table, Recipe::AuthorId)).eq(author));
    }

    if !filter.tags.is_empty() {
        let tagged = Query::select()
            .column(RecipeTag::RecipeId)
            .from(RecipeTag::Table)
            .inner_join(
                Tag::Table,
                Expr::col((Tag::Table, Tag::Id)).equals((RecipeTag::Table, RecipeTag::TagId)),
            )
            .and_where(Expr::col((Tag::Table, Tag::Slug)).is_in(filter.tags.clone()))
            .to_owned();
        statment.and_where(Expr::col((Recipe::Table, Recipe::Id)).in_subquery(tagged));
    }

    if let Some(user_id) = filter.favorited_by {
        let favorited = Query::select()
            .column(Favourite::RecipeId)
            .from(Favourite::Table)
            .and_where(Expr::col(Favourite::UserId).eq(user_id))
            .to_owned();
        statment.and_where(Expr::col((Recipe::Table, Recipe::Id)).in_subquery(favorited));
    }

    if let Some(user_id) = filter.in_cart_of {
        let in_cart = Query::select()
            .column(ShoppingCart::RecipeId)
            .from(ShoppingCart::Table)
            .and_where(Expr::col(ShoppingCart::UserId).eq(user_id))
            .to_owned();
        statment.and_where(Expr::col((Recipe::Table, Recipe::Id)).in_subquery(in_cart));
    }
}

pub async fn list_recipes(
    pool: &sqlx::SqlitePool,
    filter: &RecipeFilter,
    limit: i64,
    offset: i64,
) -> Result<Vec<RecipeRow>> {
    let mut statment = Query::select()
        .columns([
            Recipe::Id,
            Recipe::AuthorId,
            Recipe::Name,
            Recipe::Image,
            Recipe::Text,
            Recipe::CookingTime,
            Recipe::PublishedAt,
        ])
        .from(Recipe::Table)
        .order_by(Recipe::PublishedAt, Order::Desc)
        .order_by(Recipe::Id, Order::Desc)
        .limit(limit as u64)
        .offset(offset as u64)
        .to_owned();
    apply_filter(&mut statment, filter);

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let recipes = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(recipes)
}

pub async fn count_recipes(pool: &sqlx::SqlitePool, filter: &RecipeFilter) -> Result<i64> {
    let mut statment = Query::select()
        .expr(Expr::cust("COUNT(*)"))
        .from(Recipe::Table)
        .to_owned();
    apply_filter(&mut statment, filter);

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let count = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

pub async fn get_recipe(pool: &sqlx::SqlitePool, id: i64) -> Result<Option<RecipeRow>> {
    let statment = Query::select()
        .columns([
            Recipe::Id,
            Recipe::AuthorId,
            Recipe::Name,
            Recipe::Image,
            Recipe::Text,
            Recipe::CookingTime,
            Recipe::PublishedAt,
        ])
        .from(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(id))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let recipe = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(recipe)
}

pub async fn recipe_tags(pool: &sqlx::SqlitePool, recipe_id: i64) -> Result<Vec<TagRow>> {
    let statment = Query::select()
        .columns([
            (Tag::Table, Tag::Id),
            (Tag::Table, Tag::Name),
            (Tag::Table, Tag::Slug),
        ])
        .from(Tag::Table)
        .inner_join(
            RecipeTag::Table,
            Expr::col((RecipeTag::Table, RecipeTag::TagId)).equals((Tag::Table, Tag::Id)),
        )
        .and_where(Expr::col((RecipeTag::Table, RecipeTag::RecipeId)).eq(recipe_id))
        .order_by((Tag::Table, Tag::Id), Order::Asc)
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let tags = sqlx::query_as_with::<_, TagRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(tags)
}

pub async fn recipe_ingredients(
    pool: &sqlx::SqlitePool,
    recipe_id: i64,
) -> Result<Vec<RecipeIngredientRow>> {
    let statment = Query::select()
        .columns([
            (Ingredient::Table, Ingredient::Id),
            (Ingredient::Table, Ingredient::Name),
            (Ingredient::Table, Ingredient::MeasurementUnit),
        ])
        .column((RecipeIngredient::Table, RecipeIngredient::Amount))
        .from(Ingredient::Table)
        .inner_join(
            RecipeIngredient::Table,
            Expr::col((RecipeIngredient::Table, RecipeIngredient::IngredientId))
                .equals((Ingredient::Table, Ingredient::Id)),
        )
        .and_where(Expr::col((RecipeIngredient::Table, RecipeIngredient::RecipeId)).eq(recipe_id))
        .order_by((RecipeIngredient::Table, RecipeIngredient::Id), Order::Asc)
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let ingredients = sqlx::query_as_with::<_, RecipeIngredientRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(ingredients)
}

pub async fn previews_by_author(
    pool: &sqlx::SqlitePool,
    author_id: i64,
    limit: Option<i64>,
) -> Result<Vec<RecipePreview>> {
    let mut statment = Query::select()
        .columns([Recipe::Id, Recipe::Name, Recipe::Image, Recipe::CookingTime])
        .from(Recipe::Table)
        .and_where(Expr::col(Recipe::AuthorId).eq(author_id))
        .order_by(Recipe::PublishedAt, Order::Desc)
        .order_by(Recipe::Id, Order::Desc)
        .to_owned();

    if let Some(limit) = limit {
        statment.limit(Ord::max(limit, 0) as u64);
    }

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let previews = sqlx::query_as_with::<_, RecipePreview, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(previews)
}

pub async fn count_by_author(pool: &sqlx::SqlitePool, author_id: i64) -> Result<i64> {
    let statment = Query::select()
        .expr(Expr::cust("COUNT(*)"))
        .from(Recipe::Table)
        .and_where(Expr::col(Recipe::AuthorId).eq(author_id))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let count = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

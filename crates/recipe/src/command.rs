use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use foodgram_db::table::{Ingredient, Recipe, RecipeIngredient, RecipeTag, Tag};
use foodgram_shared::{Error, Result, invalid};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::types::RecipeRow;

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct RecipeIngredientInput {
    pub id: i64,
    #[validate(range(min = 1))]
    pub amount: i64,
}

fn validate_unique_ingredients(
    ingredients: &Vec<RecipeIngredientInput>,
) -> std::result::Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for ingredient in ingredients {
        if !seen.insert(ingredient.id) {
            return Err(ValidationError::new("ingredients")
                .with_message("Ingredients must not repeat.".into()));
        }
    }

    Ok(())
}

fn validate_unique_tags(tags: &Vec<i64>) -> std::result::Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for tag in tags {
        if !seen.insert(*tag) {
            return Err(ValidationError::new("tags").with_message("Tags must not repeat.".into()));
        }
    }

    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecipeInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    pub image: String,
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(range(min = 1))]
    pub cooking_time: i64,
    #[validate(
        length(min = 1),
        nested,
        custom(function = "validate_unique_ingredients")
    )]
    pub ingredients: Vec<RecipeIngredientInput>,
    #[validate(length(min = 1), custom(function = "validate_unique_tags"))]
    pub tags: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRecipeInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    pub image: Option<String>,
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(range(min = 1))]
    pub cooking_time: i64,
    #[validate(
        length(min = 1),
        nested,
        custom(function = "validate_unique_ingredients")
    )]
    pub ingredients: Vec<RecipeIngredientInput>,
    #[validate(length(min = 1), custom(function = "validate_unique_tags"))]
    pub tags: Vec<i64>,
}

async fn check_tags_exist(pool: &sqlx::SqlitePool, tags: &[i64]) -> Result<()> {
    let statment = Query::select()
        .column(Tag::Id)
        .from(Tag::Table)
        .and_where(Expr::col(Tag::Id).is_in(tags.to_vec()))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let known = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    let known: HashSet<i64> = known.into_iter().collect();
    for tag in tags {
        if !known.contains(tag) {
            invalid!("Tag {tag} does not exist.");
        }
    }

    Ok(())
}

async fn check_ingredients_exist(
    pool: &sqlx::SqlitePool,
    ingredients: &[RecipeIngredientInput],
) -> Result<()> {
    let ids: Vec<i64> = ingredients.iter().map(|i| i.id).collect();
    let statment = Query::select()
        .column(Ingredient::Id)
        .from(Ingredient::Table)
        .and_where(Expr::col(Ingredient::Id).is_in(ids.clone()))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let known = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    let known: HashSet<i64> = known.into_iter().collect();
    for id in ids {
        if !known.contains(&id) {
            invalid!("Ingredient {id} does not exist.");
        }
    }

    Ok(())
}

async fn insert_relations(
    tx: &mut sqlx::SqliteConnection,
    recipe_id: i64,
    tags: &[i64],
    ingredients: &[RecipeIngredientInput],
) -> Result<()> {
    let mut statment = Query::insert()
        .into_table(RecipeTag::Table)
        .columns([RecipeTag::RecipeId, RecipeTag::TagId])
        .to_owned();
    for tag in tags {
        statment.values_panic([recipe_id.into(), (*tag).into()]);
    }
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    let mut statment = Query::insert()
        .into_table(RecipeIngredient::Table)
        .columns([
            RecipeIngredient::RecipeId,
            RecipeIngredient::IngredientId,
            RecipeIngredient::Amount,
        ])
        .to_owned();
    for ingredient in ingredients {
        statment.values_panic([recipe_id.into(), ingredient.id.into(), ingredient.amount.into()]);
    }
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    Ok(())
}

pub async fn create_recipe(
    pool: &sqlx::SqlitePool,
    author_id: i64,
    input: CreateRecipeInput,
) -> Result<RecipeRow> {
    input.validate()?;
    check_tags_exist(pool, &input.tags).await?;
    check_ingredients_exist(pool, &input.ingredients).await?;

    let published_at = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64;

    let mut tx = pool.begin().await?;

    let statment = Query::insert()
        .into_table(Recipe::Table)
        .columns([
            Recipe::AuthorId,
            Recipe::Name,
            Recipe::Image,
            Recipe::Text,
            Recipe::CookingTime,
            Recipe::PublishedAt,
        ])
        .values_panic([
            author_id.into(),
            input.name.into(),
            input.image.into(),
            input.text.into(),
            input.cooking_time.into(),
            published_at.into(),
        ])
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let recipe_id = sqlx::query_with(&sql, values)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    insert_relations(&mut tx, recipe_id, &input.tags, &input.ingredients).await?;

    tx.commit().await?;

    let recipe = crate::query::get_recipe(pool, recipe_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Recipe {recipe_id} not found")))?;

    Ok(recipe)
}

pub async fn update_recipe(
    pool: &sqlx::SqlitePool,
    recipe_id: i64,
    input: UpdateRecipeInput,
) -> Result<RecipeRow> {
    input.validate()?;
    check_tags_exist(pool, &input.tags).await?;
    check_ingredients_exist(pool, &input.ingredients).await?;

    let mut tx = pool.begin().await?;

    let mut statment = Query::update()
        .table(Recipe::Table)
        .value(Recipe::Name, input.name)
        .value(Recipe::Text, input.text)
        .value(Recipe::CookingTime, input.cooking_time)
        .and_where(Expr::col(Recipe::Id).eq(recipe_id))
        .to_owned();
    if let Some(image) = input.image {
        statment.value(Recipe::Image, image);
    }
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    let statment = Query::delete()
        .from_table(RecipeTag::Table)
        .and_where(Expr::col(RecipeTag::RecipeId).eq(recipe_id))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    let statment = Query::delete()
        .from_table(RecipeIngredient::Table)
        .and_where(Expr::col(RecipeIngredient::RecipeId).eq(recipe_id))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    insert_relations(&mut tx, recipe_id, &input.tags, &input.ingredients).await?;

    tx.commit().await?;

    let recipe = crate::query::get_recipe(pool, recipe_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Recipe {recipe_id} not found")))?;

    Ok(recipe)
}

pub async fn delete_recipe(pool: &sqlx::SqlitePool, recipe_id: i64) -> Result<()> {
    let statment = Query::delete()
        .from_table(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(recipe_id))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_ingredients() {
        let lines = vec![
            RecipeIngredientInput { id: 1, amount: 2 },
            RecipeIngredientInput { id: 1, amount: 5 },
        ];
        assert!(validate_unique_ingredients(&lines).is_err());
    }

    #[test]
    fn rejects_duplicate_tags() {
        assert!(validate_unique_tags(&vec![1, 2, 1]).is_err());
        assert!(validate_unique_tags(&vec![1, 2, 3]).is_ok());
    }

    #[test]
    fn rejects_empty_relation_lists() {
        let input = CreateRecipeInput {
            name: "Omelette".to_owned(),
            image: "recipes/omelette.png".to_owned(),
            text: "Whisk and fry.".to_owned(),
            cooking_time: 10,
            ingredients: vec![],
            tags: vec![],
        };

        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("ingredients"));
        assert!(errors.field_errors().contains_key("tags"));
    }
}

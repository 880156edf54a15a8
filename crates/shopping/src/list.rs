use foodgram_db::table::{Ingredient, Recipe, RecipeIngredient, ShoppingCart};
use foodgram_shared::Result;
use sea_query::{Alias, Expr, ExprTrait, Func, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

/// One aggregated line of the shopping list.
#[derive(Debug, Clone, FromRow)]
pub struct ShoppingItem {
    pub name: String,
    pub measurement_unit: String,
    pub total_amount: i64,
}

/// A recipe in the cart that uses a given ingredient.
#[derive(Debug, Clone, FromRow)]
pub struct IngredientRecipeRow {
    pub ingredient_name: String,
    pub recipe_name: String,
}

/// Sum up ingredient amounts across every recipe in the user's cart.
pub async fn shopping_items(pool: &sqlx::SqlitePool, user_id: i64) -> Result<Vec<ShoppingItem>> {
    let statment = Query::select()
        .column((Ingredient::Table, Ingredient::Name))
        .column((Ingredient::Table, Ingredient::MeasurementUnit))
        .expr_as(
            Func::sum(Expr::col((RecipeIngredient::Table, RecipeIngredient::Amount))),
            Alias::new("total_amount"),
        )
        .from(RecipeIngredient::Table)
        .inner_join(
            Ingredient::Table,
            Expr::col((Ingredient::Table, Ingredient::Id))
                .equals((RecipeIngredient::Table, RecipeIngredient::IngredientId)),
        )
        .inner_join(
            ShoppingCart::Table,
            Expr::col((ShoppingCart::Table, ShoppingCart::RecipeId))
                .equals((RecipeIngredient::Table, RecipeIngredient::RecipeId)),
        )
        .and_where(Expr::col((ShoppingCart::Table, ShoppingCart::UserId)).eq(user_id))
        .group_by_columns([
            (Ingredient::Table, Ingredient::Name),
            (Ingredient::Table, Ingredient::MeasurementUnit),
        ])
        .order_by((Ingredient::Table, Ingredient::Name), Order::Asc)
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let items = sqlx::query_as_with::<_, ShoppingItem, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(items)
}

/// Distinct (ingredient, recipe) pairs for the recipes section of the list.
pub async fn cart_ingredient_recipes(
    pool: &sqlx::SqlitePool,
    user_id: i64,
) -> Result<Vec<IngredientRecipeRow>> {
    let statment = Query::select()
        .distinct()
        .expr_as(
            Expr::col((Ingredient::Table, Ingredient::Name)),
            Alias::new("ingredient_name"),
        )
        .expr_as(
            Expr::col((Recipe::Table, Recipe::Name)),
            Alias::new("recipe_name"),
        )
        .from(RecipeIngredient::Table)
        .inner_join(
            Ingredient::Table,
            Expr::col((Ingredient::Table, Ingredient::Id))
                .equals((RecipeIngredient::Table, RecipeIngredient::IngredientId)),
        )
        .inner_join(
            Recipe::Table,
            Expr::col((Recipe::Table, Recipe::Id))
                .equals((RecipeIngredient::Table, RecipeIngredient::RecipeId)),
        )
        .inner_join(
            ShoppingCart::Table,
            Expr::col((ShoppingCart::Table, ShoppingCart::RecipeId))
                .equals((RecipeIngredient::Table, RecipeIngredient::RecipeId)),
        )
        .and_where(Expr::col((ShoppingCart::Table, ShoppingCart::UserId)).eq(user_id))
        .order_by((Ingredient::Table, Ingredient::Name), Order::Asc)
        .order_by((Recipe::Table, Recipe::Name), Order::Asc)
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let pairs = sqlx::query_as_with::<_, IngredientRecipeRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(pairs)
}

/// Render the downloadable shopping list as plain text.
pub fn render_shopping_list(
    username: &str,
    items: &[ShoppingItem],
    pairs: &[IngredientRecipeRow],
) -> String {
    let mut out = format!("Shopping list for {username}:\n\nProducts:\n");

    for (position, item) in items.iter().enumerate() {
        out.push_str(&format!(
            "{}. {}: {} {}\n",
            position + 1,
            item.name,
            item.total_amount,
            item.measurement_unit
        ));
    }

    out.push_str("\nRecipes:\n");

    let mut current: Option<&str> = None;
    for pair in pairs {
        if current == Some(pair.ingredient_name.as_str()) {
            out.push_str(&format!(", {}", pair.recipe_name));
        } else {
            if current.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("{}: {}", pair.ingredient_name, pair.recipe_name));
            current = Some(pair.ingredient_name.as_str());
        }
    }
    if current.is_some() {
        out.push('\n');
    }

    out
}

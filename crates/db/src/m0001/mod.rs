mod favourite;
mod favourite_pair_idx;
mod ingredient;
mod ingredient_pair_idx;
mod recipe;
mod recipe_ingredient;
mod recipe_ingredient_pair_idx;
mod recipe_tag;
mod recipe_tag_pair_idx;
mod shopping_cart;
mod shopping_cart_pair_idx;
mod subscription;
mod subscription_pair_idx;
mod tag;
mod tag_name_idx;
mod tag_slug_idx;
mod user;
mod user_email_idx;
mod user_username_idx;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "main",
    "m0001",
    vec_box![],
    vec_box![
        user::Operation,
        user_email_idx::Operation,
        user_username_idx::Operation,
        subscription::Operation,
        subscription_pair_idx::Operation,
        tag::Operation,
        tag_name_idx::Operation,
        tag_slug_idx::Operation,
        ingredient::Operation,
        ingredient_pair_idx::Operation,
        recipe::Operation,
        recipe_ingredient::Operation,
        recipe_ingredient_pair_idx::Operation,
        recipe_tag::Operation,
        recipe_tag_pair_idx::Operation,
        favourite::Operation,
        favourite_pair_idx::Operation,
        shopping_cart::Operation,
        shopping_cart_pair_idx::Operation
    ]
);

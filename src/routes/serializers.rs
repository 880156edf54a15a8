use foodgram_recipe::{RecipePreview, RecipeRow};
use foodgram_shared::Result;
use foodgram_user::UserRow;
use serde_json::{Value, json};

use super::AppState;

/// Absolute URL for a stored media file.
pub fn media_url(state: &AppState, relative: &str) -> String {
    format!("{}/media/{relative}", state.base_url.trim_end_matches('/'))
}

/// Public profile representation of a user.
pub async fn profile_json(
    state: &AppState,
    user: &UserRow,
    viewer: Option<i64>,
) -> Result<Value> {
    let is_subscribed = match viewer {
        Some(viewer_id) => {
            foodgram_user::subscription::is_subscribed(&state.pool, viewer_id, user.id).await?
        }
        None => false,
    };

    Ok(json!({
        "id": user.id,
        "email": user.email,
        "username": user.username,
        "first_name": user.first_name,
        "last_name": user.last_name,
        "is_subscribed": is_subscribed,
        "avatar": user.avatar.as_deref().map(|avatar| media_url(state, avatar)),
    }))
}

/// Compact recipe representation used by favorites, carts and
/// subscription listings.
pub fn preview_json(state: &AppState, preview: &RecipePreview) -> Value {
    json!({
        "id": preview.id,
        "name": preview.name,
        "image": media_url(state, &preview.image),
        "cooking_time": preview.cooking_time,
    })
}

/// Full recipe representation with author, tags and ingredient lines.
pub async fn recipe_detail_json(
    state: &AppState,
    recipe: &RecipeRow,
    viewer: Option<i64>,
) -> Result<Value> {
    let author = foodgram_user::get_user(&state.pool, recipe.author_id)
        .await?
        .ok_or_else(|| {
            foodgram_shared::Error::NotFound(format!("User {} not found", recipe.author_id))
        })?;
    let author = profile_json(state, &author, viewer).await?;

    let tags = foodgram_recipe::recipe_tags(&state.pool, recipe.id).await?;
    let ingredients = foodgram_recipe::recipe_ingredients(&state.pool, recipe.id).await?;

    let (is_favorited, is_in_shopping_cart) = match viewer {
        Some(viewer_id) => (
            foodgram_recipe::favourite::is_favorited(&state.pool, viewer_id, recipe.id).await?,
            foodgram_shopping::in_cart(&state.pool, viewer_id, recipe.id).await?,
        ),
        None => (false, false),
    };

    Ok(json!({
        "id": recipe.id,
        "tags": tags,
        "author": author,
        "ingredients": ingredients,
        "is_favorited": is_favorited,
        "is_in_shopping_cart": is_in_shopping_cart,
        "name": recipe.name,
        "image": media_url(state, &recipe.image),
        "text": recipe.text,
        "cooking_time": recipe.cooking_time,
    }))
}

/// Subscription entry: author profile plus a truncated recipe list.
pub async fn author_with_recipes_json(
    state: &AppState,
    author: &UserRow,
    viewer: Option<i64>,
    recipes_limit: Option<i64>,
) -> Result<Value> {
    let mut value = profile_json(state, author, viewer).await?;

    let previews = foodgram_recipe::previews_by_author(&state.pool, author.id, recipes_limit).await?;
    let recipes: Vec<Value> = previews
        .iter()
        .map(|preview| preview_json(state, preview))
        .collect();
    let recipes_count = foodgram_recipe::count_by_author(&state.pool, author.id).await?;

    if let Some(object) = value.as_object_mut() {
        object.insert("recipes".to_string(), json!(recipes));
        object.insert("recipes_count".to_string(), json!(recipes_count));
    }

    Ok(value)
}

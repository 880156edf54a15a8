use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, Uri, header},
};
use axum_extra::extract::Query;
use foodgram_recipe::{
    CreateRecipeInput, RecipeFilter, RecipeIngredientInput, RecipePreview, UpdateRecipeInput,
};
use foodgram_shared::{Page, PageQuery, invalid};
use serde::Deserialize;
use serde_json::{Value, json};

use super::AppState;
use super::serializers::{preview_json, recipe_detail_json};
use crate::error::ApiResult;
use crate::media::{delete_media, save_base64_image};
use crate::middleware::{Auth, MaybeAuth};
use crate::pagination::page_links;

#[derive(Debug, Deserialize)]
pub struct RecipeListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub author: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_favorited: Option<String>,
    pub is_in_shopping_cart: Option<String>,
}

fn is_truthy(value: &Option<String>) -> bool {
    matches!(value.as_deref(), Some("1") | Some("true") | Some("True"))
}

pub async fn get_recipes(
    State(state): State<AppState>,
    auth: MaybeAuth,
    uri: Uri,
    Query(query): Query<RecipeListQuery>,
) -> ApiResult<Json<Page<Value>>> {
    let mut filter = RecipeFilter {
        author: query.author,
        tags: query.tags.clone(),
        ..Default::default()
    };

    // Favorite and cart filters only apply to authenticated requests
    if let Some(user_id) = auth.user_id() {
        if is_truthy(&query.is_favorited) {
            filter.favorited_by = Some(user_id);
        }
        if is_truthy(&query.is_in_shopping_cart) {
            filter.in_cart_of = Some(user_id);
        }
    }

    let page_query = PageQuery {
        page: query.page,
        limit: query.limit,
    };
    let limit = page_query.limit_or(state.page_size);
    let offset = page_query.offset(state.page_size);

    let recipes = foodgram_recipe::list_recipes(&state.pool, &filter, limit, offset).await?;
    let count = foodgram_recipe::count_recipes(&state.pool, &filter).await?;

    let mut results = Vec::with_capacity(recipes.len());
    for recipe in &recipes {
        results.push(recipe_detail_json(&state, recipe, auth.user_id()).await?);
    }

    let mut page = Page::new(count, results);
    (page.next, page.previous) = page_links(&state.base_url, &uri, page_query.page(), limit, count);

    Ok(Json(page))
}

#[derive(Debug, Deserialize)]
pub struct RecipePayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub cooking_time: i64,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredientInput>,
    #[serde(default)]
    pub tags: Vec<i64>,
}

pub async fn post_recipe(
    State(state): State<AppState>,
    auth: Auth,
    Json(payload): Json<RecipePayload>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Some(image) = payload.image.filter(|data| !data.is_empty()) else {
        invalid!("Image is required.");
    };

    let relative = save_base64_image(&state.media_root, "recipes", &image)?;

    let input = CreateRecipeInput {
        name: payload.name,
        image: relative.clone(),
        text: payload.text,
        cooking_time: payload.cooking_time,
        ingredients: payload.ingredients,
        tags: payload.tags,
    };

    let recipe = match foodgram_recipe::create_recipe(&state.pool, auth.user_id, input).await {
        Ok(recipe) => recipe,
        Err(err) => {
            delete_media(&state.media_root, &relative);
            return Err(err.into());
        }
    };

    let body = recipe_detail_json(&state, &recipe, Some(auth.user_id)).await?;

    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    auth: MaybeAuth,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let recipe = foodgram_recipe::get_recipe(&state.pool, id)
        .await?
        .ok_or_else(|| foodgram_shared::Error::NotFound("Not found.".to_string()))?;

    Ok(Json(recipe_detail_json(&state, &recipe, auth.user_id()).await?))
}

pub async fn patch_recipe(
    State(state): State<AppState>,
    auth: Auth,
    Path(id): Path<i64>,
    Json(payload): Json<RecipePayload>,
) -> ApiResult<Json<Value>> {
    let recipe = foodgram_recipe::get_recipe(&state.pool, id)
        .await?
        .ok_or_else(|| foodgram_shared::Error::NotFound("Not found.".to_string()))?;

    if recipe.author_id != auth.user_id {
        return Err(foodgram_shared::Error::Forbidden.into());
    }

    let new_image = match payload.image.as_deref() {
        Some(data) if !data.is_empty() => {
            Some(save_base64_image(&state.media_root, "recipes", data)?)
        }
        Some(_) => invalid!("Image must not be empty."),
        None => None,
    };

    let input = UpdateRecipeInput {
        name: payload.name,
        image: new_image.clone(),
        text: payload.text,
        cooking_time: payload.cooking_time,
        ingredients: payload.ingredients,
        tags: payload.tags,
    };

    let updated = match foodgram_recipe::update_recipe(&state.pool, id, input).await {
        Ok(updated) => updated,
        Err(err) => {
            if let Some(relative) = new_image.as_deref() {
                delete_media(&state.media_root, relative);
            }
            return Err(err.into());
        }
    };

    if new_image.is_some() {
        delete_media(&state.media_root, &recipe.image);
    }

    Ok(Json(
        recipe_detail_json(&state, &updated, Some(auth.user_id)).await?,
    ))
}

pub async fn delete_recipe(
    State(state): State<AppState>,
    auth: Auth,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let recipe = foodgram_recipe::get_recipe(&state.pool, id)
        .await?
        .ok_or_else(|| foodgram_shared::Error::NotFound("Not found.".to_string()))?;

    if recipe.author_id != auth.user_id {
        return Err(foodgram_shared::Error::Forbidden.into());
    }

    foodgram_recipe::delete_recipe(&state.pool, id).await?;
    delete_media(&state.media_root, &recipe.image);

    Ok(StatusCode::NO_CONTENT)
}

fn preview_of(recipe: &foodgram_recipe::RecipeRow) -> RecipePreview {
    RecipePreview {
        id: recipe.id,
        name: recipe.name.clone(),
        image: recipe.image.clone(),
        cooking_time: recipe.cooking_time,
    }
}

pub async fn post_favorite(
    State(state): State<AppState>,
    auth: Auth,
    Path(id): Path<i64>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let recipe = foodgram_recipe::get_recipe(&state.pool, id)
        .await?
        .ok_or_else(|| foodgram_shared::Error::NotFound("Not found.".to_string()))?;

    foodgram_recipe::favourite::add_favorite(&state.pool, auth.user_id, id).await?;

    Ok((
        StatusCode::CREATED,
        Json(preview_json(&state, &preview_of(&recipe))),
    ))
}

pub async fn delete_favorite(
    State(state): State<AppState>,
    auth: Auth,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    foodgram_recipe::get_recipe(&state.pool, id)
        .await?
        .ok_or_else(|| foodgram_shared::Error::NotFound("Not found.".to_string()))?;

    foodgram_recipe::favourite::remove_favorite(&state.pool, auth.user_id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn post_shopping_cart(
    State(state): State<AppState>,
    auth: Auth,
    Path(id): Path<i64>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let recipe = foodgram_recipe::get_recipe(&state.pool, id)
        .await?
        .ok_or_else(|| foodgram_shared::Error::NotFound("Not found.".to_string()))?;

    foodgram_shopping::add_to_cart(&state.pool, auth.user_id, id).await?;

    Ok((
        StatusCode::CREATED,
        Json(preview_json(&state, &preview_of(&recipe))),
    ))
}

pub async fn delete_shopping_cart(
    State(state): State<AppState>,
    auth: Auth,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    foodgram_recipe::get_recipe(&state.pool, id)
        .await?
        .ok_or_else(|| foodgram_shared::Error::NotFound("Not found.".to_string()))?;

    foodgram_shopping::remove_from_cart(&state.pool, auth.user_id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn download_shopping_cart(
    State(state): State<AppState>,
    auth: Auth,
) -> ApiResult<([(header::HeaderName, &'static str); 2], String)> {
    let user = foodgram_user::get_user(&state.pool, auth.user_id)
        .await?
        .ok_or(foodgram_shared::Error::Unauthorized)?;

    let items = foodgram_shopping::shopping_items(&state.pool, auth.user_id).await?;
    let pairs = foodgram_shopping::cart_ingredient_recipes(&state.pool, auth.user_id).await?;
    let text = foodgram_shopping::render_shopping_list(&user.username, &items, &pairs);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shopping_list.txt\"",
            ),
        ],
        text,
    ))
}

pub async fn get_link(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    foodgram_recipe::get_recipe(&state.pool, id)
        .await?
        .ok_or_else(|| foodgram_shared::Error::NotFound("Not found.".to_string()))?;

    let base = state.base_url.trim_end_matches('/');

    Ok(Json(json!({ "short-link": format!("{base}/s/{id}") })))
}

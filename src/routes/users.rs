use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
};
use foodgram_shared::{Page, PageQuery, invalid};
use foodgram_user::{RegisterInput, SetPasswordInput};
use serde::Deserialize;
use serde_json::{Value, json};

use super::AppState;
use super::serializers::{author_with_recipes_json, media_url, profile_json};
use crate::error::ApiResult;
use crate::media::{delete_media, save_base64_image};
use crate::middleware::{Auth, MaybeAuth};
use crate::pagination::page_links;

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub password: String,
}

pub async fn post_register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let user = foodgram_user::register(
        &state.pool,
        RegisterInput {
            email: payload.email,
            username: payload.username,
            first_name: payload.first_name,
            last_name: payload.last_name,
            password: payload.password,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": user.id,
            "email": user.email,
            "username": user.username,
            "first_name": user.first_name,
            "last_name": user.last_name,
        })),
    ))
}

pub async fn get_users(
    State(state): State<AppState>,
    auth: MaybeAuth,
    uri: Uri,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Page<Value>>> {
    let limit = query.limit_or(state.page_size);
    let offset = query.offset(state.page_size);

    let users = foodgram_user::list_users(&state.pool, limit, offset).await?;
    let count = foodgram_user::count_users(&state.pool).await?;

    let mut results = Vec::with_capacity(users.len());
    for user in &users {
        results.push(profile_json(&state, user, auth.user_id()).await?);
    }

    let mut page = Page::new(count, results);
    (page.next, page.previous) = page_links(&state.base_url, &uri, query.page(), limit, count);

    Ok(Json(page))
}

pub async fn get_me(State(state): State<AppState>, auth: Auth) -> ApiResult<Json<Value>> {
    let user = foodgram_user::get_user(&state.pool, auth.user_id)
        .await?
        .ok_or(foodgram_shared::Error::Unauthorized)?;

    Ok(Json(profile_json(&state, &user, Some(auth.user_id)).await?))
}

pub async fn get_user_detail(
    State(state): State<AppState>,
    auth: MaybeAuth,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let user = foodgram_user::get_user(&state.pool, id)
        .await?
        .ok_or_else(|| foodgram_shared::Error::NotFound("Not found.".to_string()))?;

    Ok(Json(profile_json(&state, &user, auth.user_id()).await?))
}

#[derive(Debug, Deserialize)]
pub struct AvatarPayload {
    #[serde(default)]
    pub avatar: String,
}

pub async fn put_avatar(
    State(state): State<AppState>,
    auth: Auth,
    Json(payload): Json<AvatarPayload>,
) -> ApiResult<Json<Value>> {
    if payload.avatar.is_empty() {
        invalid!("Avatar image is required.");
    }

    let user = foodgram_user::get_user(&state.pool, auth.user_id)
        .await?
        .ok_or(foodgram_shared::Error::Unauthorized)?;

    let relative = save_base64_image(&state.media_root, "avatars", &payload.avatar)?;

    if let Err(err) = foodgram_user::set_avatar(&state.pool, auth.user_id, Some(relative.clone())).await
    {
        delete_media(&state.media_root, &relative);
        return Err(err.into());
    }

    if let Some(old) = user.avatar.as_deref() {
        delete_media(&state.media_root, old);
    }

    Ok(Json(json!({ "avatar": media_url(&state, &relative) })))
}

pub async fn delete_avatar(State(state): State<AppState>, auth: Auth) -> ApiResult<StatusCode> {
    let user = foodgram_user::get_user(&state.pool, auth.user_id)
        .await?
        .ok_or(foodgram_shared::Error::Unauthorized)?;

    foodgram_user::set_avatar(&state.pool, auth.user_id, None).await?;

    if let Some(old) = user.avatar.as_deref() {
        delete_media(&state.media_root, old);
    }

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct SetPasswordPayload {
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub current_password: String,
}

pub async fn post_set_password(
    State(state): State<AppState>,
    auth: Auth,
    Json(payload): Json<SetPasswordPayload>,
) -> ApiResult<StatusCode> {
    foodgram_user::set_password(
        &state.pool,
        auth.user_id,
        SetPasswordInput {
            new_password: payload.new_password,
            current_password: payload.current_password,
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct SubscriptionQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub recipes_limit: Option<i64>,
}

pub async fn get_subscriptions(
    State(state): State<AppState>,
    auth: Auth,
    uri: Uri,
    Query(query): Query<SubscriptionQuery>,
) -> ApiResult<Json<Page<Value>>> {
    let page_query = PageQuery {
        page: query.page,
        limit: query.limit,
    };
    let limit = page_query.limit_or(state.page_size);
    let offset = page_query.offset(state.page_size);

    let authors =
        foodgram_user::subscription::list_subscribed_authors(&state.pool, auth.user_id, limit, offset)
            .await?;
    let count =
        foodgram_user::subscription::count_subscribed_authors(&state.pool, auth.user_id).await?;

    let mut results = Vec::with_capacity(authors.len());
    for author in &authors {
        results.push(
            author_with_recipes_json(&state, author, Some(auth.user_id), query.recipes_limit)
                .await?,
        );
    }

    let mut page = Page::new(count, results);
    (page.next, page.previous) = page_links(&state.base_url, &uri, page_query.page(), limit, count);

    Ok(Json(page))
}

#[derive(Debug, Deserialize)]
pub struct SubscribeQuery {
    pub recipes_limit: Option<i64>,
}

pub async fn post_subscribe(
    State(state): State<AppState>,
    auth: Auth,
    Path(id): Path<i64>,
    Query(query): Query<SubscribeQuery>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let author = foodgram_user::get_user(&state.pool, id)
        .await?
        .ok_or_else(|| foodgram_shared::Error::NotFound("Not found.".to_string()))?;

    foodgram_user::subscription::subscribe(&state.pool, auth.user_id, id).await?;

    let body =
        author_with_recipes_json(&state, &author, Some(auth.user_id), query.recipes_limit).await?;

    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn delete_subscribe(
    State(state): State<AppState>,
    auth: Auth,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    foodgram_user::get_user(&state.pool, id)
        .await?
        .ok_or_else(|| foodgram_shared::Error::NotFound("Not found.".to_string()))?;

    foodgram_user::subscription::unsubscribe(&state.pool, auth.user_id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

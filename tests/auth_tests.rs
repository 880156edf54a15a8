use axum::http::StatusCode;
use serde_json::json;

mod helpers;

use helpers::{register_and_login, request, spawn_app};

#[tokio::test]
async fn register_then_login_then_me() -> anyhow::Result<()> {
    let app = spawn_app().await?;

    let (status, body) = request(
        &app,
        "POST",
        "/api/users/",
        None,
        Some(json!({
            "email": "alice@foodgram.localhost",
            "username": "alice",
            "first_name": "Alice",
            "last_name": "Tester",
            "password": "my_password",
        })),
    )
    .await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "alice@foodgram.localhost");
    assert_eq!(body["username"], "alice");
    assert!(body["id"].is_i64());
    assert!(body.get("password").is_none());

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/token/login/",
        None,
        Some(json!({
            "email": "alice@foodgram.localhost",
            "password": "my_password",
        })),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    let token = body["auth_token"].as_str().unwrap().to_owned();

    let (status, body) = request(&app, "GET", "/api/users/me/", Some(&token), None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["is_subscribed"], false);
    assert_eq!(body["avatar"], serde_json::Value::Null);

    Ok(())
}

#[tokio::test]
async fn login_with_wrong_password() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    register_and_login(&app, "alice").await?;

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/token/login/",
        None,
        Some(json!({
            "email": "alice@foodgram.localhost",
            "password": "wrong_password",
        })),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Unable to log in with provided credentials.");

    Ok(())
}

#[tokio::test]
async fn register_rejects_duplicate_email() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    register_and_login(&app, "alice").await?;

    let (status, body) = request(
        &app,
        "POST",
        "/api/users/",
        None,
        Some(json!({
            "email": "alice@foodgram.localhost",
            "username": "alice2",
            "first_name": "Alice",
            "last_name": "Tester",
            "password": "my_password",
        })),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "A user with this email already exists.");

    Ok(())
}

#[tokio::test]
async fn register_rejects_short_password() -> anyhow::Result<()> {
    let app = spawn_app().await?;

    let (status, _) = request(
        &app,
        "POST",
        "/api/users/",
        None,
        Some(json!({
            "email": "bob@foodgram.localhost",
            "username": "bob",
            "first_name": "Bob",
            "last_name": "Tester",
            "password": "short",
        })),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn me_requires_authentication() -> anyhow::Result<()> {
    let app = spawn_app().await?;

    let (status, body) = request(&app, "GET", "/api/users/me/", None, None).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Authentication credentials were not provided.");

    let (status, _) = request(&app, "GET", "/api/users/me/", Some("not-a-token"), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn logout_returns_no_content() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (_, token) = register_and_login(&app, "alice").await?;

    let (status, _) = request(&app, "POST", "/api/auth/token/logout/", Some(&token), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request(&app, "POST", "/api/auth/token/logout/", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn set_password_flow() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (_, token) = register_and_login(&app, "alice").await?;

    let (status, body) = request(
        &app,
        "POST",
        "/api/users/set_password/",
        Some(&token),
        Some(json!({
            "current_password": "wrong_password",
            "new_password": "another_password",
        })),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Current password is incorrect.");

    let (status, _) = request(
        &app,
        "POST",
        "/api/users/set_password/",
        Some(&token),
        Some(json!({
            "current_password": "my_password",
            "new_password": "another_password",
        })),
    )
    .await?;

    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/token/login/",
        None,
        Some(json!({
            "email": "alice@foodgram.localhost",
            "password": "another_password",
        })),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);

    Ok(())
}

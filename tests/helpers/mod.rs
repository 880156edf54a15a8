use std::path::PathBuf;
use std::str::FromStr;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use foodgram::AppState;
use http_body_util::BodyExt;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use temp_dir::TempDir;
use tower::ServiceExt;

// 1x1 transparent png
pub const PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub media_root: PathBuf,
    _dir: TempDir,
}

pub async fn spawn_app() -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let db_path = dir.child("db.sqlite3");
    let media_root = dir.child("media");

    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    foodgram_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);

    let state = AppState {
        pool: pool.clone(),
        jwt_secret: "test-secret-key-at-least-32-characters".to_string(),
        jwt_lifetime_seconds: 3600,
        base_url: "http://localhost:8000".to_string(),
        media_root: media_root.clone(),
        page_size: 6,
    };

    Ok(TestApp {
        router: foodgram::create_app(state),
        pool,
        media_root,
        _dir: dir,
    })
}

/// Drive one request through the router and decode the JSON response.
pub async fn request(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.router.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();

    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, value))
}

/// Register a user through the API and log them in.
pub async fn register_and_login(app: &TestApp, name: &str) -> anyhow::Result<(i64, String)> {
    let (status, body) = request(
        app,
        "POST",
        "/api/users/",
        None,
        Some(serde_json::json!({
            "email": format!("{name}@foodgram.localhost"),
            "username": name,
            "first_name": name,
            "last_name": "Tester",
            "password": "my_password",
        })),
    )
    .await?;
    anyhow::ensure!(status == StatusCode::CREATED, "register failed: {body}");
    let user_id = body["id"].as_i64().unwrap();

    let (status, body) = request(
        app,
        "POST",
        "/api/auth/token/login/",
        None,
        Some(serde_json::json!({
            "email": format!("{name}@foodgram.localhost"),
            "password": "my_password",
        })),
    )
    .await?;
    anyhow::ensure!(status == StatusCode::OK, "login failed: {body}");
    let token = body["auth_token"].as_str().unwrap().to_owned();

    Ok((user_id, token))
}

#[allow(dead_code)]
pub async fn create_tag(app: &TestApp, name: &str, slug: &str) -> anyhow::Result<i64> {
    let id = sqlx::query("INSERT INTO tag (name, slug) VALUES (?1, ?2)")
        .bind(name)
        .bind(slug)
        .execute(&app.pool)
        .await?
        .last_insert_rowid();

    Ok(id)
}

#[allow(dead_code)]
pub async fn create_ingredient(app: &TestApp, name: &str, unit: &str) -> anyhow::Result<i64> {
    let id = sqlx::query("INSERT INTO ingredient (name, measurement_unit) VALUES (?1, ?2)")
        .bind(name)
        .bind(unit)
        .execute(&app.pool)
        .await?
        .last_insert_rowid();

    Ok(id)
}

/// Create a recipe through the API, returns the recipe id.
#[allow(dead_code)]
pub async fn create_recipe(
    app: &TestApp,
    token: &str,
    name: &str,
    tags: Vec<i64>,
    ingredients: Vec<(i64, i64)>,
) -> anyhow::Result<i64> {
    let ingredients: Vec<serde_json::Value> = ingredients
        .into_iter()
        .map(|(id, amount)| serde_json::json!({ "id": id, "amount": amount }))
        .collect();

    let (status, body) = request(
        app,
        "POST",
        "/api/recipes/",
        Some(token),
        Some(serde_json::json!({
            "name": name,
            "image": PNG_DATA_URL,
            "text": format!("How to cook {name}"),
            "cooking_time": 30,
            "ingredients": ingredients,
            "tags": tags,
        })),
    )
    .await?;
    anyhow::ensure!(status == StatusCode::CREATED, "create recipe failed: {body}");

    Ok(body["id"].as_i64().unwrap())
}

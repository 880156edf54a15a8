use axum::http::StatusCode;

mod helpers;

use helpers::{create_ingredient, create_tag, request, spawn_app};

#[tokio::test]
async fn tag_list_and_detail() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let breakfast = create_tag(&app, "Breakfast", "breakfast").await?;
    create_tag(&app, "Dinner", "dinner").await?;

    let (status, body) = request(&app, "GET", "/api/tags/", None, None).await?;

    assert_eq!(status, StatusCode::OK);
    let tags = body.as_array().unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0]["name"], "Breakfast");
    assert_eq!(tags[0]["slug"], "breakfast");

    let (status, body) = request(&app, "GET", &format!("/api/tags/{breakfast}/"), None, None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "breakfast");

    let (status, body) = request(&app, "GET", "/api/tags/9999/", None, None).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Not found.");

    Ok(())
}

#[tokio::test]
async fn ingredient_list_filters_by_name_prefix() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    create_ingredient(&app, "milk", "ml").await?;
    create_ingredient(&app, "milk powder", "g").await?;
    let eggs = create_ingredient(&app, "eggs", "pcs").await?;

    let (status, body) = request(&app, "GET", "/api/ingredients/", None, None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, body) = request(&app, "GET", "/api/ingredients/?name=milk", None, None).await?;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["name"], "milk");
    assert_eq!(results[1]["name"], "milk powder");

    let (status, body) =
        request(&app, "GET", &format!("/api/ingredients/{eggs}/"), None, None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "eggs");
    assert_eq!(body["measurement_unit"], "pcs");

    let (status, _) = request(&app, "GET", "/api/ingredients/9999/", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

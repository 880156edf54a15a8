use foodgram_user::RegisterInput;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn validate_unique_emails() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    helpers::create_user(&pool, "john").await?;
    let second = foodgram_user::register(
        &pool,
        RegisterInput {
            email: "john@foodgram.localhost".to_owned(),
            username: "john2".to_owned(),
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            password: "my_password".to_owned(),
        },
    )
    .await;

    assert_eq!(
        second.unwrap_err().to_string(),
        "A user with this email already exists.".to_owned()
    );

    Ok(())
}

#[tokio::test]
async fn validate_unique_usernames() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    helpers::create_user(&pool, "john").await?;
    let second = foodgram_user::register(
        &pool,
        RegisterInput {
            email: "other@foodgram.localhost".to_owned(),
            username: "john".to_owned(),
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            password: "my_password".to_owned(),
        },
    )
    .await;

    assert_eq!(
        second.unwrap_err().to_string(),
        "A user with this username already exists.".to_owned()
    );

    Ok(())
}

#[tokio::test]
async fn rejects_short_password_and_bad_username() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    let short = foodgram_user::register(
        &pool,
        RegisterInput {
            email: "short@foodgram.localhost".to_owned(),
            username: "short".to_owned(),
            first_name: "Short".to_owned(),
            last_name: "Pass".to_owned(),
            password: "1234567".to_owned(),
        },
    )
    .await;
    assert!(short.is_err());

    let bad_username = foodgram_user::register(
        &pool,
        RegisterInput {
            email: "bad@foodgram.localhost".to_owned(),
            username: "bad username!".to_owned(),
            first_name: "Bad".to_owned(),
            last_name: "Name".to_owned(),
            password: "my_password".to_owned(),
        },
    )
    .await;
    assert!(bad_username.is_err());

    Ok(())
}

#[tokio::test]
async fn stores_profile_fields() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    let user = helpers::create_user(&pool, "alice").await?;

    assert_eq!(user.email, "alice@foodgram.localhost");
    assert_eq!(user.username, "alice");
    assert_eq!(user.last_name, "Tester");
    assert!(user.avatar.is_none());
    assert_ne!(user.hashed_password, "my_password");

    Ok(())
}

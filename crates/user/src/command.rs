use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

use foodgram_db::table::User;
use foodgram_shared::{Error, Result, invalid};
use regex::Regex;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::password::{hash_password, verify_password};
use crate::query::{find_by_email, get_user};
use crate::types::UserRow;

static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").unwrap());

fn validate_username(username: &str) -> std::result::Result<(), ValidationError> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err(ValidationError::new("username")
            .with_message("Username may contain only letters, digits and @/./+/-/_ characters.".into()))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 150), custom(function = "validate_username"))]
    pub username: String,
    #[validate(length(min = 1, max = 150))]
    pub first_name: String,
    #[validate(length(min = 1, max = 150))]
    pub last_name: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetPasswordInput {
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
    pub current_password: String,
}

fn unix_now() -> Result<i64> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?;

    Ok(now.as_secs() as i64)
}

pub async fn register(pool: &sqlx::SqlitePool, input: RegisterInput) -> Result<UserRow> {
    input.validate()?;

    let hashed_password = hash_password(&input.password)?;

    let statment = Query::insert()
        .into_table(User::Table)
        .columns([
            User::Email,
            User::Username,
            User::FirstName,
            User::LastName,
            User::HashedPassword,
            User::CreatedAt,
        ])
        .values_panic([
            input.email.into(),
            input.username.into(),
            input.first_name.into(),
            input.last_name.into(),
            hashed_password.into(),
            unix_now()?.into(),
        ])
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    // Duplicate email/username surfaces here as a unique violation
    let id = match sqlx::query_with(&sql, values).execute(pool).await {
        Ok(result) => result.last_insert_rowid(),
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            if err.message().contains("email") {
                invalid!("A user with this email already exists.");
            }
            invalid!("A user with this username already exists.");
        }
        Err(err) => return Err(err.into()),
    };

    let user = get_user(pool, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("User {id} not found")))?;

    Ok(user)
}

pub async fn login(pool: &sqlx::SqlitePool, email: &str, password: &str) -> Result<UserRow> {
    let Some(user) = find_by_email(pool, email).await? else {
        invalid!("Unable to log in with provided credentials.");
    };

    if !verify_password(password, &user.hashed_password)? {
        invalid!("Unable to log in with provided credentials.");
    }

    Ok(user)
}

pub async fn set_password(
    pool: &sqlx::SqlitePool,
    user_id: i64,
    input: SetPasswordInput,
) -> Result<()> {
    input.validate()?;

    let user = get_user(pool, user_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("User {user_id} not found")))?;

    if !verify_password(&input.current_password, &user.hashed_password)? {
        invalid!("Current password is incorrect.");
    }

    let hashed_password = hash_password(&input.new_password)?;

    let statment = Query::update()
        .table(User::Table)
        .value(User::HashedPassword, hashed_password)
        .and_where(Expr::col(User::Id).eq(user_id))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub async fn set_avatar(
    pool: &sqlx::SqlitePool,
    user_id: i64,
    avatar: Option<String>,
) -> Result<()> {
    let statment = Query::update()
        .table(User::Table)
        .value(User::Avatar, avatar)
        .and_where(Expr::col(User::Id).eq(user_id))
        .to_owned();
    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

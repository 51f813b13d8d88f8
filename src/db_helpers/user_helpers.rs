use sqlx::{Sqlite, SqlitePool};

use crate::{data_formats::AddUserRequest, errors::ApiError, models::User};

pub async fn insert_user(pool: &SqlitePool, user: &AddUserRequest) -> Result<i64, ApiError> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (api_key, name)
        VALUES ($1, $2)
        "#,
    )
    .bind(&user.api_key)
    .bind(&user.name)
    .execute(pool)
    .await
    .map_err(|e| ApiError::conflict_on_unique(e, "api_key is already registered."))?;
    Ok(result.last_insert_rowid())
}

pub async fn get_followers_in_db(pool: &SqlitePool, user_id: i64) -> Result<Vec<User>, ApiError> {
    let result = sqlx::query_as::<Sqlite, User>(
        r#"
        SELECT users.id, users.api_key, users.name, users.created_at
        FROM users
        JOIN follows ON follows.follower_id = users.id
        WHERE follows.followed_id = $1
        ORDER BY users.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(result)
}

pub async fn get_following_in_db(pool: &SqlitePool, user_id: i64) -> Result<Vec<User>, ApiError> {
    let result = sqlx::query_as::<Sqlite, User>(
        r#"
        SELECT users.id, users.api_key, users.name, users.created_at
        FROM users
        JOIN follows ON follows.followed_id = users.id
        WHERE follows.follower_id = $1
        ORDER BY users.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(result)
}

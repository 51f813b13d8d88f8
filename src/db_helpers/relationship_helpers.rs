use sqlx::{Sqlite, SqlitePool};

use crate::{errors::ApiError, models::User};

pub async fn follow_user_in_db(
    pool: &SqlitePool,
    follower_id: i64,
    followed_id: i64,
) -> Result<(), ApiError> {
    let existing = sqlx::query(
        r#"
        SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = $2
        "#,
    )
    .bind(follower_id)
    .bind(followed_id)
    .fetch_optional(pool)
    .await?;
    if existing.is_some() {
        return Err(ApiError::Conflict("You are already following this user."));
    }

    sqlx::query(
        r#"
        INSERT INTO follows (follower_id, followed_id)
        VALUES ($1, $2)
        "#,
    )
    .bind(follower_id)
    .bind(followed_id)
    .execute(pool)
    .await
    .map_err(|e| ApiError::conflict_on_unique(e, "You are already following this user."))?;
    Ok(())
}

pub async fn unfollow_user_in_db(
    pool: &SqlitePool,
    follower_id: i64,
    followed_id: i64,
) -> Result<(), ApiError> {
    let result = sqlx::query(
        r#"
        DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2
        "#,
    )
    .bind(follower_id)
    .bind(followed_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("You are not following this user."));
    }
    Ok(())
}

pub async fn like_tweet_in_db(
    pool: &SqlitePool,
    user_id: i64,
    tweet_id: i64,
) -> Result<(), ApiError> {
    let existing = sqlx::query(
        r#"
        SELECT 1 FROM likes WHERE user_id = $1 AND tweet_id = $2
        "#,
    )
    .bind(user_id)
    .bind(tweet_id)
    .fetch_optional(pool)
    .await?;
    if existing.is_some() {
        return Err(ApiError::Conflict("You have already liked this tweet."));
    }

    sqlx::query(
        r#"
        INSERT INTO likes (user_id, tweet_id)
        VALUES ($1, $2)
        "#,
    )
    .bind(user_id)
    .bind(tweet_id)
    .execute(pool)
    .await
    .map_err(|e| ApiError::conflict_on_unique(e, "You have already liked this tweet."))?;
    Ok(())
}

pub async fn unlike_tweet_in_db(
    pool: &SqlitePool,
    user_id: i64,
    tweet_id: i64,
) -> Result<(), ApiError> {
    let result = sqlx::query(
        r#"
        DELETE FROM likes WHERE user_id = $1 AND tweet_id = $2
        "#,
    )
    .bind(user_id)
    .bind(tweet_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Like is not found."));
    }
    Ok(())
}

pub async fn get_likers_in_db(pool: &SqlitePool, tweet_id: i64) -> Result<Vec<User>, ApiError> {
    let result = sqlx::query_as::<Sqlite, User>(
        r#"
        SELECT users.id, users.api_key, users.name, users.created_at
        FROM users
        JOIN likes ON likes.user_id = users.id
        WHERE likes.tweet_id = $1
        ORDER BY users.id
        "#,
    )
    .bind(tweet_id)
    .fetch_all(pool)
    .await?;
    Ok(result)
}

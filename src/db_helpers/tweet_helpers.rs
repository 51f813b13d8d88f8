use sqlx::{Sqlite, SqlitePool};

use crate::errors::ApiError;
use crate::models::{FeedTweet, Tweet};

use super::bind_images_to_tweet;

const FEED_QUERY: &str = r#"
            SELECT tweets.id            AS "id",
                   tweets.body          AS "body",
                   tweets.author_id     AS "author_id",
                   users.name           AS "author_name",
                   tweets.created_at    AS "created_at",
                   COUNT(likes.user_id) AS "like_count"
            FROM   tweets
                JOIN users
                    ON users.id = tweets.author_id
                LEFT JOIN likes
                        ON likes.tweet_id = tweets.id
            GROUP  BY tweets.id
            ORDER  BY like_count DESC, tweets.id DESC
            LIMIT  $1
     "#;

const FOLLOWED_FEED_QUERY: &str = r#"
            SELECT tweets.id            AS "id",
                   tweets.body          AS "body",
                   tweets.author_id     AS "author_id",
                   users.name           AS "author_name",
                   tweets.created_at    AS "created_at",
                   COUNT(likes.user_id) AS "like_count"
            FROM   tweets
                JOIN users
                    ON users.id = tweets.author_id
                JOIN follows
                    ON follows.followed_id = tweets.author_id
                LEFT JOIN likes
                        ON likes.tweet_id = tweets.id
            WHERE  follows.follower_id = $1
            GROUP  BY tweets.id
            ORDER  BY like_count DESC, tweets.id DESC
            LIMIT  $2
     "#;

/// The ranked feed: like count descending, ties broken by tweet id
/// descending, truncated to `limit` rows. Zero-like tweets are kept by the
/// outer join with a count of zero.
pub async fn list_feed_in_db(
    pool: &SqlitePool,
    user_id: i64,
    followed_only: bool,
    limit: u32,
) -> Result<Vec<FeedTweet>, ApiError> {
    let result = if followed_only {
        sqlx::query_as::<Sqlite, FeedTweet>(FOLLOWED_FEED_QUERY)
            .bind(user_id)
            .bind(limit as i64)
            .fetch_all(pool)
            .await?
    } else {
        sqlx::query_as::<Sqlite, FeedTweet>(FEED_QUERY)
            .bind(limit as i64)
            .fetch_all(pool)
            .await?
    };
    Ok(result)
}

pub async fn insert_tweet_in_db(
    pool: &SqlitePool,
    author_id: i64,
    body: &str,
    media_ids: &[i64],
) -> Result<i64, ApiError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO tweets (body, author_id)
        VALUES ($1, $2)
        "#,
    )
    .bind(body)
    .bind(author_id)
    .execute(&mut tx)
    .await?;

    let tweet_id = result.last_insert_rowid();
    bind_images_to_tweet(&mut tx, tweet_id, media_ids).await?;
    tx.commit().await?;

    Ok(tweet_id)
}

pub async fn get_tweet_by_id(
    pool: &SqlitePool,
    tweet_id: i64,
) -> Result<Option<Tweet>, sqlx::Error> {
    sqlx::query_as::<Sqlite, Tweet>(
        r#"
        SELECT id, body, author_id, created_at FROM tweets WHERE id = $1
        "#,
    )
    .bind(tweet_id)
    .fetch_optional(pool)
    .await
}

/// Deletes the tweet together with its like edges and image rows, returning
/// the stored file names so the caller can clean the media directory.
pub async fn delete_tweet_in_db(pool: &SqlitePool, tweet_id: i64) -> Result<Vec<String>, ApiError> {
    let mut tx = pool.begin().await?;

    let file_names = sqlx::query_scalar::<Sqlite, String>(
        r#"
        SELECT file_name FROM images WHERE tweet_id = $1
        "#,
    )
    .bind(tweet_id)
    .fetch_all(&mut tx)
    .await?;

    sqlx::query("DELETE FROM images WHERE tweet_id = $1")
        .bind(tweet_id)
        .execute(&mut tx)
        .await?;
    sqlx::query("DELETE FROM likes WHERE tweet_id = $1")
        .bind(tweet_id)
        .execute(&mut tx)
        .await?;
    sqlx::query("DELETE FROM tweets WHERE id = $1")
        .bind(tweet_id)
        .execute(&mut tx)
        .await?;

    tx.commit().await?;
    Ok(file_names)
}

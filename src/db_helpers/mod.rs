use sqlx::{Sqlite, SqlitePool};

use crate::models::User;

mod image_helpers;
mod relationship_helpers;
mod tweet_helpers;
mod user_helpers;

pub use image_helpers::*;
pub use relationship_helpers::*;
pub use tweet_helpers::*;
pub use user_helpers::*;

// ----------------- Helper Functions -----------------

pub async fn get_user_by_api_key(
    pool: &SqlitePool,
    api_key: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<Sqlite, User>(
        r#"
        SELECT id, api_key, name, created_at FROM users WHERE api_key = $1
        "#,
    )
    .bind(api_key)
    .fetch_optional(pool)
    .await
}

pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<Sqlite, User>(
        r#"
        SELECT id, api_key, name, created_at FROM users WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

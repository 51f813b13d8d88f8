use sqlx::{Sqlite, SqlitePool, Transaction};

pub async fn insert_image_in_db(pool: &SqlitePool, file_name: &str) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO images (file_name)
        VALUES ($1)
        "#,
    )
    .bind(file_name)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Binds the listed image ids to a freshly inserted tweet, keeping the
/// listed order as the attachment position. Ids that do not resolve to an
/// unbound image row are skipped.
pub(crate) async fn bind_images_to_tweet(
    tx: &mut Transaction<'_, Sqlite>,
    tweet_id: i64,
    media_ids: &[i64],
) -> Result<(), sqlx::Error> {
    for (position, image_id) in media_ids.iter().enumerate() {
        sqlx::query(
            r#"
            UPDATE images SET tweet_id = $1, position = $2
            WHERE id = $3 AND tweet_id IS NULL
            "#,
        )
        .bind(tweet_id)
        .bind(position as i64)
        .bind(image_id)
        .execute(&mut *tx)
        .await?;
    }
    Ok(())
}

pub async fn get_attachments_in_db(
    pool: &SqlitePool,
    tweet_id: i64,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<Sqlite, String>(
        r#"
        SELECT file_name FROM images WHERE tweet_id = $1 ORDER BY position, id
        "#,
    )
    .bind(tweet_id)
    .fetch_all(pool)
    .await
}

use chrono::NaiveDateTime;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub api_key: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Tweet {
    pub id: i64,
    pub body: String,
    pub author_id: i64,
    pub created_at: NaiveDateTime,
}

/// One row of the ranked feed query: a tweet joined with its author and its
/// like count.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FeedTweet {
    pub id: i64,
    pub body: String,
    pub author_id: i64,
    pub author_name: String,
    pub like_count: i64,
    pub created_at: NaiveDateTime,
}

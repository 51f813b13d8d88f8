use serde::{Deserialize, Serialize};

use crate::models::{FeedTweet, User};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
}

/// Same payload as [`UserSummary`]; the feed contract names the id field
/// `user_id` inside a tweet's likes list.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LikerSummary {
    pub user_id: i64,
    pub name: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct TweetResponse {
    pub id: i64,
    pub content: String,
    pub attachments: Vec<String>,
    pub author: UserSummary,
    pub likes: Vec<LikerSummary>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ProfileResponse {
    pub id: i64,
    pub name: String,
    pub followers: Vec<UserSummary>,
    pub following: Vec<UserSummary>,
}

impl UserSummary {
    pub fn new(User { id, name, .. }: User) -> Self {
        UserSummary { id, name }
    }
}

impl LikerSummary {
    pub fn new(User { id, name, .. }: User) -> Self {
        LikerSummary { user_id: id, name }
    }
}

impl TweetResponse {
    pub fn new(
        FeedTweet {
            id,
            body,
            author_id,
            author_name,
            ..
        }: FeedTweet,
        attachments: Vec<String>,
        likers: Vec<User>,
    ) -> Self {
        TweetResponse {
            id,
            content: body,
            attachments,
            author: UserSummary {
                id: author_id,
                name: author_name,
            },
            likes: likers.into_iter().map(LikerSummary::new).collect(),
        }
    }
}

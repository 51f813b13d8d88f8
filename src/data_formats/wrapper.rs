use serde::{Deserialize, Serialize};

use super::response::{ProfileResponse, TweetResponse};

#[derive(Debug, Deserialize, Serialize)]
pub struct SuccessResponse {
    pub result: bool,
}

impl SuccessResponse {
    pub fn ok() -> SuccessResponse {
        SuccessResponse { result: true }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct FeedWrapper {
    pub result: bool,
    pub tweets: Vec<TweetResponse>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ProfileWrapper {
    pub result: bool,
    pub user: ProfileResponse,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TweetCreated {
    pub result: bool,
    pub tweet_id: i64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MediaUploaded {
    pub result: bool,
    pub media_id: i64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UserCreated {
    pub result: bool,
    pub user_id: i64,
}

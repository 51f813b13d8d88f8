use serde::{Deserialize, Serialize};

use crate::config::{API_KEY_MAX_LEN, API_KEY_MIN_LEN, NAME_MAX_LEN, TWEET_MAX_LEN, TWEET_MIN_LEN};
use crate::errors::ApiError;

// ----------------- Tweet Request -----------------
#[derive(Deserialize, Serialize, Debug)]
pub struct AddTweetRequest {
    pub tweet_data: String,
    /// Ids returned by the media upload endpoint, in display order.
    pub tweet_media_ids: Vec<i64>,
}

impl AddTweetRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let length = self.tweet_data.chars().count();
        if length < TWEET_MIN_LEN {
            return Err(ApiError::Validation("tweet_data is too short"));
        }
        if length > TWEET_MAX_LEN {
            return Err(ApiError::Validation("tweet_data is too long"));
        }
        Ok(())
    }
}

// ----------------- User Request -----------------
#[derive(Deserialize, Serialize, Debug)]
pub struct AddUserRequest {
    pub name: String,
    pub api_key: String,
}

impl AddUserRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let key_length = self.api_key.chars().count();
        if !(API_KEY_MIN_LEN..=API_KEY_MAX_LEN).contains(&key_length) {
            return Err(ApiError::Validation(
                "api_key must be between 5 and 50 characters",
            ));
        }
        let name_length = self.name.chars().count();
        if name_length == 0 || name_length > NAME_MAX_LEN {
            return Err(ApiError::Validation(
                "name must be between 1 and 50 characters",
            ));
        }
        Ok(())
    }
}

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sqlx::SqlitePool;

use crate::db_helpers::get_user_by_api_key;
use crate::errors::ApiError;
use crate::models::User;

pub const API_KEY_HEADER: &str = "api-key";

/// Opaque bearer credential carried by the `api-key` request header.
pub struct ApiKey(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for ApiKey
where
    S: Send + Sync + 'static,
{
    type Rejection = ApiError;
    async fn from_request_parts(
        parts: &mut Parts,
        _: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let header = match parts.headers.get(API_KEY_HEADER) {
            Some(header) => header,
            None => return Err(ApiError::Validation("api-key header is missing")),
        };
        let key = match header.to_str() {
            Ok(key) => key,
            Err(_) => return Err(ApiError::Validation("api-key header is not valid text")),
        };
        Ok(ApiKey(key.to_owned()))
    }
}

/// Resolves an api key to its user row. Every protected operation goes
/// through here before touching anything else.
pub async fn authenticate(pool: &SqlitePool, api_key: &str) -> Result<User, ApiError> {
    match get_user_by_api_key(pool, api_key).await? {
        Some(user) => Ok(user),
        None => Err(ApiError::NotFound("User is not found.")),
    }
}

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query},
    http::{StatusCode, Uri},
    Extension, Json,
};
use sqlx::SqlitePool;
use tracing::info;

use crate::{
    authentication::{authenticate, ApiKey},
    config::Config,
    data_formats::{
        AddTweetRequest, AddUserRequest, FeedQueryParams, FeedWrapper, MediaUploaded,
        ProfileResponse, ProfileWrapper, SuccessResponse, TweetCreated, TweetResponse, UserCreated,
        UserSummary,
    },
    db_helpers::{
        delete_tweet_in_db, follow_user_in_db, get_attachments_in_db, get_followers_in_db,
        get_following_in_db, get_likers_in_db, get_tweet_by_id, get_user_by_id, insert_image_in_db,
        insert_tweet_in_db, insert_user, like_tweet_in_db, list_feed_in_db, unfollow_user_in_db,
        unlike_tweet_in_db,
    },
    errors::{ApiError, ErrorEnvelope},
    media::MediaStore,
    models::User,
    JsonResponse,
};

type HandlerResult<T> = Result<JsonResponse<T>, ApiError>;

// ----------------- Helper Handlers -----------------
pub async fn alive() -> &'static str {
    "alive"
}

pub async fn not_found(uri: Uri) -> JsonResponse<ErrorEnvelope> {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorEnvelope::new(
            "Not Found",
            format!("URL {} provided was not found", uri),
        )),
    )
}

// ----------------- User Handlers -----------------
pub async fn register_user(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Json(request): Json<AddUserRequest>,
) -> HandlerResult<UserCreated> {
    request.validate()?;
    let user_id = insert_user(&pool, &request).await?;
    info!("Registered user {} ({})", user_id, request.name);
    Ok((
        StatusCode::CREATED,
        Json(UserCreated {
            result: true,
            user_id,
        }),
    ))
}

pub async fn get_current_user(
    Extension(pool): Extension<Arc<SqlitePool>>,
    ApiKey(api_key): ApiKey,
) -> HandlerResult<ProfileWrapper> {
    let user = authenticate(&pool, &api_key).await?;
    let profile = get_user_info(&pool, user).await?;
    Ok((StatusCode::OK, Json(profile)))
}

pub async fn get_profile(
    Extension(pool): Extension<Arc<SqlitePool>>,
    ApiKey(api_key): ApiKey,
    Path(user_id): Path<i64>,
) -> HandlerResult<ProfileWrapper> {
    authenticate(&pool, &api_key).await?;
    let user = get_user_by_id(&pool, user_id)
        .await?
        .ok_or(ApiError::NotFound("User is not found."))?;
    let profile = get_user_info(&pool, user).await?;
    Ok((StatusCode::OK, Json(profile)))
}

pub async fn follow_user(
    Extension(pool): Extension<Arc<SqlitePool>>,
    ApiKey(api_key): ApiKey,
    Path(user_id): Path<i64>,
) -> HandlerResult<SuccessResponse> {
    let user = authenticate(&pool, &api_key).await?;
    // Rejected before the store is touched.
    if user.id == user_id {
        return Err(ApiError::Conflict("You can not follow yourself."));
    }
    let followed = get_user_by_id(&pool, user_id)
        .await?
        .ok_or(ApiError::NotFound("User is not found."))?;
    follow_user_in_db(&pool, user.id, followed.id).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::ok())))
}

pub async fn unfollow_user(
    Extension(pool): Extension<Arc<SqlitePool>>,
    ApiKey(api_key): ApiKey,
    Path(user_id): Path<i64>,
) -> HandlerResult<SuccessResponse> {
    let user = authenticate(&pool, &api_key).await?;
    let followed = get_user_by_id(&pool, user_id)
        .await?
        .ok_or(ApiError::NotFound("User is not found."))?;
    unfollow_user_in_db(&pool, user.id, followed.id).await?;
    Ok((StatusCode::OK, Json(SuccessResponse::ok())))
}

// ----------------- Tweet Handlers -----------------
pub async fn list_tweets(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Extension(config): Extension<Arc<Config>>,
    ApiKey(api_key): ApiKey,
    Query(params): Query<FeedQueryParams>,
) -> HandlerResult<FeedWrapper> {
    let user = authenticate(&pool, &api_key).await?;
    let feed = tweet_constructor(&pool, user.id, params.followed, config.feed_limit).await?;
    Ok((StatusCode::OK, Json(feed)))
}

pub async fn add_tweet(
    Extension(pool): Extension<Arc<SqlitePool>>,
    ApiKey(api_key): ApiKey,
    Json(request): Json<AddTweetRequest>,
) -> HandlerResult<TweetCreated> {
    let user = authenticate(&pool, &api_key).await?;
    request.validate()?;
    let tweet_id =
        insert_tweet_in_db(&pool, user.id, &request.tweet_data, &request.tweet_media_ids).await?;
    Ok((
        StatusCode::CREATED,
        Json(TweetCreated {
            result: true,
            tweet_id,
        }),
    ))
}

pub async fn delete_tweet(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Extension(store): Extension<Arc<MediaStore>>,
    ApiKey(api_key): ApiKey,
    Path(tweet_id): Path<i64>,
) -> HandlerResult<SuccessResponse> {
    let user = authenticate(&pool, &api_key).await?;
    let tweet = get_tweet_by_id(&pool, tweet_id)
        .await?
        .ok_or(ApiError::NotFound("Tweet is not found."))?;
    if tweet.author_id != user.id {
        return Err(ApiError::Forbidden("You can not delete this tweet."));
    }
    let file_names = delete_tweet_in_db(&pool, tweet.id).await?;
    for file_name in &file_names {
        store.remove(file_name).await;
    }
    Ok((StatusCode::OK, Json(SuccessResponse::ok())))
}

pub async fn add_like(
    Extension(pool): Extension<Arc<SqlitePool>>,
    ApiKey(api_key): ApiKey,
    Path(tweet_id): Path<i64>,
) -> HandlerResult<SuccessResponse> {
    let user = authenticate(&pool, &api_key).await?;
    let tweet = get_tweet_by_id(&pool, tweet_id)
        .await?
        .ok_or(ApiError::NotFound("Tweet is not found."))?;
    like_tweet_in_db(&pool, user.id, tweet.id).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::ok())))
}

pub async fn remove_like(
    Extension(pool): Extension<Arc<SqlitePool>>,
    ApiKey(api_key): ApiKey,
    Path(tweet_id): Path<i64>,
) -> HandlerResult<SuccessResponse> {
    let user = authenticate(&pool, &api_key).await?;
    let tweet = get_tweet_by_id(&pool, tweet_id)
        .await?
        .ok_or(ApiError::NotFound("Tweet is not found."))?;
    unlike_tweet_in_db(&pool, user.id, tweet.id).await?;
    Ok((StatusCode::OK, Json(SuccessResponse::ok())))
}

// ----------------- Media Handlers -----------------
pub async fn upload_media(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Extension(store): Extension<Arc<MediaStore>>,
    ApiKey(api_key): ApiKey,
    mut multipart: Multipart,
) -> HandlerResult<MediaUploaded> {
    authenticate(&pool, &api_key).await?;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::Validation("multipart body is malformed"))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field
            .content_type()
            .map(str::to_owned)
            .ok_or(ApiError::UnsupportedMedia)?;
        if !MediaStore::is_allowed(&content_type) {
            return Err(ApiError::UnsupportedMedia);
        }
        let uploaded_name = field
            .file_name()
            .map(str::to_owned)
            .ok_or(ApiError::Validation("file name is missing"))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|_| ApiError::Validation("could not read the uploaded file"))?;

        let stored_name = store.save(&uploaded_name, &bytes).await?;
        let media_id = insert_image_in_db(&pool, &stored_name).await?;
        info!("Stored media {} as {}", media_id, stored_name);
        return Ok((
            StatusCode::CREATED,
            Json(MediaUploaded {
                result: true,
                media_id,
            }),
        ));
    }
    Err(ApiError::Validation("multipart field `file` is missing"))
}

// ----------------- Response Assembly -----------------

/// Shapes the ranked feed: attachments in position order, the author summary
/// and the liker summaries nested into each tweet record.
async fn tweet_constructor(
    pool: &SqlitePool,
    user_id: i64,
    followed_only: bool,
    limit: u32,
) -> Result<FeedWrapper, ApiError> {
    let feed = list_feed_in_db(pool, user_id, followed_only, limit).await?;
    let mut tweets = Vec::with_capacity(feed.len());
    for tweet in feed {
        let attachments = get_attachments_in_db(pool, tweet.id).await?;
        let likers = get_likers_in_db(pool, tweet.id).await?;
        tweets.push(TweetResponse::new(tweet, attachments, likers));
    }
    Ok(FeedWrapper {
        result: true,
        tweets,
    })
}

async fn get_user_info(pool: &SqlitePool, user: User) -> Result<ProfileWrapper, ApiError> {
    let followers = get_followers_in_db(pool, user.id).await?;
    let following = get_following_in_db(pool, user.id).await?;
    Ok(ProfileWrapper {
        result: true,
        user: ProfileResponse {
            id: user.id,
            name: user.name,
            followers: followers.into_iter().map(UserSummary::new).collect(),
            following: following.into_iter().map(UserSummary::new).collect(),
        },
    })
}

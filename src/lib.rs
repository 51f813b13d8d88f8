mod authentication;
mod config;
mod data_formats;
mod db_helpers;
mod errors;
mod handlers;
mod media;
mod models;

use anyhow::Context;
pub use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::{routing::*, Extension, Json, Router};
pub use config::Config;
use handlers::*;
use media::MediaStore;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::{
    net::{SocketAddr, TcpListener},
    sync::Arc,
};
use tracing::info;

pub type JsonResponse<T> = (StatusCode, Json<T>);

pub async fn run_app(app: Router, address: SocketAddr, config: Config) -> Result<()> {
    let db = init_db(&config.database_url).await?;
    serve_app(app, address, db, config).await
}

/// Attaches the shared state to the router and serves it. Split from
/// [`run_app`] so tests can hand in their own pool.
pub async fn serve_app(
    app: Router,
    address: SocketAddr,
    db: SqlitePool,
    config: Config,
) -> Result<()> {
    let store = MediaStore::new(config.media_dir.clone());
    store
        .ensure_dir()
        .context("Failed to create the media directory")?;
    let app = app
        .layer(Extension(Arc::new(db)))
        .layer(Extension(Arc::new(config)))
        .layer(Extension(Arc::new(store)))
        .layer(DefaultBodyLimit::max(crate::config::MAX_UPLOAD_BYTES));
    axum::Server::bind(&address)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

pub async fn init_db(database_url: &str) -> Result<SqlitePool> {
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        info!("Creating database {}", database_url);
        Sqlite::create_database(database_url)
            .await
            .context("Failed to create the database")?;
    }
    let pool = SqlitePool::connect(database_url).await?;
    info!("Running migrations");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    info!("Migrations completed");
    Ok(pool)
}

pub fn get_random_free_port() -> (u16, SocketAddr) {
    let listener = TcpListener::bind("localhost:0").unwrap();
    match listener.local_addr() {
        Ok(addr) => (addr.port(), addr),
        Err(_) => panic!("Could not get a free port"),
    }
}

pub fn make_router() -> Router {
    Router::new()
        .route("/check_health", get(alive))
        .route("/api/tweets", get(list_tweets).post(add_tweet))
        .route("/api/tweets/:tweet_id", delete(delete_tweet))
        .route(
            "/api/tweets/:tweet_id/likes",
            post(add_like).delete(remove_like),
        )
        .route("/api/users", post(register_user))
        .route("/api/users/me", get(get_current_user))
        .route("/api/users/:user_id", get(get_profile))
        .route(
            "/api/users/:user_id/follow",
            post(follow_user).delete(unfollow_user),
        )
        .route("/api/medias", post(upload_media))
        .fallback(not_found)
}

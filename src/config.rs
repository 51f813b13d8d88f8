use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use tracing::info;

/// Tweet bodies outside this range are rejected before reaching the store.
pub const TWEET_MIN_LEN: usize = 5;
pub const TWEET_MAX_LEN: usize = 10_000;

/// Length bounds for the opaque api key chosen at registration.
pub const API_KEY_MIN_LEN: usize = 5;
pub const API_KEY_MAX_LEN: usize = 50;

pub const NAME_MAX_LEN: usize = 50;

/// Request bodies above this size are rejected before any handler runs.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Local directory holding uploaded image bytes.
    pub media_dir: PathBuf,
    /// Number of tweets a single feed response may carry.
    pub feed_limit: u32,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: load_or("PORT", "3001")?,
            media_dir: PathBuf::from(load_or::<String>("MEDIA_DIR", "dist/images")?),
            feed_limit: load_or("FEED_LIMIT", "100")?,
        })
    }
}

fn load_or<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let value = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    value
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid {key} value {value}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_or_falls_back_to_the_default() {
        let port: u16 = load_or("CHIRP_TEST_UNSET_PORT", "3001").unwrap();
        assert_eq!(port, 3001);
    }

    #[test]
    fn load_or_rejects_garbage() {
        env::set_var("CHIRP_TEST_BAD_PORT", "not-a-port");
        let result = load_or::<u16>("CHIRP_TEST_BAD_PORT", "3001");
        assert!(result.is_err());
    }
}

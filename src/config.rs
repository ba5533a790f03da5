use anyhow::{anyhow, Result};
use std::env;

pub const DEFAULT_TOP_PAID_LIMIT: i64 = 5;
pub const MAX_TOP_PAID_LIMIT: i64 = 50;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongodb_uri: String,
    pub database_name: String,
    pub collection_name: String,
    pub server_address: String,
    pub top_paid_default_limit: i64,
    pub top_paid_max_limit: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Fails when `MONGODB_URI`
    /// is missing or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mongodb_uri = lookup("MONGODB_URI")
            .filter(|uri| !uri.trim().is_empty())
            .ok_or_else(|| anyhow!("MONGODB_URI is required"))?;

        let limit = |key: &str, default: i64| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .filter(|limit: &i64| *limit > 0)
                .unwrap_or(default)
        };

        Ok(Config {
            mongodb_uri,
            database_name: lookup("MONGODB_DATABASE").unwrap_or_else(|| "MyDatabase".to_string()),
            collection_name: lookup("MONGODB_COLLECTION")
                .unwrap_or_else(|| "companies".to_string()),
            server_address: lookup("SERVER_ADDRESS")
                .unwrap_or_else(|| "0.0.0.0:8000".to_string()),
            top_paid_default_limit: limit("TOP_PAID_DEFAULT_LIMIT", DEFAULT_TOP_PAID_LIMIT),
            top_paid_max_limit: limit("TOP_PAID_MAX_LIMIT", MAX_TOP_PAID_LIMIT),
        })
    }
}

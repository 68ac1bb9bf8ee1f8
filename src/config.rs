use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Runtime settings read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub timeout_secs: u64,
    pub cache_ttl_secs: i64,
    pub developers_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Ok(Self {
            api_base_url: var("ALNAIR_API_BASE_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            api_token: var("ALNAIR_API_TOKEN"),
            timeout_secs: match var("ALNAIR_TIMEOUT_SECS") {
                Some(v) => v.parse().context("ALNAIR_TIMEOUT_SECS must be a whole number")?,
                None => 30,
            },
            cache_ttl_secs: match var("CATALOG_CACHE_TTL_SECS") {
                Some(v) => v.parse().context("CATALOG_CACHE_TTL_SECS must be a whole number")?,
                None => 300,
            },
            developers_file: var("DEVELOPERS_FILE").map(PathBuf::from),
        })
    }
}

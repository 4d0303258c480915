//! Environment-sourced configuration.
//!
//! A `.env` file in the working directory is loaded before this is read, so
//! every value can come from either place.

use crate::search::google::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use crate::search::Credentials;
use std::path::PathBuf;
use std::time::Duration;

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const SEARCH_ENGINE_ID_VAR: &str = "GOOGLE_SEARCH_ENGINE_ID";
pub const USAGE_DIR_VAR: &str = "MCP_USAGE_DIR";
pub const ENDPOINT_VAR: &str = "GOOGLE_SEARCH_ENDPOINT";
pub const TIMEOUT_VAR: &str = "GOOGLE_SEARCH_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub search_engine_id: Option<String>,
    /// Overrides `~/.mcp-google-search` for the usage record.
    pub usage_dir: Option<PathBuf>,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Never fails: missing credentials are only reported when a search needs
    /// them, so `get_usage` keeps working without them.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_key: get(API_KEY_VAR),
            search_engine_id: get(SEARCH_ENGINE_ID_VAR),
            usage_dir: get(USAGE_DIR_VAR).map(PathBuf::from),
            endpoint: get(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            timeout: get(TIMEOUT_VAR)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
        }
    }

    /// Returns the credential pair if both halves are present.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.api_key, &self.search_engine_id) {
            (Some(api_key), Some(search_engine_id)) => Some(Credentials {
                api_key: api_key.clone(),
                search_engine_id: search_engine_id.clone(),
            }),
            _ => None,
        }
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Most results the Custom Search API returns for a single request.
pub const MAX_RESULTS: u32 = 10;

/// Result count used when the caller does not ask for one.
pub const DEFAULT_NUM: u32 = 10;

/// Static credential pair for the Custom Search API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    /// Programmable Search Engine id (`cx`).
    pub search_engine_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("search_engine_id", &self.search_engine_id)
            .finish()
    }
}

/// A validated search request, ready for the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    /// Never above `MAX_RESULTS`.
    pub num: u32,
}

impl SearchQuery {
    /// Builds a query, clamping `requested` to the provider limit.
    pub fn new(query: impl Into<String>, requested: u32) -> Self {
        Self {
            query: query.into(),
            num: clamp_num(requested),
        }
    }
}

/// Clamps a requested result count to what one provider call can return.
///
/// Counts above the limit are silently reduced rather than rejected.
pub fn clamp_num(requested: u32) -> u32 {
    requested.min(MAX_RESULTS)
}

/// One search hit, copied verbatim from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// Why a search call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The provider rejected the key or its own quota is exhausted.
    #[error("Google API quota exceeded or invalid API key")]
    AuthFailure { status: u16 },

    /// The provider answered with any other error.
    #[error("Google Search API error: {message}")]
    ProviderError { status: u16, message: String },

    /// No HTTP response was obtained.
    #[error("Google Search API request failed: {0}")]
    TransportError(String),
}

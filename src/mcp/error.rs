use crate::search::SearchError;
use thiserror::Error;

/// Failures reported back to the agent host for a single tool call.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Malformed tool input. Raised before any network or storage access.
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: &'static str, reason: String },

    #[error("Search failed: Missing GOOGLE_API_KEY or GOOGLE_SEARCH_ENGINE_ID environment variables")]
    ConfigurationMissing,

    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    #[error("Search failed: could not encode results: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl DispatchError {
    pub fn invalid_arguments(tool: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool,
            reason: reason.into(),
        }
    }
}

//! Outbound web search against the Google Custom Search JSON API.

pub mod google;
pub mod types;

pub use google::GoogleSearchClient;
pub use types::{
    clamp_num, Credentials, SearchError, SearchQuery, SearchResult, DEFAULT_NUM, MAX_RESULTS,
};

/// Performs one search request.
///
/// Implementations must not retry and must not record usage; the caller does
/// that once the call has succeeded.
pub trait SearchClient {
    fn search(
        &self,
        credentials: &Credentials,
        query: &SearchQuery,
    ) -> Result<Vec<SearchResult>, SearchError>;
}

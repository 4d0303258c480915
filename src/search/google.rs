//! Custom Search client over `ureq`.

use super::types::{Credentials, SearchError, SearchQuery, SearchResult};
use super::SearchClient;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Blocking client for `GET customsearch/v1`.
pub struct GoogleSearchClient {
    agent: ureq::Agent,
    endpoint: String,
}

impl GoogleSearchClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        // Status codes are classified by hand so the error body can be read.
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            endpoint: endpoint.into(),
        }
    }
}

impl SearchClient for GoogleSearchClient {
    fn search(
        &self,
        credentials: &Credentials,
        query: &SearchQuery,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let num = query.num.to_string();
        tracing::debug!(query = %query.query, num = query.num, "Google search request");

        let mut response = self
            .agent
            .get(self.endpoint.as_str())
            .query("key", &credentials.api_key)
            .query("cx", &credentials.search_engine_id)
            .query("q", &query.query)
            .query("num", &num)
            .call()
            .map_err(|e| SearchError::TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| SearchError::TransportError(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(classify_failure(status, &body));
        }

        results_from_response(&body).map_err(|e| SearchError::ProviderError {
            status,
            message: format!("Invalid response body: {}", e),
        })
    }
}

/// Maps a non-2xx provider response to a [`SearchError`].
///
/// 401, 403 and 429 mean the key was rejected or Google's own quota ran out.
/// Anything else is reported with the provider's `error.message` when the
/// body carries one.
pub fn classify_failure(status: u16, body: &str) -> SearchError {
    if matches!(status, 401 | 403 | 429) {
        return SearchError::AuthFailure { status };
    }

    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|detail| detail.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {}", status));

    SearchError::ProviderError { status, message }
}

/// Extracts results from a successful response body.
///
/// A body without `items` (Google omits it when nothing matched) yields an
/// empty list. Missing item fields become empty strings.
pub fn results_from_response(body: &str) -> Result<Vec<SearchResult>, serde_json::Error> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .items
        .unwrap_or_default()
        .into_iter()
        .map(|item| SearchResult {
            title: item.title.unwrap_or_default(),
            link: item.link.unwrap_or_default(),
            snippet: item.snippet.unwrap_or_default(),
        })
        .collect())
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Option<Vec<SearchItem>>,
}

#[derive(Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

#[cfg(test)]
#[path = "tests/google_tests.rs"]
mod tests;

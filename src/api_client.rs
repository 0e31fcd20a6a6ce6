use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::data::models::{
    AckResponse, AcronymMatch, AcronymSuggestion, ErrorResponse, SearchResponse, Update,
};

/// Failure taxonomy for remote calls.
///
/// `Validation` carries a server-side rejection (the `{error}` body the
/// service attaches to non-2xx responses); `Transport` is everything else:
/// connection failures, timeouts, undecodable bodies. Callers map either
/// variant to one user-facing message and never retry automatically.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("request rejected: {0}")]
    Validation(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// The five remote operations of the search service. Pure request/response,
/// no state. Implemented by [`SearchApiClient`] for HTTP and by mocks in
/// tests.
#[async_trait]
pub trait SearchGateway: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchResponse, ApiError>;
    async fn list_updates(&self) -> Result<Vec<Update>, ApiError>;
    async fn reload_data(&self) -> Result<AckResponse, ApiError>;
    async fn search_acronyms(&self, query: &str) -> Result<Vec<AcronymMatch>, ApiError>;
    async fn suggest_acronym(&self, suggestion: &AcronymSuggestion)
        -> Result<AckResponse, ApiError>;
}

#[derive(Clone)]
pub struct SearchApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl SearchApiClient {
    pub fn new(base_url: &str, timeout: std::time::Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Turn a non-2xx response into an error, preferring the server's own
    /// `{error}` body when it sent one.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        if let Ok(err) = serde_json::from_str::<ErrorResponse>(&body) {
            return Err(ApiError::Validation(err.error));
        }
        Err(ApiError::Transport(format!("HTTP {status}: {body}")))
    }
}

#[async_trait]
impl SearchGateway for SearchApiClient {
    async fn search(&self, query: &str) -> Result<SearchResponse, ApiError> {
        debug!(target: "api", "GET /search query={:?}", query);
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("query", query)])
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn list_updates(&self) -> Result<Vec<Update>, ApiError> {
        debug!(target: "api", "GET /updates");
        let response = self
            .client
            .get(format!("{}/updates", self.base_url))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn reload_data(&self) -> Result<AckResponse, ApiError> {
        debug!(target: "api", "POST /reload_data");
        let response = self
            .client
            .post(format!("{}/reload_data", self.base_url))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn search_acronyms(&self, query: &str) -> Result<Vec<AcronymMatch>, ApiError> {
        debug!(target: "api", "GET /api/acronyms/search query={:?}", query);
        let response = self
            .client
            .get(format!("{}/api/acronyms/search", self.base_url))
            .query(&[("query", query)])
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn suggest_acronym(
        &self,
        suggestion: &AcronymSuggestion,
    ) -> Result<AckResponse, ApiError> {
        debug!(target: "api", "POST /api/acronyms/suggest acronym={:?}", suggestion.acronym);
        let response = self
            .client
            .post(format!("{}/api/acronyms/suggest", self.base_url))
            .json(suggestion)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

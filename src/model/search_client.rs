//! HTTP client for the remote music search API

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use thiserror::Error;

use super::content::SearchResponse;
use crate::config::USER_AGENT;

/// The two failure kinds the user gets to see
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Generic,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("search API returned {0}")]
    Status(StatusCode),

    #[error("search API returned an empty body")]
    EmptyBody,

    #[error("malformed search response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::Network(_) => ErrorKind::Network,
            SearchError::Status(_) | SearchError::EmptyBody | SearchError::Decode(_) => {
                ErrorKind::Generic
            }
        }
    }
}

#[async_trait]
pub trait SearchService: Send + Sync {
    async fn search(&self, term: &str) -> Result<SearchResponse, SearchError>;
}

#[derive(Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    endpoint: Url,
    entity: Option<String>,
}

impl SearchClient {
    pub fn new(base_url: &str, entity: Option<String>) -> anyhow::Result<Self> {
        let base = Url::parse(base_url)?;
        let endpoint = base.join(&format!("{}/search", base.path().trim_end_matches('/')))?;
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        tracing::debug!(endpoint = %endpoint, entity = ?entity, "Search client initialized");

        Ok(Self {
            http,
            endpoint,
            entity,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SearchService for SearchClient {
    async fn search(&self, term: &str) -> Result<SearchResponse, SearchError> {
        crate::log_api_request!("search", term);

        let mut request = self.http.get(self.endpoint.clone()).query(&[("term", term)]);
        if let Some(entity) = &self.entity {
            request = request.query(&[("entity", entity.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SearchError::Network(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SearchError::Network(Box::new(e)))?;
        if body.is_empty() {
            return Err(SearchError::EmptyBody);
        }

        let result = serde_json::from_slice::<SearchResponse>(&body).map_err(SearchError::from);
        crate::log_api_result!("search", result);
        result
    }
}

//! HTTP-backed catalog client.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::request::SearchRequest;
use crate::response::parse_search_body;
use crate::{CatalogClient, SearchPage};

/// Catalog client speaking to the remote search endpoint over HTTP.
///
/// One agent, and so one connection pool, is shared by every search.
#[derive(Clone)]
pub struct HttpCatalogClient {
    config: Arc<CatalogConfig>,
    agent: ureq::Agent,
}

impl HttpCatalogClient {
    /// Create a client, rejecting an unusable configuration.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        config
            .validate()
            .map_err(|e| CatalogError::Config(e.to_string()))?;

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout()))
            .build()
            .into();
        Ok(Self {
            config: Arc::new(config),
            agent,
        })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}

impl fmt::Debug for HttpCatalogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpCatalogClient")
            .field("endpoint", &self.config.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<SearchPage, CatalogError> {
        let request = SearchRequest::new(query, page, limit);
        let config = Arc::clone(&self.config);
        let agent = self.agent.clone();

        // ureq is synchronous, so run it off the async executor
        let body = tokio::task::spawn_blocking(move || fetch(&agent, &config, &request))
            .await
            .map_err(|e| CatalogError::Request(format!("task join error: {}", e)))??;

        Ok(parse_search_body(&body, self.config.currency))
    }
}

fn fetch(agent: &ureq::Agent, config: &CatalogConfig, request: &SearchRequest) -> Result<Vec<u8>, CatalogError> {
    debug!(query = %request.query, page = request.page, limit = request.limit, "catalog search");

    let mut call = agent.get(&config.endpoint).header("Accept", "application/json");
    for (key, value) in request.query_pairs() {
        call = call.query(key, value);
    }
    if let Some(key) = &config.api_key {
        call = call.header(config.api_key_header.as_str(), key.as_str());
    }

    let response = call.call().map_err(|e| classify_error(e, &config.endpoint))?;
    response
        .into_body()
        .read_to_vec()
        .map_err(|e| CatalogError::Request(format!("could not read response body: {}", e)))
}

fn classify_error(err: ureq::Error, endpoint: &str) -> CatalogError {
    match err {
        ureq::Error::StatusCode(status) => {
            warn!(status, endpoint, "catalog returned an error status");
            CatalogError::Http {
                status,
                url: endpoint.to_string(),
            }
        }
        ureq::Error::Timeout(_) => CatalogError::Timeout,
        other => CatalogError::Request(other.to_string()),
    }
}

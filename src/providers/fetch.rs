//! Retrieval of raw provider payloads
use crate::config::HttpClientConfig;
use crate::providers::types::ProviderConfig;
use crate::utils::errors::{CatalogError, CatalogResult};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Source of raw JSON payloads for API providers
#[async_trait]
pub trait ProviderFetcher: Send + Sync {
    async fn fetch(&self, provider: &ProviderConfig) -> CatalogResult<Value>;
}

/// Plain GET of the provider endpoint. No retries; the only timeout is the
/// optional client timeout.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpClientConfig) -> CatalogResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProviderFetcher for HttpFetcher {
    async fn fetch(&self, provider: &ProviderConfig) -> CatalogResult<Value> {
        if provider.endpoint.is_empty() {
            return Err(CatalogError::ConfigError(format!(
                "provider {} has no endpoint",
                provider.id
            )));
        }

        debug!("Fetching provider {} from {}", provider.id, provider.endpoint);
        let response = self.client.get(&provider.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::InternalError(format!(
                "API fetch failed: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            )));
        }

        Ok(response.json::<Value>().await?)
    }
}

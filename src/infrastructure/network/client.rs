use crate::domain::error::CatalogError;
use crate::domain::traits::{ApiResponse, CatalogClient};
use crate::infrastructure::config::ApiConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

/// TMDB v3 catalog client
///
/// Every request carries the bearer token and the configured response
/// language; caller parameters are appended after `language` so they can
/// override it.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    token: String,
    language: String,
}

impl TmdbClient {
    pub fn new(client: Client, api: &ApiConfig) -> Result<Self, CatalogError> {
        let token = api.token.as_deref().unwrap_or("").trim();
        if token.is_empty() {
            return Err(CatalogError::Config(
                "TMDB API token not configured".to_string(),
            ));
        }

        let mut base_url = api.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            client,
            base_url,
            token: token.to_string(),
            language: api.language.clone(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[async_trait]
impl CatalogClient for TmdbClient {
    async fn call(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<ApiResponse, CatalogError> {
        let mut query: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        query.push(("language", self.language.as_str()));
        query.extend(params.iter().map(|(k, v)| (*k, v.as_str())));

        debug!(endpoint, "calling upstream catalog");
        let response = self
            .client
            .get(self.url(endpoint))
            .bearer_auth(&self.token)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(endpoint, status = status.as_u16(), "upstream call failed");
            return Err(CatalogError::from_status(endpoint, status.as_u16(), body));
        }

        let data = response.json::<Value>().await?;
        Ok(ApiResponse {
            status: status.as_u16(),
            data,
        })
    }
}

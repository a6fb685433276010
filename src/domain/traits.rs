use crate::domain::error::CatalogError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Raw reply from the remote catalog.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub data: Value,
}

impl ApiResponse {
    pub fn ok(data: Value) -> Self {
        Self { status: 200, data }
    }

    /// Parse the body into an upstream payload type.
    ///
    /// A payload that doesn't fit the schema surfaces as `CatalogError::Json`,
    /// which callers treat like any other upstream failure.
    pub fn parse<T: DeserializeOwned>(self) -> Result<T, CatalogError> {
        Ok(serde_json::from_value(self.data)?)
    }
}

/// Trait for the remote catalog transport
///
/// Implementations perform one outbound call per invocation and classify
/// non-success statuses through `CatalogError::from_status`. The core never
/// talks HTTP directly, so tests can substitute a canned implementation.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Call `endpoint` (relative, e.g. `movie/popular`) with query parameters.
    async fn call(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<ApiResponse, CatalogError>;
}

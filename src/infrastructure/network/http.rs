// HTTP client utilities
use crate::domain::error::CatalogError;
use crate::infrastructure::config::ApiConfig;
use reqwest::Client;

/// Create the shared HTTP client used for every upstream call
pub fn create_client(api: &ApiConfig) -> Result<Client, CatalogError> {
    Ok(Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .timeout(api.timeout())
        .user_agent(concat!("cinecache/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

use crate::application::enrich::Enricher;
use crate::domain::error::CatalogError;
use crate::domain::reference::{ReferenceHandle, ReferenceTable};
use crate::domain::traits::CatalogClient;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::client::TmdbClient;
use crate::infrastructure::network::http::create_client;
use crate::infrastructure::storage::domains::CacheDomains;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn CatalogClient>,
    pub reference: ReferenceHandle,
    pub caches: Arc<CacheDomains>,
}

impl AppState {
    /// Wire up the real TMDB client from configuration.
    pub fn new(config: Config) -> Result<Self, CatalogError> {
        let http_client = create_client(&config.api)?;
        let client = TmdbClient::new(http_client, &config.api)?;
        Ok(Self::with_client(Arc::new(client), config))
    }

    /// Use an arbitrary catalog client, starting with an empty reference table.
    pub fn with_client(client: Arc<dyn CatalogClient>, config: Config) -> Self {
        Self {
            client,
            reference: ReferenceHandle::default(),
            caches: Arc::new(CacheDomains::new(config.cache.ttl())),
        }
    }

    pub fn with_reference(self, table: ReferenceTable) -> Self {
        self.reference.replace(table);
        self
    }

    pub fn enricher(&self) -> Enricher {
        Enricher::new(Arc::clone(&self.client), self.reference.clone())
    }
}

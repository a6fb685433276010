use crate::domain::error::CatalogError;
use crate::domain::model::{CatalogItem, EnrichedRecord};
use crate::domain::query::{validate_id, EnrichmentDepth, MediaKind};
use crate::infrastructure::storage::keys::details_key;
use crate::state::AppState;
use tracing::{debug, info};

/// Fetch one entity and enrich it to `depth`.
///
/// Fails only for an invalid id or when the base record itself can't be
/// fetched; enrichment problems show up as empty fields instead. Records
/// with any failed facet are returned but not cached, so the next request
/// gets another chance at the full set.
pub async fn get_entity_details(
    state: &AppState,
    media: MediaKind,
    id: u64,
    depth: EnrichmentDepth,
) -> Result<EnrichedRecord, CatalogError> {
    validate_id(media.segment(), id)?;
    let key = details_key(media, id, depth);

    if let Some(record) = state.caches.details.get(&key) {
        debug!(key = %key, "details cache hit");
        return Ok(record);
    }

    let base: CatalogItem = state
        .client
        .call(&format!("{}/{}", media.segment(), id), &[])
        .await?
        .parse()?;
    if base.id.is_none() {
        return Err(CatalogError::NotFound(format!("{} {}", media, id)));
    }

    let report = state.enricher().enrich_with_report(media, base, depth).await;
    if report.is_complete() {
        state.caches.details.insert(key, report.record.clone());
    } else {
        let failed: Vec<_> = report.failed.iter().map(|f| f.key()).collect();
        info!(%media, id, ?failed, "serving partially enriched record");
    }
    Ok(report.record)
}

// Per-domain cache stores and the background sweeper
use crate::domain::model::{
    BoxSet, Company, EnrichedRecord, Filmography, GenreShelf, Keyword, ListedItem, PersonDetails,
};
use crate::infrastructure::storage::cache::TtlCache;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// One store per logical domain, so unrelated results never share a key
/// space and each can be cleared on its own.
#[derive(Debug)]
pub struct CacheDomains {
    pub collections: TtlCache<Vec<ListedItem>>,
    pub details: TtlCache<EnrichedRecord>,
    pub aggregates: TtlCache<Vec<GenreShelf>>,
    pub people: TtlCache<PersonDetails>,
    pub filmographies: TtlCache<Filmography>,
    pub box_sets: TtlCache<BoxSet>,
    pub keywords: TtlCache<Vec<Keyword>>,
    pub companies: TtlCache<Company>,
}

/// Entry counts per domain, for status output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSize {
    pub name: &'static str,
    pub entries: usize,
}

impl CacheDomains {
    pub fn new(ttl: Duration) -> Self {
        Self {
            collections: TtlCache::new("collections", ttl),
            details: TtlCache::new("details", ttl),
            aggregates: TtlCache::new("aggregates", ttl),
            people: TtlCache::new("people", ttl),
            filmographies: TtlCache::new("filmographies", ttl),
            box_sets: TtlCache::new("box_sets", ttl),
            keywords: TtlCache::new("keywords", ttl),
            companies: TtlCache::new("companies", ttl),
        }
    }

    /// Sweep every domain; returns the total number of entries dropped.
    pub fn sweep(&self) -> usize {
        self.collections.sweep()
            + self.details.sweep()
            + self.aggregates.sweep()
            + self.people.sweep()
            + self.filmographies.sweep()
            + self.box_sets.sweep()
            + self.keywords.sweep()
            + self.companies.sweep()
    }

    pub fn clear(&self) {
        self.collections.clear();
        self.details.clear();
        self.aggregates.clear();
        self.people.clear();
        self.filmographies.clear();
        self.box_sets.clear();
        self.keywords.clear();
        self.companies.clear();
    }

    pub fn sizes(&self) -> Vec<DomainSize> {
        vec![
            size_of(&self.collections),
            size_of(&self.details),
            size_of(&self.aggregates),
            size_of(&self.people),
            size_of(&self.filmographies),
            size_of(&self.box_sets),
            size_of(&self.keywords),
            size_of(&self.companies),
        ]
    }
}

fn size_of<V: Clone>(cache: &TtlCache<V>) -> DomainSize {
    DomainSize {
        name: cache.name(),
        entries: cache.len(),
    }
}

/// Run `sweep` on a fixed interval until the caches are dropped.
pub fn spawn_sweeper(caches: &Arc<CacheDomains>, interval: Duration) -> JoinHandle<()> {
    let weak: Weak<CacheDomains> = Arc::downgrade(caches);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let Some(caches) = weak.upgrade() else {
                break;
            };
            let removed = caches.sweep();
            if removed > 0 {
                debug!(removed, "swept expired cache entries");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_reclaims_expired_entries() {
        let caches = Arc::new(CacheDomains::new(Duration::from_secs(30)));
        caches.keywords.insert("k", Vec::new());
        let handle = spawn_sweeper(&caches, Duration::from_secs(60));

        tokio::time::sleep(Duration::from_secs(61)).await;
        tokio::task::yield_now().await;
        assert_eq!(caches.keywords.len(), 0);

        drop(caches);
        tokio::time::sleep(Duration::from_secs(61)).await;
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn test_domains_clear_independently() {
        let caches = CacheDomains::new(Duration::from_secs(30));
        caches.keywords.insert("k", Vec::new());
        caches.companies.clear();
        assert_eq!(caches.keywords.len(), 1);
    }
}

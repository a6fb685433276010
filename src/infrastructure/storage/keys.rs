// Cache key construction
use crate::domain::query::{CollectionFilters, CollectionKind, EnrichmentDepth, MediaKind};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Deterministic key builder.
///
/// Parameters are kept sorted by name, so the same logical query always
/// produces the same key whatever order the parts were added in.
#[derive(Debug, Default)]
pub struct KeyBuilder {
    namespace: String,
    parts: BTreeMap<&'static str, String>,
}

impl KeyBuilder {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            parts: BTreeMap::new(),
        }
    }

    pub fn part(mut self, name: &'static str, value: impl ToString) -> Self {
        self.parts.insert(name, value.to_string());
        self
    }

    pub fn opt_part<T: ToString>(self, name: &'static str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.part(name, v),
            None => self,
        }
    }

    pub fn build(self) -> String {
        let mut key = self.namespace;
        for (name, value) in &self.parts {
            // Values are escaped so a search text can't forge another key.
            write!(key, "|{}={}", name, value.replace('\\', "\\\\").replace('|', "\\|")).ok();
        }
        key
    }
}

pub fn collection_key(
    kind: CollectionKind,
    page: u32,
    page_size: u32,
    filters: &CollectionFilters,
) -> String {
    KeyBuilder::new(format!("{}:{}", kind.media, kind.listing.name()))
        .part("page", page)
        .part("size", page_size)
        .opt_part("anchor", kind.listing.anchor())
        .opt_part("year", filters.year)
        .opt_part("genre", filters.genre)
        .opt_part("q", filters.search_text().map(str::to_lowercase))
        .build()
}

pub fn details_key(media: MediaKind, id: u64, depth: EnrichmentDepth) -> String {
    KeyBuilder::new(format!("{}:details", media))
        .part("id", id)
        .part("depth", depth.name())
        .build()
}

pub fn entity_key(namespace: &str, id: u64) -> String {
    KeyBuilder::new(namespace).part("id", id).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::Listing;

    #[test]
    fn test_part_order_does_not_matter() {
        let a = KeyBuilder::new("ns").part("page", 2).part("year", 1999).build();
        let b = KeyBuilder::new("ns").part("year", 1999).part("page", 2).build();
        assert_eq!(a, b);
    }

    #[test]
    fn test_collection_keys_separate_queries() {
        let popular = CollectionKind::movies(Listing::Popular);
        let none = CollectionFilters::default();

        let base = collection_key(popular, 1, 20, &none);
        assert_eq!(base, collection_key(popular, 1, 20, &none));
        assert_ne!(base, collection_key(popular, 2, 20, &none));
        assert_ne!(base, collection_key(popular, 1, 10, &none));
        assert_ne!(
            base,
            collection_key(CollectionKind::series(Listing::Popular), 1, 20, &none)
        );
        assert_ne!(
            collection_key(CollectionKind::movies(Listing::Similar(1)), 1, 20, &none),
            collection_key(CollectionKind::movies(Listing::Similar(2)), 1, 20, &none)
        );
    }

    #[test]
    fn test_search_text_is_normalized_and_escaped() {
        let kind = CollectionKind::movies(Listing::Search);
        assert_eq!(
            collection_key(kind, 1, 20, &CollectionFilters::with_query(" Dune ")),
            collection_key(kind, 1, 20, &CollectionFilters::with_query("dune"))
        );
        assert_ne!(
            collection_key(kind, 1, 20, &CollectionFilters::with_query("a|size=5")),
            collection_key(kind, 1, 5, &CollectionFilters::with_query("a"))
        );
    }

    #[test]
    fn test_details_key_includes_depth() {
        assert_ne!(
            details_key(MediaKind::Movie, 550, EnrichmentDepth::Basic),
            details_key(MediaKind::Movie, 550, EnrichmentDepth::Detailed)
        );
    }
}

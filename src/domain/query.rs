use crate::domain::error::CatalogError;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_PAGE: u32 = 500;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const MIN_YEAR: i32 = 1900;

/// Which half of the catalog a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    /// Upstream path segment
    pub fn segment(self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// A paginated listing offered by the upstream catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listing {
    Popular,
    NowPlaying,
    Upcoming,
    TopRated,
    Discover,
    Search,
    Similar(u64),
    Recommendations(u64),
}

impl Listing {
    /// Stable name used in cache keys and logs.
    pub fn name(self) -> &'static str {
        match self {
            Listing::Popular => "popular",
            Listing::NowPlaying => "now_playing",
            Listing::Upcoming => "upcoming",
            Listing::TopRated => "top_rated",
            Listing::Discover => "discover",
            Listing::Search => "search",
            Listing::Similar(_) => "similar",
            Listing::Recommendations(_) => "recommendations",
        }
    }

    /// Related-entity id for listings anchored on one item.
    pub fn anchor(self) -> Option<u64> {
        match self {
            Listing::Similar(id) | Listing::Recommendations(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionKind {
    pub media: MediaKind,
    pub listing: Listing,
}

impl CollectionKind {
    pub fn new(media: MediaKind, listing: Listing) -> Self {
        Self { media, listing }
    }

    pub fn movies(listing: Listing) -> Self {
        Self::new(MediaKind::Movie, listing)
    }

    pub fn series(listing: Listing) -> Self {
        Self::new(MediaKind::Series, listing)
    }
}

/// Optional narrowing applied to a collection query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionFilters {
    pub year: Option<i32>,
    pub genre: Option<u32>,
    pub query: Option<String>,
}

impl CollectionFilters {
    pub fn with_year(year: i32) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    /// Trimmed, non-empty search text.
    pub fn search_text(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

/// How many cross-referenced sub-fetches accompany a detail request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentDepth {
    Basic,
    Detailed,
}

impl EnrichmentDepth {
    pub fn name(self) -> &'static str {
        match self {
            EnrichmentDepth::Basic => "basic",
            EnrichmentDepth::Detailed => "detailed",
        }
    }
}

pub fn validate_page(page: u32) -> Result<(), CatalogError> {
    if page == 0 || page > MAX_PAGE {
        return Err(CatalogError::Validation(format!(
            "page must be between 1 and {}, got {}",
            MAX_PAGE, page
        )));
    }
    Ok(())
}

pub fn validate_page_size(page_size: u32) -> Result<(), CatalogError> {
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(CatalogError::Validation(format!(
            "page size must be between 1 and {}, got {}",
            MAX_PAGE_SIZE, page_size
        )));
    }
    Ok(())
}

pub fn validate_id(what: &str, id: u64) -> Result<(), CatalogError> {
    if id == 0 {
        return Err(CatalogError::Validation(format!("invalid {} id: {}", what, id)));
    }
    Ok(())
}

/// Release years are accepted up to two years ahead of today.
pub fn validate_year(year: i32) -> Result<(), CatalogError> {
    let latest = chrono::Utc::now().year() + 2;
    if !(MIN_YEAR..=latest).contains(&year) {
        return Err(CatalogError::Validation(format!(
            "year must be between {} and {}, got {}",
            MIN_YEAR, latest, year
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_bounds() {
        assert!(validate_page(0).is_err());
        assert!(validate_page(1).is_ok());
        assert!(validate_page(MAX_PAGE).is_ok());
        assert!(validate_page(MAX_PAGE + 1).is_err());
    }

    #[test]
    fn test_year_bounds() {
        assert!(validate_year(1899).is_err());
        assert!(validate_year(1999).is_ok());
        assert!(validate_year(chrono::Utc::now().year() + 3).is_err());
    }

    #[test]
    fn test_search_text_trims() {
        assert_eq!(CollectionFilters::with_query("  dune ").search_text(), Some("dune"));
        assert_eq!(CollectionFilters::with_query("   ").search_text(), None);
    }
}

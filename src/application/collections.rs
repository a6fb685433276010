use crate::application::fallback::fetch_with_fallback;
use crate::application::fanout::{run_all, Outcome, SubFetch};
use crate::application::mapping::map_items;
use crate::domain::error::CatalogError;
use crate::domain::model::{CatalogItem, CollectionPage, GenreShelf, PageSource, Pagination};
use crate::domain::query::{
    validate_id, validate_page, validate_page_size, validate_year, CollectionFilters,
    CollectionKind, Listing, MediaKind,
};
use crate::domain::traits::CatalogClient;
use crate::infrastructure::network::schema::RawPage;
use crate::infrastructure::storage::keys::{collection_key, KeyBuilder};
use crate::state::AppState;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const SHELF_SIZE: usize = 20;
const POPULARITY_DESC: &str = "popularity.desc";

/// One upstream call: endpoint plus query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub endpoint: String,
    pub params: Vec<(&'static str, String)>,
}

impl UpstreamRequest {
    fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: Vec::new(),
        }
    }

    fn param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.params.push((name, value.to_string()));
        self
    }

    async fn fetch(&self, client: &dyn CatalogClient) -> Result<RawPage<CatalogItem>, CatalogError> {
        client.call(&self.endpoint, &self.params).await?.parse()
    }
}

/// Primary and fallback calls for a collection query.
///
/// Popular lists fall back to top-rated; every other listing falls back to
/// one more attempt at the same call.
pub fn resolve_request(
    kind: CollectionKind,
    page: u32,
    filters: &CollectionFilters,
) -> Result<(UpstreamRequest, UpstreamRequest), CatalogError> {
    let seg = kind.media.segment();
    let search_text = filters.search_text();

    match (kind.listing, search_text, filters.query.is_some()) {
        (Listing::Search, None, _) => {
            return Err(CatalogError::Validation(
                "search requires non-empty query text".to_string(),
            ))
        }
        (listing, _, true) if listing != Listing::Search => {
            return Err(CatalogError::Validation(format!(
                "query text is only valid for search, not {}",
                listing.name()
            )))
        }
        _ => {}
    }
    if kind.listing != Listing::Discover && (filters.year.is_some() || filters.genre.is_some()) {
        return Err(CatalogError::Validation(format!(
            "year and genre filters are only valid for discover, not {}",
            kind.listing.name()
        )));
    }
    if let Some(year) = filters.year {
        validate_year(year)?;
    }
    if let Some(id) = kind.listing.anchor() {
        validate_id(seg, id)?;
    }

    let primary = match (kind.listing, kind.media) {
        (Listing::Popular, _) => UpstreamRequest::new(format!("{}/popular", seg)),
        (Listing::TopRated, _) => UpstreamRequest::new(format!("{}/top_rated", seg)),
        (Listing::NowPlaying, MediaKind::Movie) => UpstreamRequest::new("movie/now_playing"),
        (Listing::NowPlaying, MediaKind::Series) => UpstreamRequest::new("tv/airing_today"),
        (Listing::Upcoming, MediaKind::Movie) => UpstreamRequest::new("movie/upcoming"),
        (Listing::Upcoming, MediaKind::Series) => UpstreamRequest::new("tv/on_the_air"),
        (Listing::Discover, media) => {
            let mut request =
                UpstreamRequest::new(format!("discover/{}", seg)).param("sort_by", POPULARITY_DESC);
            if let Some(year) = filters.year {
                let name = match media {
                    MediaKind::Movie => "primary_release_year",
                    MediaKind::Series => "first_air_date_year",
                };
                request = request.param(name, year);
            }
            if let Some(genre) = filters.genre {
                request = request.param("with_genres", genre);
            }
            request
        }
        (Listing::Search, _) => {
            UpstreamRequest::new(format!("search/{}", seg)).param("query", search_text.unwrap_or_default())
        }
        (Listing::Similar(id), _) => UpstreamRequest::new(format!("{}/{}/similar", seg, id)),
        (Listing::Recommendations(id), _) => {
            UpstreamRequest::new(format!("{}/{}/recommendations", seg, id))
        }
    }
    .param("page", page);

    let fallback = match kind.listing {
        Listing::Popular => UpstreamRequest::new(format!("{}/top_rated", seg)).param("page", page),
        _ => primary.clone(),
    };

    Ok((primary, fallback))
}

/// Fetch one page of a collection, read-through the collections cache.
///
/// A cache hit reports `has_more: true` without totals; only an upstream
/// page carries exact pagination. Empty pages are never cached.
pub async fn get_collection(
    state: &AppState,
    kind: CollectionKind,
    page: u32,
    page_size: u32,
    filters: &CollectionFilters,
) -> Result<CollectionPage, CatalogError> {
    validate_page(page)?;
    validate_page_size(page_size)?;
    let (primary, fallback) = resolve_request(kind, page, filters)?;
    let key = collection_key(kind, page, page_size, filters);

    // 1. Cache
    if let Some(items) = state.caches.collections.get(&key) {
        debug!(key = %key, "collection cache hit");
        return Ok(CollectionPage {
            items,
            pagination: Pagination {
                current_page: page,
                page_size: Some(page_size),
                has_more: true,
                total_pages: None,
                total_results: None,
            },
            source: PageSource::Cache,
        });
    }

    // 2. Upstream
    debug!(key = %key, endpoint = %primary.endpoint, "collection cache miss");
    let client = state.client.as_ref();
    let raw = fetch_with_fallback(|| primary.fetch(client), || fallback.fetch(client)).await?;

    if raw.results.is_empty() {
        return Ok(CollectionPage {
            items: Vec::new(),
            pagination: Pagination {
                current_page: page,
                page_size: Some(page_size),
                has_more: false,
                total_pages: None,
                total_results: None,
            },
            source: PageSource::Upstream,
        });
    }

    // 3. Map and write back
    let table = state.reference.snapshot();
    let items = map_items(raw.results, &table);
    state.caches.collections.insert(key, items.clone());

    Ok(CollectionPage {
        items,
        pagination: Pagination {
            current_page: page,
            page_size: Some(page_size),
            has_more: page < raw.total_pages,
            total_pages: Some(raw.total_pages),
            total_results: Some(raw.total_results),
        },
        source: PageSource::Upstream,
    })
}

pub async fn search_collection(
    state: &AppState,
    media: MediaKind,
    query: &str,
    page: u32,
) -> Result<CollectionPage, CatalogError> {
    get_collection(
        state,
        CollectionKind::new(media, Listing::Search),
        page,
        DEFAULT_PAGE_SIZE,
        &CollectionFilters::with_query(query),
    )
    .await
}

/// Popular items for every known genre, one shelf per genre.
///
/// Genres whose lookup failed or came back empty are left out. An all-empty
/// result is returned but not cached.
pub async fn genre_showcase(
    state: &AppState,
    media: MediaKind,
) -> Result<Vec<GenreShelf>, CatalogError> {
    let key = KeyBuilder::new("genre_showcase").part("media", media).build();
    if let Some(shelves) = state.caches.aggregates.get(&key) {
        debug!(key = %key, "showcase cache hit");
        return Ok(shelves);
    }

    let table = state.reference.snapshot();
    let genres: Vec<(u32, String)> = table
        .genres()
        .into_iter()
        .map(|(id, name)| (id, name.to_string()))
        .collect();
    if genres.is_empty() {
        return Err(CatalogError::NotFound("no genres loaded".to_string()));
    }

    let specs = genres
        .iter()
        .map(|(id, name)| {
            let client = Arc::clone(&state.client);
            let request = UpstreamRequest::new(format!("discover/{}", media.segment()))
                .param("with_genres", id)
                .param("sort_by", POPULARITY_DESC)
                .param("page", 1);
            SubFetch::new(format!("genre {}", name), async move {
                request.fetch(client.as_ref()).await
            })
        })
        .collect();

    let shelves: Vec<GenreShelf> = genres
        .into_iter()
        .zip(run_all(specs).await)
        .filter_map(|((id, name), outcome)| match outcome {
            Outcome::Fulfilled(raw) if !raw.results.is_empty() => Some(GenreShelf {
                id,
                name,
                items: map_items(raw.results.into_iter().take(SHELF_SIZE).collect(), &table),
            }),
            _ => None,
        })
        .collect();

    if !shelves.is_empty() {
        state.caches.aggregates.insert(key, shelves.clone());
    }
    Ok(shelves)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(req: &UpstreamRequest) -> Vec<(&str, &str)> {
        req.params.iter().map(|(k, v)| (*k, v.as_str())).collect()
    }

    #[test]
    fn test_popular_falls_back_to_top_rated() {
        let (primary, fallback) = resolve_request(
            CollectionKind::movies(Listing::Popular),
            2,
            &CollectionFilters::default(),
        )
        .unwrap();
        assert_eq!(primary.endpoint, "movie/popular");
        assert_eq!(fallback.endpoint, "movie/top_rated");
        assert_eq!(params(&fallback), vec![("page", "2")]);
    }

    #[test]
    fn test_series_endpoints() {
        let none = CollectionFilters::default();
        let (now, _) = resolve_request(CollectionKind::series(Listing::NowPlaying), 1, &none).unwrap();
        let (soon, retry) =
            resolve_request(CollectionKind::series(Listing::Upcoming), 1, &none).unwrap();
        assert_eq!(now.endpoint, "tv/airing_today");
        assert_eq!(soon.endpoint, "tv/on_the_air");
        assert_eq!(soon, retry);
    }

    #[test]
    fn test_discover_by_year() {
        let (movie, _) = resolve_request(
            CollectionKind::movies(Listing::Discover),
            1,
            &CollectionFilters::with_year(1999),
        )
        .unwrap();
        assert_eq!(movie.endpoint, "discover/movie");
        assert_eq!(
            params(&movie),
            vec![("sort_by", "popularity.desc"), ("primary_release_year", "1999"), ("page", "1")]
        );

        let (series, _) = resolve_request(
            CollectionKind::series(Listing::Discover),
            1,
            &CollectionFilters::with_year(2011),
        )
        .unwrap();
        assert!(params(&series).contains(&("first_air_date_year", "2011")));
    }

    #[test]
    fn test_filter_validation() {
        let popular = CollectionKind::movies(Listing::Popular);
        assert!(resolve_request(popular, 1, &CollectionFilters::with_query("x")).is_err());
        assert!(resolve_request(popular, 1, &CollectionFilters::with_year(1999)).is_err());
        assert!(resolve_request(
            CollectionKind::movies(Listing::Search),
            1,
            &CollectionFilters::with_query("  ")
        )
        .is_err());
        assert!(resolve_request(
            CollectionKind::movies(Listing::Discover),
            1,
            &CollectionFilters::with_year(1800)
        )
        .is_err());
        assert!(resolve_request(
            CollectionKind::movies(Listing::Similar(0)),
            1,
            &CollectionFilters::default()
        )
        .is_err());
    }
}

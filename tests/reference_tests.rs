//! Start-up reference data and cache expiry
mod common;

use cinecache::application::collections::get_collection;
use cinecache::application::reference_loader::load_reference_table;
use cinecache::domain::error::CatalogError;
use cinecache::domain::query::{CollectionFilters, CollectionKind, Listing};
use cinecache::domain::traits::CatalogClient;
use cinecache::infrastructure::config::{Config, ImageConfig};
use cinecache::state::AppState;
use common::{movie, page, StubClient};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn reference_client() -> StubClient {
    StubClient::new()
        .json(
            "configuration",
            json!({"images": {"base_url": "http://img/", "secure_base_url": "https://img/"}}),
        )
        .json("genre/movie/list", json!({"genres": [{"id": 28, "name": "Action"}]}))
        .json(
            "genre/tv/list",
            json!({"genres": [{"id": 10765, "name": "Sci-Fi & Fantasy"}, {"id": 28, "name": "Action"}]}),
        )
        .json(
            "configuration/languages",
            json!([{"iso_639_1": "pt", "english_name": "Portuguese"}]),
        )
        .json(
            "configuration/countries",
            json!([{"iso_3166_1": "BR", "english_name": "Brazil"}]),
        )
}

#[tokio::test]
async fn test_loader_merges_genres_and_prefers_secure_url() {
    let client: Arc<dyn CatalogClient> = Arc::new(reference_client());

    let table = load_reference_table(&client, &ImageConfig::default())
        .await
        .unwrap();

    assert!(table.is_populated());
    assert_eq!(table.image_base_url(), Some("https://img/"));
    assert_eq!(table.genres().len(), 2);
    assert_eq!(table.genre_name(10765), Some("Sci-Fi & Fantasy"));
    assert_eq!(table.language_name("pt"), Some("Portuguese"));
    assert_eq!(table.country_name("BR"), Some("Brazil"));
    assert_eq!(
        table.poster_url(Some("/x.jpg")).as_deref(),
        Some("https://img/w500/x.jpg")
    );
}

#[tokio::test]
async fn test_loader_tolerates_missing_lookups() {
    let client: Arc<dyn CatalogClient> = Arc::new(
        reference_client()
            .status("configuration/languages", 500)
            .status("genre/tv/list", 503),
    );

    let table = load_reference_table(&client, &ImageConfig::default())
        .await
        .unwrap();
    assert_eq!(table.genres().len(), 1);
    assert!(table.languages().is_empty());
}

#[tokio::test]
async fn test_loader_requires_image_configuration() {
    let client: Arc<dyn CatalogClient> =
        Arc::new(reference_client().status("configuration", 401));

    let err = load_reference_table(&client, &ImageConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Init(_)));
}

#[tokio::test(start_paused = true)]
async fn test_collection_entry_expires_after_ttl() {
    let client = Arc::new(
        StubClient::new().json("movie/popular", page(1, 2, vec![movie(1, "A", &[], "")])),
    );
    let mut config = Config::default();
    config.cache.ttl_secs = 60;
    let state = AppState::with_client(client.clone(), config);
    let kind = CollectionKind::movies(Listing::Popular);
    let filters = CollectionFilters::default();

    get_collection(&state, kind, 1, 20, &filters).await.unwrap();
    tokio::time::advance(Duration::from_secs(59)).await;
    get_collection(&state, kind, 1, 20, &filters).await.unwrap();
    assert_eq!(client.calls("movie/popular"), 1);

    tokio::time::advance(Duration::from_secs(2)).await;
    get_collection(&state, kind, 1, 20, &filters).await.unwrap();
    assert_eq!(client.calls("movie/popular"), 2);
}

//! People, box sets, keywords and companies
mod common;

use cinecache::application::entities::{box_set, company, keywords, person_credits, person_details};
use cinecache::domain::error::CatalogError;
use cinecache::domain::query::MediaKind;
use common::{movie, state_with, StubClient, IMAGE_BASE};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_person_details_resolve_profile_and_cache() {
    let client = Arc::new(StubClient::new().json(
        "person/287",
        json!({"id": 287, "name": "Brad Pitt", "profile_path": "/bp.jpg", "popularity": 10.5}),
    ));
    let state = state_with(client.clone());

    let person = person_details(&state, 287).await.unwrap();
    assert_eq!(person.name, "Brad Pitt");
    assert_eq!(person.profile_url, Some(format!("{}w185/bp.jpg", IMAGE_BASE)));
    assert_eq!(person.extra.get("popularity"), Some(&json!(10.5)));

    person_details(&state, 287).await.unwrap();
    assert_eq!(client.calls("person/287"), 1);
}

#[tokio::test]
async fn test_filmography_is_newest_first() {
    let client = Arc::new(StubClient::new().json(
        "person/287/movie_credits",
        json!({
            "cast": [
                movie(1, "Old", &[18], "1994-01-01"),
                movie(2, "Undated", &[], ""),
                movie(3, "New", &[28], "2019-07-26"),
            ],
            "crew": [],
        }),
    ));
    let state = state_with(client.clone());

    let credits = person_credits(&state, MediaKind::Movie, 287).await.unwrap();
    let titles: Vec<_> = credits
        .cast
        .iter()
        .map(|i| i.item.title.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(titles, vec!["New", "Old", "Undated"]);
    assert!(credits.crew.is_empty());

    let err = person_credits(&state, MediaKind::Series, 287).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[tokio::test]
async fn test_box_set_parts_are_oldest_first() {
    let client = Arc::new(StubClient::new().json(
        "collection/10",
        json!({
            "id": 10,
            "name": "Star Wars Collection",
            "poster_path": "/sw.jpg",
            "parts": [
                movie(181808, "The Last Jedi", &[], "2017-12-13"),
                movie(11, "A New Hope", &[], "1977-05-25"),
            ],
        }),
    ));
    let state = state_with(client.clone());

    let set = box_set(&state, 10).await.unwrap();
    assert_eq!(set.name, "Star Wars Collection");
    assert_eq!(set.poster_url, Some(format!("{}w500/sw.jpg", IMAGE_BASE)));
    assert_eq!(set.parts[0].item.title.as_deref(), Some("A New Hope"));
    assert_eq!(set.parts[1].release_year, Some(2017));
}

#[tokio::test]
async fn test_keywords_for_movies_and_series() {
    let client = Arc::new(
        StubClient::new()
            .json("movie/550/keywords", json!({"id": 550, "keywords": [{"id": 1, "name": "insomnia"}]}))
            .json("tv/1399/keywords", json!({"id": 1399, "results": [{"id": 2, "name": "dragon"}]})),
    );
    let state = state_with(client.clone());

    let movie_keywords = keywords(&state, MediaKind::Movie, 550).await.unwrap();
    let series_keywords = keywords(&state, MediaKind::Series, 1399).await.unwrap();

    assert_eq!(movie_keywords[0].name, "insomnia");
    assert_eq!(series_keywords[0].name, "dragon");
    assert_eq!(state.caches.keywords.len(), 2);
}

#[tokio::test]
async fn test_company_logo_url() {
    let client = Arc::new(StubClient::new().json(
        "company/420",
        json!({"id": 420, "name": "Marvel Studios", "logo_path": "/m.png", "origin_country": "US"}),
    ));
    let state = state_with(client.clone());

    let studio = company(&state, 420).await.unwrap();
    assert_eq!(studio.logo_url, Some(format!("{}w500/m.png", IMAGE_BASE)));
    assert_eq!(studio.origin_country.as_deref(), Some("US"));
}

#[tokio::test]
async fn test_zero_ids_are_rejected() {
    let client = Arc::new(StubClient::new());
    let state = state_with(client.clone());

    assert!(matches!(person_details(&state, 0).await, Err(CatalogError::Validation(_))));
    assert!(matches!(box_set(&state, 0).await, Err(CatalogError::Validation(_))));
    assert!(matches!(company(&state, 0).await, Err(CatalogError::Validation(_))));
    assert_eq!(client.total_calls(), 0);
}

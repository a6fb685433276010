//! Shared test fixtures: a canned catalog client and a small reference table.
#![allow(dead_code)]

use async_trait::async_trait;
use cinecache::domain::error::CatalogError;
use cinecache::domain::reference::ReferenceTable;
use cinecache::domain::traits::{ApiResponse, CatalogClient};
use cinecache::infrastructure::config::Config;
use cinecache::state::AppState;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/";

#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(u16),
    Delayed(Duration, Box<Reply>),
}

#[derive(Debug, Clone)]
pub struct Call {
    pub endpoint: String,
    pub params: Vec<(String, String)>,
}

/// Catalog client answering from a route table keyed by endpoint.
///
/// Unknown endpoints answer 404. Every call is recorded.
#[derive(Default)]
pub struct StubClient {
    routes: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<Call>>,
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, endpoint: &str, reply: Reply) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), reply);
        self
    }

    pub fn json(self, endpoint: &str, value: Value) -> Self {
        self.route(endpoint, Reply::Json(value))
    }

    pub fn status(self, endpoint: &str, status: u16) -> Self {
        self.route(endpoint, Reply::Status(status))
    }

    pub fn delayed(self, endpoint: &str, delay: Duration, value: Value) -> Self {
        self.route(endpoint, Reply::Delayed(delay, Box::new(Reply::Json(value))))
    }

    /// Swap the reply of an existing route between calls.
    pub fn set(&self, endpoint: &str, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), reply);
    }

    pub fn calls(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.endpoint == endpoint)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_params(&self, endpoint: &str) -> Option<Vec<(String, String)>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|c| c.endpoint == endpoint)
            .map(|c| c.params.clone())
    }
}

#[async_trait]
impl CatalogClient for StubClient {
    async fn call(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<ApiResponse, CatalogError> {
        self.calls.lock().unwrap().push(Call {
            endpoint: endpoint.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        });
        let reply = self.routes.lock().unwrap().get(endpoint).cloned();

        let mut reply = reply.unwrap_or(Reply::Status(404));
        loop {
            match reply {
                Reply::Json(data) => return Ok(ApiResponse::ok(data)),
                Reply::Status(status) => {
                    return Err(CatalogError::from_status(endpoint, status, "stubbed"))
                }
                Reply::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    reply = *inner;
                }
            }
        }
    }
}

pub fn reference_table() -> ReferenceTable {
    ReferenceTable::builder()
        .genre(28, "Action")
        .genre(18, "Drama")
        .genre(35, "Comedy")
        .language("en", "English")
        .country("BR", "Brazil")
        .image_base_url(IMAGE_BASE)
        .build()
}

pub fn state_with(client: Arc<StubClient>) -> AppState {
    AppState::with_client(client, Config::default()).with_reference(reference_table())
}

pub fn page(page: u32, total_pages: u32, results: Vec<Value>) -> Value {
    json!({
        "page": page,
        "total_pages": total_pages,
        "total_results": total_pages * 20,
        "results": results,
    })
}

pub fn movie(id: u64, title: &str, genre_ids: &[u32], release_date: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "genre_ids": genre_ids,
        "release_date": release_date,
        "poster_path": format!("/p{}.jpg", id),
        "vote_average": 7.5,
    })
}

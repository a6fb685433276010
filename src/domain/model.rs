use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// 上游条目 (列表与详情共用)
//
// Every optional upstream field is explicit here; anything the catalog adds
// that we don't model is carried through `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub original_language: Option<String>,
    /// Genre objects, present on detail payloads only.
    #[serde(default, skip_serializing)]
    pub genres: Vec<GenreRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogItem {
    /// Display title: movies carry `title`, series carry `name`.
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.name.as_deref())
    }

    /// Original air/release date, ignoring the empty strings upstream sends
    /// for unreleased items.
    pub fn display_date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .or_else(|| self.first_air_date.as_deref().filter(|d| !d.is_empty()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreRef {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

// 列表条目: 经参考表映射后的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListedItem {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub genres: Vec<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub release_year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pagination {
    pub current_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
}

/// Where a collection page was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSource {
    Cache,
    Upstream,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionPage {
    pub items: Vec<ListedItem>,
    pub pagination: Pagination,
    pub source: PageSource,
}

// 详情富化结果
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub base: CatalogItem,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<Credits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<Video>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<ImageSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<Vec<RelatedItem>>,
}

impl EnrichedRecord {
    /// The base record as-is, with no lookups applied.
    pub fn unenriched(base: CatalogItem) -> Self {
        Self {
            base,
            poster_url: None,
            backdrop_url: None,
            genres: Vec::new(),
            credits: None,
            videos: None,
            images: None,
            related: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Credits {
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    pub job: String,
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Video {
    pub key: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageSet {
    pub backdrops: Vec<ImageLink>,
    pub posters: Vec<ImageLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageLink {
    pub file_path: String,
    pub url: Option<String>,
}

/// Thin projection of a related item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedItem {
    pub id: u64,
    pub title: Option<String>,
    pub poster_url: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
}

// 聚合: 按类型分组的热门条目
#[derive(Debug, Clone, Serialize)]
pub struct GenreShelf {
    pub id: u32,
    pub name: String,
    pub items: Vec<ListedItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonDetails {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Filmography {
    pub cast: Vec<ListedItem>,
    pub crew: Vec<ListedItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoxSet {
    pub id: u64,
    pub name: String,
    pub overview: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub parts: Vec<ListedItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub headquarters: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub origin_country: Option<String>,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_fields_fill_display_helpers() {
        let item: CatalogItem = serde_json::from_value(serde_json::json!({
            "id": 1399,
            "name": "Game of Thrones",
            "first_air_date": "2011-04-17",
            "release_date": "",
            "origin_country": ["US"]
        }))
        .unwrap();

        assert_eq!(item.display_title(), Some("Game of Thrones"));
        assert_eq!(item.display_date(), Some("2011-04-17"));
        assert!(item.genre_ids.is_empty());
        assert!(item.extra.contains_key("origin_country"));
    }

    #[test]
    fn test_detail_genres_are_not_reemitted() {
        let item: CatalogItem = serde_json::from_value(serde_json::json!({
            "id": 550,
            "title": "Fight Club",
            "genres": [{ "id": 18, "name": "Drama" }]
        }))
        .unwrap();
        assert_eq!(item.genres.len(), 1);

        let out = serde_json::to_value(&item).unwrap();
        assert!(out.get("genres").is_none());
    }
}

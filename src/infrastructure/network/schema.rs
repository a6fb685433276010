// Upstream payload shapes
//
// Missing lists default to empty and missing scalars to `None` right here, so
// nothing past the parse step has to guess at the response shape.
use crate::domain::model::{CatalogItem, GenreRef, Keyword};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RawPage<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

#[derive(Debug, Deserialize)]
pub struct RawGenreList {
    #[serde(default)]
    pub genres: Vec<GenreRef>,
}

#[derive(Debug, Deserialize)]
pub struct RawConfiguration {
    #[serde(default)]
    pub images: Option<RawImageConfiguration>,
}

#[derive(Debug, Deserialize)]
pub struct RawImageConfiguration {
    #[serde(default)]
    pub secure_base_url: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawLanguage {
    pub iso_639_1: String,
    #[serde(default)]
    pub english_name: String,
}

#[derive(Debug, Deserialize)]
pub struct RawCountry {
    pub iso_3166_1: String,
    #[serde(default)]
    pub english_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawCredits {
    #[serde(default)]
    pub cast: Vec<RawCastMember>,
    #[serde(default)]
    pub crew: Vec<RawCrewMember>,
}

#[derive(Debug, Deserialize)]
pub struct RawCastMember {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawCrewMember {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawVideos {
    #[serde(default)]
    pub results: Vec<RawVideo>,
}

#[derive(Debug, Deserialize)]
pub struct RawVideo {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawImages {
    #[serde(default)]
    pub backdrops: Vec<RawImage>,
    #[serde(default)]
    pub posters: Vec<RawImage>,
}

#[derive(Debug, Deserialize)]
pub struct RawImage {
    pub file_path: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawPersonCredits {
    #[serde(default)]
    pub cast: Vec<CatalogItem>,
    #[serde(default)]
    pub crew: Vec<CatalogItem>,
}

#[derive(Debug, Deserialize)]
pub struct RawBoxSet {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub parts: Vec<CatalogItem>,
}

/// Movies list keywords under `keywords`, series under `results`.
#[derive(Debug, Default, Deserialize)]
pub struct RawKeywords {
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    #[serde(default)]
    pub results: Vec<Keyword>,
}

impl RawKeywords {
    pub fn into_list(self) -> Vec<Keyword> {
        if self.keywords.is_empty() {
            self.results
        } else {
            self.keywords
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_defaults_missing_fields() {
        let page: RawPage<CatalogItem> = serde_json::from_value(json!({ "page": 3 })).unwrap();
        assert_eq!(page.page, 3);
        assert!(page.results.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_keywords_either_shape() {
        let movie: RawKeywords =
            serde_json::from_value(json!({ "id": 1, "keywords": [{ "id": 9, "name": "heist" }] }))
                .unwrap();
        let series: RawKeywords =
            serde_json::from_value(json!({ "id": 1, "results": [{ "id": 7, "name": "dragon" }] }))
                .unwrap();
        assert_eq!(movie.into_list()[0].name, "heist");
        assert_eq!(series.into_list()[0].name, "dragon");
    }
}

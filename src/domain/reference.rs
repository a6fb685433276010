use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

pub const DEFAULT_POSTER_SIZE: &str = "w500";
pub const DEFAULT_BACKDROP_SIZE: &str = "w1280";
pub const DEFAULT_PROFILE_SIZE: &str = "w185";

/// Static lookup data needed to turn upstream identifiers into display values.
///
/// Built once by the loader and never mutated afterwards; a refresh builds a
/// whole new table and swaps it in through [`ReferenceHandle::replace`].
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceTable {
    genres: HashMap<u32, String>,
    languages: HashMap<String, String>,
    countries: HashMap<String, String>,
    image_base_url: Option<String>,
    poster_size: String,
    backdrop_size: String,
    profile_size: String,
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self {
            genres: HashMap::new(),
            languages: HashMap::new(),
            countries: HashMap::new(),
            image_base_url: None,
            poster_size: DEFAULT_POSTER_SIZE.to_string(),
            backdrop_size: DEFAULT_BACKDROP_SIZE.to_string(),
            profile_size: DEFAULT_PROFILE_SIZE.to_string(),
        }
    }
}

impl ReferenceTable {
    pub fn builder() -> ReferenceTableBuilder {
        ReferenceTableBuilder::default()
    }

    /// A table is populated once the image configuration has been loaded.
    pub fn is_populated(&self) -> bool {
        self.image_base_url.is_some()
    }

    pub fn genre_name(&self, id: u32) -> Option<&str> {
        self.genres.get(&id).map(String::as_str)
    }

    /// Genre name, or a placeholder label for ids the table doesn't know.
    pub fn genre_label(&self, id: u32) -> String {
        self.genre_name(id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Genre {}", id))
    }

    pub fn language_name(&self, code: &str) -> Option<&str> {
        self.languages.get(code).map(String::as_str)
    }

    pub fn country_name(&self, code: &str) -> Option<&str> {
        self.countries.get(code).map(String::as_str)
    }

    pub fn image_base_url(&self) -> Option<&str> {
        self.image_base_url.as_deref()
    }

    pub fn poster_url(&self, path: Option<&str>) -> Option<String> {
        self.image_url(path, &self.poster_size)
    }

    pub fn backdrop_url(&self, path: Option<&str>) -> Option<String> {
        self.image_url(path, &self.backdrop_size)
    }

    pub fn profile_url(&self, path: Option<&str>) -> Option<String> {
        self.image_url(path, &self.profile_size)
    }

    fn image_url(&self, path: Option<&str>, size: &str) -> Option<String> {
        let path = path.filter(|p| !p.is_empty())?;
        let base = self.image_base_url.as_deref()?;
        Some(format!("{}{}{}", base, size, path))
    }

    /// Genres sorted by id.
    pub fn genres(&self) -> Vec<(u32, &str)> {
        let mut out: Vec<_> = self
            .genres
            .iter()
            .map(|(id, name)| (*id, name.as_str()))
            .collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }

    /// Languages sorted by code.
    pub fn languages(&self) -> Vec<(&str, &str)> {
        sorted_codes(&self.languages)
    }

    /// Countries sorted by code.
    pub fn countries(&self) -> Vec<(&str, &str)> {
        sorted_codes(&self.countries)
    }
}

fn sorted_codes(map: &HashMap<String, String>) -> Vec<(&str, &str)> {
    let mut out: Vec<_> = map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    out.sort_by(|a, b| a.0.cmp(b.0));
    out
}

#[derive(Debug, Default)]
pub struct ReferenceTableBuilder {
    table: ReferenceTable,
}

impl ReferenceTableBuilder {
    pub fn genre(mut self, id: u32, name: impl Into<String>) -> Self {
        self.table.genres.insert(id, name.into());
        self
    }

    pub fn genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        self.table
            .genres
            .extend(genres.into_iter().map(|(id, name)| (id, name.into())));
        self
    }

    pub fn language(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.table.languages.insert(code.into(), name.into());
        self
    }

    pub fn country(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.table.countries.insert(code.into(), name.into());
        self
    }

    pub fn image_base_url(mut self, url: impl Into<String>) -> Self {
        self.table.image_base_url = Some(url.into());
        self
    }

    pub fn image_sizes(
        mut self,
        poster: impl Into<String>,
        backdrop: impl Into<String>,
        profile: impl Into<String>,
    ) -> Self {
        self.table.poster_size = poster.into();
        self.table.backdrop_size = backdrop.into();
        self.table.profile_size = profile.into();
        self
    }

    pub fn build(self) -> ReferenceTable {
        self.table
    }
}

/// Shared holder for the current reference table.
///
/// Readers take an `Arc` snapshot and keep using it for the rest of their
/// work, so a concurrent `replace` can never be observed half-applied.
#[derive(Debug, Clone, Default)]
pub struct ReferenceHandle {
    current: Arc<RwLock<Arc<ReferenceTable>>>,
}

impl ReferenceHandle {
    pub fn new(table: ReferenceTable) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(table))),
        }
    }

    pub fn snapshot(&self) -> Arc<ReferenceTable> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub fn replace(&self, table: ReferenceTable) {
        let table = Arc::new(table);
        match self.current.write() {
            Ok(mut guard) => *guard = table,
            Err(poisoned) => *poisoned.into_inner() = table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ReferenceTable {
        ReferenceTable::builder()
            .genre(28, "Action")
            .language("en", "English")
            .country("BR", "Brazil")
            .image_base_url("https://image.tmdb.org/t/p/")
            .build()
    }

    #[test]
    fn test_image_urls() {
        let t = table();
        assert_eq!(
            t.poster_url(Some("/a.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/a.jpg")
        );
        assert_eq!(
            t.backdrop_url(Some("/b.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w1280/b.jpg")
        );
        assert_eq!(
            t.profile_url(Some("/c.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w185/c.jpg")
        );
        assert_eq!(t.poster_url(None), None);
        assert_eq!(t.poster_url(Some("")), None);
    }

    #[test]
    fn test_unpopulated_table_builds_no_urls() {
        let t = ReferenceTable::default();
        assert!(!t.is_populated());
        assert_eq!(t.poster_url(Some("/a.jpg")), None);
        assert_eq!(t.genre_label(28), "Genre 28");
    }

    #[test]
    fn test_lookups() {
        let t = table();
        assert_eq!(t.genre_label(28), "Action");
        assert_eq!(t.language_name("en"), Some("English"));
        assert_eq!(t.country_name("BR"), Some("Brazil"));
        assert_eq!(t.country_name("XX"), None);
    }

    #[test]
    fn test_replace_swaps_whole_table() {
        let handle = ReferenceHandle::default();
        let before = handle.snapshot();
        handle.replace(table());

        assert!(!before.is_populated());
        assert!(handle.snapshot().is_populated());
        assert_eq!(handle.snapshot().genre_name(28), Some("Action"));
    }
}

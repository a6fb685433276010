// Reference-table mapping for list views
use crate::domain::model::{CatalogItem, ListedItem};
use crate::domain::reference::ReferenceTable;
use chrono::{Datelike, NaiveDate};

/// Year part of an upstream `YYYY-MM-DD` date.
pub fn release_year(date: Option<&str>) -> Option<i32> {
    let date = date?.trim();
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.year())
        .ok()
        .or_else(|| date.get(..4).and_then(|y| y.parse().ok()))
}

/// Resolve genre ids to names and image paths to absolute URLs.
pub fn map_item(item: CatalogItem, table: &ReferenceTable) -> ListedItem {
    let genres = item
        .genre_ids
        .iter()
        .map(|id| table.genre_label(*id))
        .collect();
    let poster_url = table.poster_url(item.poster_path.as_deref());
    let backdrop_url = table.backdrop_url(item.backdrop_path.as_deref());
    let release_year = release_year(item.display_date());

    ListedItem {
        item,
        genres,
        poster_url,
        backdrop_url,
        release_year,
    }
}

pub fn map_items(items: Vec<CatalogItem>, table: &ReferenceTable) -> Vec<ListedItem> {
    items.into_iter().map(|item| map_item(item, table)).collect()
}

/// Sort newest first; undated entries go last.
pub fn sort_newest_first(items: &mut [ListedItem]) {
    items.sort_by(|a, b| sort_date(b).cmp(&sort_date(a)));
}

/// Sort oldest first; undated entries go first.
pub fn sort_oldest_first(items: &mut [ListedItem]) {
    items.sort_by(|a, b| sort_date(a).cmp(&sort_date(b)));
}

fn sort_date(item: &ListedItem) -> Option<NaiveDate> {
    item.item
        .display_date()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

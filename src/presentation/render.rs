// Plain-text rendering for terminal output
use crate::domain::model::{
    BoxSet, CollectionPage, Company, EnrichedRecord, Filmography, GenreShelf, Keyword,
    ListedItem, PageSource, PersonDetails,
};
use crate::domain::reference::ReferenceTable;
use crate::presentation::theme::Theme;
use std::fmt::Write;

fn cutoff(theme: &Theme) -> String {
    (theme.line)(&"⸺".repeat(40))
}

fn item_line(output: &mut String, idx: usize, item: &ListedItem, theme: &Theme) {
    let title = item.item.display_title().unwrap_or("(untitled)");
    let year = item
        .release_year
        .map(|y| format!(" ({})", y))
        .unwrap_or_default();
    let rating = item
        .item
        .vote_average
        .map(|v| format!("  ★ {:.1}", v))
        .unwrap_or_default();

    writeln!(
        output,
        "  {}. {}{}{}",
        (theme.idx)(&idx.to_string()),
        (theme.body)(title),
        (theme.meta)(&year),
        (theme.rating)(&rating)
    )
    .ok();
    if !item.genres.is_empty() {
        writeln!(output, "     {}", (theme.genre)(&item.genres.join(", "))).ok();
    }
}

pub fn format_page(page: &CollectionPage, theme: &Theme) -> String {
    let mut output = String::new();
    let source = match page.source {
        PageSource::Cache => "[cache]",
        PageSource::Upstream => "[online]",
    };

    let p = &page.pagination;
    let totals = match (p.total_pages, p.total_results) {
        (Some(pages), Some(results)) => format!(" of {} ({} results)", pages, results),
        _ => String::new(),
    };
    writeln!(
        output,
        "{} {}{} {}",
        (theme.title)(&format!("Page {}", p.current_page)),
        (theme.meta)(&totals),
        if p.has_more { " ›" } else { "" },
        (theme.label)(source)
    )
    .ok();

    if page.items.is_empty() {
        writeln!(output, "  {}", (theme.meta)("No results")).ok();
    }
    for (i, item) in page.items.iter().enumerate() {
        item_line(&mut output, i + 1, item, theme);
    }
    writeln!(output).ok();
    output
}

pub fn format_details(record: &EnrichedRecord, theme: &Theme) -> String {
    let mut output = String::new();
    let base = &record.base;

    let title = base.display_title().unwrap_or("(untitled)");
    writeln!(output, "{}", (theme.title)(title)).ok();
    let mut meta = Vec::new();
    if let Some(date) = base.display_date() {
        meta.push(date.to_string());
    }
    if let Some(vote) = base.vote_average {
        meta.push(format!("★ {:.1}", vote));
    }
    if !meta.is_empty() {
        writeln!(output, "  {}", (theme.meta)(&meta.join("  "))).ok();
    }
    if !record.genres.is_empty() {
        writeln!(output, "  {}", (theme.genre)(&record.genres.join(", "))).ok();
    }
    if let Some(overview) = base.overview.as_deref().filter(|o| !o.is_empty()) {
        writeln!(output).ok();
        writeln!(output, "  {}", (theme.body)(overview)).ok();
    }
    if let Some(url) = &record.poster_url {
        writeln!(output, "  {} {}", (theme.label)("Poster"), (theme.link)(url)).ok();
    }

    if let Some(credits) = &record.credits {
        writeln!(output).ok();
        writeln!(output, "  {}", cutoff(theme)).ok();
        for member in &credits.cast {
            let role = member.character.as_deref().unwrap_or("");
            writeln!(
                output,
                "  {} {}",
                (theme.body)(&member.name),
                (theme.meta)(role)
            )
            .ok();
        }
        for member in &credits.crew {
            writeln!(
                output,
                "  {} {}",
                (theme.label)(&member.job),
                (theme.body)(&member.name)
            )
            .ok();
        }
    }

    if let Some(videos) = record.videos.as_ref().filter(|v| !v.is_empty()) {
        writeln!(output).ok();
        for video in videos {
            let name = video.name.as_deref().unwrap_or(&video.key);
            writeln!(output, "  ▶ {} {}", (theme.body)(name), (theme.link)(&video.url)).ok();
        }
    }

    if let Some(images) = &record.images {
        writeln!(
            output,
            "  {} {} backdrops, {} posters",
            (theme.label)("Images"),
            images.backdrops.len(),
            images.posters.len()
        )
        .ok();
    }

    if let Some(related) = record.related.as_ref().filter(|r| !r.is_empty()) {
        writeln!(output).ok();
        writeln!(output, "  {}", (theme.label)("Similar")).ok();
        for (i, item) in related.iter().enumerate() {
            writeln!(
                output,
                "  {}. {}",
                (theme.idx)(&(i + 1).to_string()),
                (theme.body)(item.title.as_deref().unwrap_or("(untitled)"))
            )
            .ok();
        }
    }

    writeln!(output).ok();
    output
}

pub fn format_showcase(shelves: &[GenreShelf], theme: &Theme) -> String {
    let mut output = String::new();
    for shelf in shelves {
        writeln!(output, "{}", (theme.title)(&shelf.name)).ok();
        for (i, item) in shelf.items.iter().enumerate() {
            item_line(&mut output, i + 1, item, theme);
        }
        writeln!(output).ok();
    }
    output
}

pub fn format_person(person: &PersonDetails, theme: &Theme) -> String {
    let mut output = String::new();
    writeln!(output, "{}", (theme.title)(&person.name)).ok();
    let meta: Vec<&str> = [
        person.known_for_department.as_deref(),
        person.birthday.as_deref(),
        person.place_of_birth.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !meta.is_empty() {
        writeln!(output, "  {}", (theme.meta)(&meta.join("  "))).ok();
    }
    if let Some(bio) = person.biography.as_deref().filter(|b| !b.is_empty()) {
        writeln!(output).ok();
        writeln!(output, "  {}", (theme.body)(bio)).ok();
    }
    writeln!(output).ok();
    output
}

pub fn format_filmography(filmography: &Filmography, theme: &Theme) -> String {
    let mut output = String::new();
    for (label, items) in [("Cast", &filmography.cast), ("Crew", &filmography.crew)] {
        if items.is_empty() {
            continue;
        }
        writeln!(output, "{}", (theme.title)(label)).ok();
        for (i, item) in items.iter().enumerate() {
            item_line(&mut output, i + 1, item, theme);
        }
        writeln!(output).ok();
    }
    output
}

pub fn format_box_set(set: &BoxSet, theme: &Theme) -> String {
    let mut output = String::new();
    writeln!(output, "{}", (theme.title)(&set.name)).ok();
    if let Some(overview) = set.overview.as_deref().filter(|o| !o.is_empty()) {
        writeln!(output, "  {}", (theme.body)(overview)).ok();
    }
    for (i, item) in set.parts.iter().enumerate() {
        item_line(&mut output, i + 1, item, theme);
    }
    writeln!(output).ok();
    output
}

pub fn format_keywords(keywords: &[Keyword], theme: &Theme) -> String {
    let names: Vec<&str> = keywords.iter().map(|k| k.name.as_str()).collect();
    format!("  {}\n", (theme.genre)(&names.join(", ")))
}

pub fn format_company(company: &Company, theme: &Theme) -> String {
    let mut output = String::new();
    writeln!(output, "{}", (theme.title)(&company.name)).ok();
    for (label, value) in [
        ("Headquarters", company.headquarters.as_deref()),
        ("Country", company.origin_country.as_deref()),
        ("Homepage", company.homepage.as_deref()),
    ] {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            writeln!(output, "  {} {}", (theme.label)(label), (theme.body)(value)).ok();
        }
    }
    writeln!(output).ok();
    output
}

/// Reference data sections selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceSection {
    Genres,
    Languages,
    Countries,
    Images,
}

pub fn format_reference(table: &ReferenceTable, section: ReferenceSection, theme: &Theme) -> String {
    let mut output = String::new();
    match section {
        ReferenceSection::Genres => {
            for (id, name) in table.genres() {
                writeln!(output, "  {} {}", (theme.idx)(&id.to_string()), (theme.body)(name)).ok();
            }
        }
        ReferenceSection::Languages => {
            for (code, name) in table.languages() {
                writeln!(output, "  {} {}", (theme.idx)(code), (theme.body)(name)).ok();
            }
        }
        ReferenceSection::Countries => {
            for (code, name) in table.countries() {
                writeln!(output, "  {} {}", (theme.idx)(code), (theme.body)(name)).ok();
            }
        }
        ReferenceSection::Images => {
            let base = table.image_base_url().unwrap_or("(not loaded)");
            writeln!(output, "  {} {}", (theme.label)("Base URL"), (theme.link)(base)).ok();
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CatalogItem, Pagination};

    fn plain() -> Theme {
        colored::control::set_override(false);
        Theme::from_name("marquee")
    }

    #[test]
    fn test_page_lists_items_with_year_and_genres() {
        let page = CollectionPage {
            items: vec![ListedItem {
                item: CatalogItem {
                    id: Some(1),
                    title: Some("Heat".to_string()),
                    vote_average: Some(8.26),
                    ..CatalogItem::default()
                },
                genres: vec!["Crime".to_string()],
                poster_url: None,
                backdrop_url: None,
                release_year: Some(1995),
            }],
            pagination: Pagination {
                current_page: 1,
                page_size: Some(20),
                has_more: false,
                total_pages: Some(1),
                total_results: Some(1),
            },
            source: PageSource::Upstream,
        };

        let out = format_page(&page, &plain());
        assert!(out.contains("1. Heat (1995)"));
        assert!(out.contains("★ 8.3"));
        assert!(out.contains("Crime"));
        assert!(out.contains("[online]"));
    }
}

// People, box sets, keywords and companies
use crate::application::mapping::{map_items, sort_newest_first, sort_oldest_first};
use crate::domain::error::CatalogError;
use crate::domain::model::{BoxSet, Company, Filmography, Keyword, PersonDetails};
use crate::domain::query::{validate_id, MediaKind};
use crate::infrastructure::network::schema::{RawBoxSet, RawKeywords, RawPersonCredits};
use crate::infrastructure::storage::keys::entity_key;
use crate::state::AppState;
use tracing::debug;

pub async fn person_details(state: &AppState, id: u64) -> Result<PersonDetails, CatalogError> {
    validate_id("person", id)?;
    let key = entity_key("person", id);
    if let Some(person) = state.caches.people.get(&key) {
        debug!(key = %key, "person cache hit");
        return Ok(person);
    }

    let mut person: PersonDetails = state
        .client
        .call(&format!("person/{}", id), &[])
        .await?
        .parse()?;
    person.profile_url = state
        .reference
        .snapshot()
        .profile_url(person.profile_path.as_deref());

    state.caches.people.insert(key, person.clone());
    Ok(person)
}

/// A person's movie or series credits, newest first.
pub async fn person_credits(
    state: &AppState,
    media: MediaKind,
    id: u64,
) -> Result<Filmography, CatalogError> {
    validate_id("person", id)?;
    let key = entity_key(&format!("person_credits:{}", media), id);
    if let Some(filmography) = state.caches.filmographies.get(&key) {
        debug!(key = %key, "filmography cache hit");
        return Ok(filmography);
    }

    let endpoint = match media {
        MediaKind::Movie => format!("person/{}/movie_credits", id),
        MediaKind::Series => format!("person/{}/tv_credits", id),
    };
    let raw: RawPersonCredits = state.client.call(&endpoint, &[]).await?.parse()?;

    let table = state.reference.snapshot();
    let mut cast = map_items(raw.cast, &table);
    let mut crew = map_items(raw.crew, &table);
    sort_newest_first(&mut cast);
    sort_newest_first(&mut crew);

    let filmography = Filmography { cast, crew };
    state.caches.filmographies.insert(key, filmography.clone());
    Ok(filmography)
}

/// A box set (upstream "collection") with its parts oldest first.
pub async fn box_set(state: &AppState, id: u64) -> Result<BoxSet, CatalogError> {
    validate_id("box set", id)?;
    let key = entity_key("box_set", id);
    if let Some(set) = state.caches.box_sets.get(&key) {
        debug!(key = %key, "box set cache hit");
        return Ok(set);
    }

    let raw: RawBoxSet = state
        .client
        .call(&format!("collection/{}", id), &[])
        .await?
        .parse()?;

    let table = state.reference.snapshot();
    let mut parts = map_items(raw.parts, &table);
    sort_oldest_first(&mut parts);

    let set = BoxSet {
        id: raw.id,
        name: raw.name,
        overview: raw.overview,
        poster_url: table.poster_url(raw.poster_path.as_deref()),
        backdrop_url: table.backdrop_url(raw.backdrop_path.as_deref()),
        parts,
    };
    state.caches.box_sets.insert(key, set.clone());
    Ok(set)
}

pub async fn keywords(
    state: &AppState,
    media: MediaKind,
    id: u64,
) -> Result<Vec<Keyword>, CatalogError> {
    validate_id(media.segment(), id)?;
    let key = entity_key(&format!("keywords:{}", media), id);
    if let Some(list) = state.caches.keywords.get(&key) {
        debug!(key = %key, "keywords cache hit");
        return Ok(list);
    }

    let raw: RawKeywords = state
        .client
        .call(&format!("{}/{}/keywords", media.segment(), id), &[])
        .await?
        .parse()?;

    let list = raw.into_list();
    state.caches.keywords.insert(key, list.clone());
    Ok(list)
}

pub async fn company(state: &AppState, id: u64) -> Result<Company, CatalogError> {
    validate_id("company", id)?;
    let key = entity_key("company", id);
    if let Some(company) = state.caches.companies.get(&key) {
        debug!(key = %key, "company cache hit");
        return Ok(company);
    }

    let mut company: Company = state
        .client
        .call(&format!("company/{}", id), &[])
        .await?
        .parse()?;
    company.logo_url = state
        .reference
        .snapshot()
        .poster_url(company.logo_path.as_deref());

    state.caches.companies.insert(key, company.clone());
    Ok(company)
}

// Start-up population of the reference table
use crate::application::fanout::{run_all, Outcome, SubFetch};
use crate::domain::error::CatalogError;
use crate::domain::model::GenreRef;
use crate::domain::reference::ReferenceTable;
use crate::domain::traits::CatalogClient;
use crate::infrastructure::config::ImageConfig;
use crate::infrastructure::network::schema::{
    RawConfiguration, RawCountry, RawGenreList, RawLanguage,
};
use std::sync::Arc;
use tracing::{info, warn};

enum ReferenceData {
    Configuration(RawConfiguration),
    Genres(Vec<GenreRef>),
    Languages(Vec<RawLanguage>),
    Countries(Vec<RawCountry>),
}

fn fetch<F>(client: &Arc<dyn CatalogClient>, endpoint: &'static str, wrap: F) -> SubFetch<ReferenceData>
where
    F: FnOnce(serde_json::Value) -> Result<ReferenceData, CatalogError> + Send + 'static,
{
    let client = Arc::clone(client);
    SubFetch::new(endpoint, async move {
        let response = client.call(endpoint, &[]).await?;
        wrap(response.data)
    })
}

/// Fetch image configuration, genre lists (movie and series, merged),
/// languages and countries, all in parallel.
///
/// The image configuration is required; the other lists degrade to empty
/// with a warning when their call fails.
pub async fn load_reference_table(
    client: &Arc<dyn CatalogClient>,
    images: &ImageConfig,
) -> Result<ReferenceTable, CatalogError> {
    let specs = vec![
        fetch(client, "configuration", |v| {
            Ok(ReferenceData::Configuration(serde_json::from_value(v)?))
        }),
        fetch(client, "genre/movie/list", |v| {
            let list: RawGenreList = serde_json::from_value(v)?;
            Ok(ReferenceData::Genres(list.genres))
        }),
        fetch(client, "genre/tv/list", |v| {
            let list: RawGenreList = serde_json::from_value(v)?;
            Ok(ReferenceData::Genres(list.genres))
        }),
        fetch(client, "configuration/languages", |v| {
            Ok(ReferenceData::Languages(serde_json::from_value(v)?))
        }),
        fetch(client, "configuration/countries", |v| {
            Ok(ReferenceData::Countries(serde_json::from_value(v)?))
        }),
    ];

    let mut builder = ReferenceTable::builder().image_sizes(
        images.poster_size.as_str(),
        images.backdrop_size.as_str(),
        images.profile_size.as_str(),
    );
    let mut base_url = None;
    let (mut genres, mut languages, mut countries) = (0usize, 0usize, 0usize);

    for outcome in run_all(specs).await {
        match outcome {
            Outcome::Fulfilled(ReferenceData::Configuration(config)) => {
                base_url = config
                    .images
                    .and_then(|images| images.secure_base_url.or(images.base_url));
            }
            Outcome::Fulfilled(ReferenceData::Genres(list)) => {
                genres += list.len();
                builder = builder.genres(list.into_iter().map(|g| (g.id, g.name)));
            }
            Outcome::Fulfilled(ReferenceData::Languages(list)) => {
                languages += list.len();
                for language in list {
                    builder = builder.language(language.iso_639_1, language.english_name);
                }
            }
            Outcome::Fulfilled(ReferenceData::Countries(list)) => {
                countries += list.len();
                for country in list {
                    builder = builder.country(country.iso_3166_1, country.english_name);
                }
            }
            Outcome::Rejected(e) => warn!(error = %e, "reference lookup failed"),
        }
    }

    let base_url = base_url.ok_or_else(|| {
        CatalogError::Init("image configuration unavailable from upstream".to_string())
    })?;
    let table = builder.image_base_url(base_url).build();
    info!(genres, languages, countries, "reference table loaded");
    Ok(table)
}

// Detail enrichment: base record + cross-referenced sub-fetches
use crate::application::fanout::{run_all, Outcome, SubFetch};
use crate::domain::error::CatalogError;
use crate::domain::model::{
    CastMember, CatalogItem, Credits, CrewMember, EnrichedRecord, ImageLink, ImageSet,
    RelatedItem, Video,
};
use crate::domain::query::{EnrichmentDepth, MediaKind};
use crate::domain::reference::{ReferenceHandle, ReferenceTable};
use crate::domain::traits::CatalogClient;
use crate::infrastructure::network::schema::{RawCredits, RawImages, RawPage, RawVideos};
use std::sync::Arc;
use tracing::{debug, warn};

pub const CAST_LIMIT: usize = 10;
pub const IMAGE_LIMIT: usize = 5;
pub const RELATED_LIMIT: usize = 6;
pub const CREW_JOBS: [&str; 5] = [
    "Director",
    "Producer",
    "Executive Producer",
    "Screenplay",
    "Writer",
];
/// Only videos hosted here can be embedded by clients.
pub const VIDEO_SITE: &str = "YouTube";
const EMBED_BASE_URL: &str = "https://youtube.com/embed/";

/// Fields the composer owns on the output record; any same-named pass-through
/// field on the base record is dropped so each key appears exactly once.
const COMPOSED_FIELDS: [&str; 7] = [
    "poster_url",
    "backdrop_url",
    "genres",
    "credits",
    "videos",
    "images",
    "related",
];

/// One cross-referenced lookup the composer can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Genres,
    Credits,
    Videos,
    Images,
    Related,
}

impl Facet {
    pub fn key(self) -> &'static str {
        match self {
            Facet::Genres => "genres",
            Facet::Credits => "credits",
            Facet::Videos => "videos",
            Facet::Images => "images",
            Facet::Related => "related",
        }
    }
}

/// Sub-fetch payload; which facet it belongs to is decided by position.
#[derive(Debug)]
enum FacetData {
    Genres(Vec<String>),
    Credits(Credits),
    Videos(Vec<Video>),
    Images(ImageSet),
    Related(Vec<RelatedItem>),
}

/// Sub-fetches to issue for `base` at `depth`, in submission order.
///
/// Nothing can be looked up for a record without an id.
pub fn plan(base: &CatalogItem, depth: EnrichmentDepth) -> Vec<Facet> {
    if base.id.is_none() {
        return Vec::new();
    }
    match depth {
        EnrichmentDepth::Basic => vec![Facet::Genres],
        EnrichmentDepth::Detailed => plan_all(),
    }
}

/// An enriched record plus the facets whose sub-fetch failed.
#[derive(Debug, Clone)]
pub struct EnrichmentReport {
    pub record: EnrichedRecord,
    pub failed: Vec<Facet>,
}

impl EnrichmentReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

fn plan_all() -> Vec<Facet> {
    vec![
        Facet::Genres,
        Facet::Credits,
        Facet::Videos,
        Facet::Images,
        Facet::Related,
    ]
}

/// Assembles detail records from a base record plus optional sub-fetches.
#[derive(Clone)]
pub struct Enricher {
    client: Arc<dyn CatalogClient>,
    reference: ReferenceHandle,
}

impl Enricher {
    pub fn new(client: Arc<dyn CatalogClient>, reference: ReferenceHandle) -> Self {
        Self { client, reference }
    }

    /// Best-effort enrichment; never fails.
    ///
    /// A failed sub-fetch only empties its own field. If the composition
    /// itself goes wrong, the base record comes back unenriched.
    pub async fn enrich(
        &self,
        media: MediaKind,
        base: CatalogItem,
        depth: EnrichmentDepth,
    ) -> EnrichedRecord {
        self.enrich_with_report(media, base, depth).await.record
    }

    /// Like [`Enricher::enrich`], also reporting which facets fell back to
    /// their defaults.
    pub async fn enrich_with_report(
        &self,
        media: MediaKind,
        base: CatalogItem,
        depth: EnrichmentDepth,
    ) -> EnrichmentReport {
        let fallback = base.clone();
        settle(fallback, self.try_enrich(media, base, depth).await)
    }

    async fn try_enrich(
        &self,
        media: MediaKind,
        base: CatalogItem,
        depth: EnrichmentDepth,
    ) -> Result<EnrichmentReport, CatalogError> {
        let table = self.reference.snapshot();
        let facets = plan(&base, depth);

        let specs: Vec<SubFetch<FacetData>> = match base.id {
            Some(id) => facets
                .iter()
                .map(|facet| self.sub_fetch(media, id, *facet, &table))
                .collect(),
            None => Vec::new(),
        };
        debug!(id = ?base.id, depth = depth.name(), count = specs.len(), "enriching record");
        let outcomes = run_all(specs).await;

        compose(base, facets, outcomes, &table)
    }

    fn sub_fetch(
        &self,
        media: MediaKind,
        id: u64,
        facet: Facet,
        table: &Arc<ReferenceTable>,
    ) -> SubFetch<FacetData> {
        let client = Arc::clone(&self.client);
        let table = Arc::clone(table);
        let key = format!("{}/{}:{}", media, id, facet.key());
        match facet {
            Facet::Genres => SubFetch::new(key, async move {
                fetch_genre_names(client.as_ref(), media, id)
                    .await
                    .map(FacetData::Genres)
            }),
            Facet::Credits => SubFetch::new(key, async move {
                fetch_credits(client.as_ref(), &table, media, id)
                    .await
                    .map(FacetData::Credits)
            }),
            Facet::Videos => SubFetch::new(key, async move {
                fetch_videos(client.as_ref(), media, id)
                    .await
                    .map(FacetData::Videos)
            }),
            Facet::Images => SubFetch::new(key, async move {
                fetch_images(client.as_ref(), &table, media, id)
                    .await
                    .map(FacetData::Images)
            }),
            Facet::Related => SubFetch::new(key, async move {
                fetch_related(client.as_ref(), &table, media, id)
                    .await
                    .map(FacetData::Related)
            }),
        }
    }
}

/// A composition failure degrades to the unenriched base record, with every
/// facet reported as failed.
fn settle(
    fallback: CatalogItem,
    result: Result<EnrichmentReport, CatalogError>,
) -> EnrichmentReport {
    match result {
        Ok(report) => report,
        Err(e) => {
            warn!(error = %e, id = ?fallback.id, "enrichment failed, returning base record");
            EnrichmentReport {
                record: EnrichedRecord::unenriched(fallback),
                failed: plan_all(),
            }
        }
    }
}

/// Merge sub-fetch outcomes into the record. The Nth outcome belongs to the
/// Nth facet.
fn compose(
    mut base: CatalogItem,
    facets: Vec<Facet>,
    outcomes: Vec<Outcome<FacetData>>,
    table: &ReferenceTable,
) -> Result<EnrichmentReport, CatalogError> {
    if outcomes.len() != facets.len() {
        return Err(CatalogError::Enrichment(format!(
            "expected {} sub-fetch outcomes, got {}",
            facets.len(),
            outcomes.len()
        )));
    }

    base.extra
        .retain(|key, _| !COMPOSED_FIELDS.contains(&key.as_str()));
    let poster_url = table.poster_url(base.poster_path.as_deref());
    let backdrop_url = table.backdrop_url(base.backdrop_path.as_deref());
    let mut record = EnrichedRecord {
        poster_url,
        backdrop_url,
        ..EnrichedRecord::unenriched(base)
    };

    let mut failed = Vec::new();
    for (facet, outcome) in facets.into_iter().zip(outcomes) {
        match (facet, outcome) {
            (Facet::Genres, Outcome::Fulfilled(FacetData::Genres(genres))) => {
                record.genres = genres
            }
            (Facet::Credits, Outcome::Fulfilled(FacetData::Credits(credits))) => {
                record.credits = Some(credits)
            }
            (Facet::Videos, Outcome::Fulfilled(FacetData::Videos(videos))) => {
                record.videos = Some(videos)
            }
            (Facet::Images, Outcome::Fulfilled(FacetData::Images(images))) => {
                record.images = Some(images)
            }
            (Facet::Related, Outcome::Fulfilled(FacetData::Related(related))) => {
                record.related = Some(related)
            }
            (facet, Outcome::Rejected(_)) => {
                apply_default(&mut record, facet);
                failed.push(facet);
            }
            (facet, Outcome::Fulfilled(_)) => {
                return Err(CatalogError::Enrichment(format!(
                    "sub-fetch for '{}' produced data for another facet",
                    facet.key()
                )));
            }
        }
    }

    Ok(EnrichmentReport { record, failed })
}

/// Value a facet takes when its sub-fetch failed.
fn apply_default(record: &mut EnrichedRecord, facet: Facet) {
    match facet {
        Facet::Genres => record.genres = Vec::new(),
        Facet::Credits => record.credits = None,
        Facet::Videos => record.videos = Some(Vec::new()),
        Facet::Images => record.images = None,
        Facet::Related => record.related = Some(Vec::new()),
    }
}

/// List payloads only carry genre ids, so names come from a fresh detail call.
pub async fn fetch_genre_names(
    client: &dyn CatalogClient,
    media: MediaKind,
    id: u64,
) -> Result<Vec<String>, CatalogError> {
    let details: CatalogItem = client
        .call(&format!("{}/{}", media.segment(), id), &[])
        .await?
        .parse()?;
    Ok(details.genres.into_iter().map(|g| g.name).collect())
}

pub async fn fetch_credits(
    client: &dyn CatalogClient,
    table: &ReferenceTable,
    media: MediaKind,
    id: u64,
) -> Result<Credits, CatalogError> {
    let raw: RawCredits = client
        .call(&format!("{}/{}/credits", media.segment(), id), &[])
        .await?
        .parse()?;

    let cast = raw
        .cast
        .into_iter()
        .take(CAST_LIMIT)
        .map(|person| CastMember {
            id: person.id,
            name: person.name,
            character: person.character,
            profile_url: table.profile_url(person.profile_path.as_deref()),
        })
        .collect();

    let crew = raw
        .crew
        .into_iter()
        .filter_map(|person| {
            let job = person.job.filter(|job| CREW_JOBS.contains(&job.as_str()))?;
            Some(CrewMember {
                id: person.id,
                name: person.name,
                job,
                profile_url: table.profile_url(person.profile_path.as_deref()),
            })
        })
        .collect();

    Ok(Credits { cast, crew })
}

pub async fn fetch_videos(
    client: &dyn CatalogClient,
    media: MediaKind,
    id: u64,
) -> Result<Vec<Video>, CatalogError> {
    let raw: RawVideos = client
        .call(&format!("{}/{}/videos", media.segment(), id), &[])
        .await?
        .parse()?;

    Ok(raw
        .results
        .into_iter()
        .filter(|video| video.site.as_deref() == Some(VIDEO_SITE))
        .map(|video| Video {
            url: format!("{}{}", EMBED_BASE_URL, video.key),
            key: video.key,
            name: video.name,
            kind: video.kind,
        })
        .collect())
}

/// First few backdrops and posters, in upstream order.
pub async fn fetch_images(
    client: &dyn CatalogClient,
    table: &ReferenceTable,
    media: MediaKind,
    id: u64,
) -> Result<ImageSet, CatalogError> {
    let raw: RawImages = client
        .call(&format!("{}/{}/images", media.segment(), id), &[])
        .await?
        .parse()?;

    let backdrops = raw
        .backdrops
        .into_iter()
        .take(IMAGE_LIMIT)
        .map(|image| ImageLink {
            url: table.backdrop_url(Some(&image.file_path)),
            file_path: image.file_path,
        })
        .collect();
    let posters = raw
        .posters
        .into_iter()
        .take(IMAGE_LIMIT)
        .map(|image| ImageLink {
            url: table.poster_url(Some(&image.file_path)),
            file_path: image.file_path,
        })
        .collect();

    Ok(ImageSet { backdrops, posters })
}

pub async fn fetch_related(
    client: &dyn CatalogClient,
    table: &ReferenceTable,
    media: MediaKind,
    id: u64,
) -> Result<Vec<RelatedItem>, CatalogError> {
    let raw: RawPage<CatalogItem> = client
        .call(
            &format!("{}/{}/similar", media.segment(), id),
            &[("page", "1".to_string())],
        )
        .await?
        .parse()?;

    Ok(raw
        .results
        .into_iter()
        .take(RELATED_LIMIT)
        .filter_map(|item| {
            Some(RelatedItem {
                id: item.id?,
                title: item.display_title().map(str::to_string),
                poster_url: table.poster_url(item.poster_path.as_deref()),
                release_date: item.display_date().map(str::to_string),
                vote_average: item.vote_average,
            })
        })
        .collect())
}

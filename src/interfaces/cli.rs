use crate::domain::error::CatalogError;
use crate::domain::query::{CollectionFilters, CollectionKind, EnrichmentDepth, Listing, MediaKind};
use crate::presentation::render::ReferenceSection;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "cine")]
#[command(about = "A caching front end for the TMDB movie and series catalog.")]
#[command(version)]
pub struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Choose color theme
    #[arg(short = 'T', long, global = true)]
    pub theme: Option<String>,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Show status
    #[arg(long)]
    pub status: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Browse a paginated listing
    List(ListArgs),

    /// Search by title
    Search {
        #[arg(num_args = 1.., required = true)]
        query: Vec<String>,
        /// Search series instead of movies
        #[arg(short, long)]
        series: bool,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Show one movie or series with credits, videos, images and similar titles
    Details {
        id: u64,
        #[arg(short, long)]
        series: bool,
        /// Only resolve genre names
        #[arg(long)]
        basic: bool,
    },

    /// Popular titles for every genre
    Genres {
        #[arg(short, long)]
        series: bool,
    },

    /// Show a person, or their filmography with --credits
    Person {
        id: u64,
        #[arg(long)]
        credits: bool,
        /// Series credits instead of movie credits
        #[arg(short, long)]
        series: bool,
    },

    /// Show a box set and its parts
    BoxSet { id: u64 },

    /// Keywords attached to a movie or series
    Keywords {
        id: u64,
        #[arg(short, long)]
        series: bool,
    },

    /// Show a production company
    Company { id: u64 },

    /// Print loaded reference data
    Taxonomy {
        #[arg(value_enum)]
        section: SectionArg,
    },

    /// Read commands from stdin, one per line
    Shell,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(value_enum)]
    pub listing: ListingArg,

    /// List series instead of movies
    #[arg(short, long)]
    pub series: bool,

    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, default_value_t = 20)]
    pub page_size: u32,

    /// Release year (discover only)
    #[arg(long)]
    pub year: Option<i32>,

    /// Genre id (discover only)
    #[arg(long)]
    pub genre: Option<u32>,

    /// Anchor title id (similar and recommendations)
    #[arg(long)]
    pub id: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingArg {
    Popular,
    NowPlaying,
    Upcoming,
    TopRated,
    Discover,
    Similar,
    Recommendations,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionArg {
    Genres,
    Languages,
    Countries,
    Images,
}

pub fn media(series: bool) -> MediaKind {
    if series {
        MediaKind::Series
    } else {
        MediaKind::Movie
    }
}

pub fn depth(basic: bool) -> EnrichmentDepth {
    if basic {
        EnrichmentDepth::Basic
    } else {
        EnrichmentDepth::Detailed
    }
}

impl ListArgs {
    pub fn kind(&self) -> Result<CollectionKind, CatalogError> {
        let anchor = || {
            self.id.ok_or_else(|| {
                CatalogError::Validation("--id is required for similar and recommendations".to_string())
            })
        };
        let listing = match self.listing {
            ListingArg::Popular => Listing::Popular,
            ListingArg::NowPlaying => Listing::NowPlaying,
            ListingArg::Upcoming => Listing::Upcoming,
            ListingArg::TopRated => Listing::TopRated,
            ListingArg::Discover => Listing::Discover,
            ListingArg::Similar => Listing::Similar(anchor()?),
            ListingArg::Recommendations => Listing::Recommendations(anchor()?),
        };
        Ok(CollectionKind::new(media(self.series), listing))
    }

    pub fn filters(&self) -> CollectionFilters {
        CollectionFilters {
            year: self.year,
            genre: self.genre,
            query: None,
        }
    }
}

impl From<SectionArg> for ReferenceSection {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::Genres => ReferenceSection::Genres,
            SectionArg::Languages => ReferenceSection::Languages,
            SectionArg::Countries => ReferenceSection::Countries,
            SectionArg::Images => ReferenceSection::Images,
        }
    }
}

/// Parse one shell line as if it followed the binary name.
pub fn parse_line(line: &str) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("cine").chain(line.split_whitespace()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_listing_names_are_kebab_case() {
        let cli = parse_line("list now-playing --series --page 3").unwrap();
        let Some(Command::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.listing, ListingArg::NowPlaying);
        assert_eq!(args.page, 3);
        assert_eq!(args.page_size, 20);
        assert_eq!(
            args.kind().unwrap(),
            CollectionKind::series(Listing::NowPlaying)
        );
    }

    #[test]
    fn test_similar_requires_id() {
        let cli = parse_line("list similar").unwrap();
        let Some(Command::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert!(matches!(args.kind(), Err(CatalogError::Validation(_))));

        let cli = parse_line("list similar --id 550").unwrap();
        let Some(Command::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.kind().unwrap(), CollectionKind::movies(Listing::Similar(550)));
    }

    #[test]
    fn test_global_json_flag_after_subcommand() {
        let cli = parse_line("details 550 --basic --json").unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Some(Command::Details { id: 550, basic: true, series: false })
        ));
    }

    #[test]
    fn test_search_joins_words() {
        let cli = parse_line("search the matrix").unwrap();
        let Some(Command::Search { query, .. }) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(query.join(" "), "the matrix");
    }
}

// Main entry point
use cinecache::application::{collections, details, entities, reference_loader};
use cinecache::domain::error::{CatalogError, ErrorKind};
use cinecache::infrastructure::config::{self, load_config, Config};
use cinecache::infrastructure::storage::domains::spawn_sweeper;
use cinecache::interfaces::cli::{self, Cli, Command};
use cinecache::presentation::render;
use cinecache::presentation::theme::Theme;
use cinecache::state::AppState;
use clap::Parser;
use colored::Colorize;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup graceful shutdown handler
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for shutdown signal: {}", e);
        } else {
            eprintln!("\nInterrupted, shutting down...");
            let _ = shutdown_tx.send(());
        }
    });

    let cli = Cli::parse();
    let config = load_config()?;

    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }

    let state = match AppState::new(config.clone()) {
        Ok(state) => state,
        Err(e) if cli.status => {
            print_status(&config, None);
            eprintln!("{}", e.to_string().yellow());
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            std::process::exit(exit_code(e.kind()));
        }
    };

    if cli.status {
        print_status(&config, Some(&state));
        return Ok(());
    }

    let Some(command) = cli.command.clone() else {
        eprintln!("{}", "Please provide a command (try --help)".red());
        std::process::exit(1);
    };

    let theme_name = cli.theme.as_deref().unwrap_or(config.theme.as_str());
    let theme = Theme::from_name(theme_name);

    let result = tokio::select! {
        result = run(&state, &config, command, cli.json, &theme) => result,
        _ = shutdown_rx => {
            eprintln!("Operation interrupted");
            return Ok(());
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e.to_string().red());
        std::process::exit(exit_code(e.kind()));
    }
    Ok(())
}

async fn run(
    state: &AppState,
    config: &Config,
    command: Command,
    json: bool,
    theme: &Theme,
) -> Result<(), CatalogError> {
    match reference_loader::load_reference_table(&state.client, &config.images).await {
        Ok(table) => state.reference.replace(table),
        Err(e) => {
            warn!(error = %e, "reference data unavailable, continuing without it");
            eprintln!("{}", format!("Warning: {}", e).yellow());
        }
    }
    let _sweeper = spawn_sweeper(&state.caches, config.cache.sweep_interval());

    match command {
        Command::Shell => shell(state, json, theme).await,
        command => execute(state, command, json, theme).await,
    }
}

async fn execute(
    state: &AppState,
    command: Command,
    json: bool,
    theme: &Theme,
) -> Result<(), CatalogError> {
    match command {
        Command::List(args) => {
            let kind = args.kind()?;
            let page = collections::get_collection(
                state,
                kind,
                args.page,
                args.page_size,
                &args.filters(),
            )
            .await?;
            emit(&page, json, |p| render::format_page(p, theme))
        }
        Command::Search {
            query,
            series,
            page,
        } => {
            let page =
                collections::search_collection(state, cli::media(series), &query.join(" "), page)
                    .await?;
            emit(&page, json, |p| render::format_page(p, theme))
        }
        Command::Details { id, series, basic } => {
            let record =
                details::get_entity_details(state, cli::media(series), id, cli::depth(basic))
                    .await?;
            emit(&record, json, |r| render::format_details(r, theme))
        }
        Command::Genres { series } => {
            let shelves = collections::genre_showcase(state, cli::media(series)).await?;
            emit(&shelves, json, |s| render::format_showcase(s, theme))
        }
        Command::Person {
            id,
            credits: true,
            series,
        } => {
            let filmography = entities::person_credits(state, cli::media(series), id).await?;
            emit(&filmography, json, |f| render::format_filmography(f, theme))
        }
        Command::Person { id, .. } => {
            let person = entities::person_details(state, id).await?;
            emit(&person, json, |p| render::format_person(p, theme))
        }
        Command::BoxSet { id } => {
            let set = entities::box_set(state, id).await?;
            emit(&set, json, |s| render::format_box_set(s, theme))
        }
        Command::Keywords { id, series } => {
            let list = entities::keywords(state, cli::media(series), id).await?;
            emit(&list, json, |k| render::format_keywords(k, theme))
        }
        Command::Company { id } => {
            let company = entities::company(state, id).await?;
            emit(&company, json, |c| render::format_company(c, theme))
        }
        Command::Taxonomy { section } => {
            let table = state.reference.snapshot();
            emit(table.as_ref(), json, |t| {
                render::format_reference(t, section.into(), theme)
            })
        }
        Command::Shell => Err(CatalogError::Validation(
            "shell cannot be nested".to_string(),
        )),
    }
}

/// Run commands from stdin against one shared state.
async fn shell(state: &AppState, json: bool, theme: &Theme) -> Result<(), CatalogError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        let cli = match cli::parse_line(line) {
            Ok(cli) => cli,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };
        if cli.status {
            print_caches(state);
            continue;
        }
        let Some(command) = cli.command else {
            continue;
        };
        if let Err(e) = execute(state, command, json || cli.json, theme).await {
            eprintln!("{}", e.to_string().red());
        }
    }
    Ok(())
}

fn emit<T: Serialize>(
    value: &T,
    json: bool,
    render: impl FnOnce(&T) -> String,
) -> Result<(), CatalogError> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", render(value));
    }
    Ok(())
}

fn exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Validation => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::RateLimited => 4,
        ErrorKind::Upstream | ErrorKind::SubFetch => 5,
        ErrorKind::Internal => 1,
    }
}

fn init_logging(logging: &config::Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = logging.path.as_deref().filter(|p| !p.is_empty()) {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .init();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn print_status(config: &Config, state: Option<&AppState>) {
    println!("{}", "cine Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!(
        "Config: {}",
        config::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
    println!("API: {} ({})", config.api.base_url, config.api.language);
    if config.api.token.is_some() {
        println!("API token: Configured");
    } else {
        println!("API token: Not configured (set {})", config::TOKEN_ENV_VAR);
    }
    println!(
        "Cache TTL: {}s, sweep every {}s",
        config.cache.ttl_secs,
        config.cache.sweep_interval().as_secs()
    );

    if let Some(state) = state {
        print_caches(state);
    }
}

fn print_caches(state: &AppState) {
    for domain in state.caches.sizes() {
        println!("Cache {}: {} entries", domain.name, domain.entries);
    }
}

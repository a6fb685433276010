use crate::domain::error::CatalogError;
use crate::domain::reference::{DEFAULT_BACKDROP_SIZE, DEFAULT_POSTER_SIZE, DEFAULT_PROFILE_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const TOKEN_ENV_VAR: &str = "TMDB_API_TOKEN";
pub const MAX_SWEEP_INTERVAL_SECS: u64 = 24 * 3600;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub images: ImageConfig,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub token: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImageConfig {
    #[serde(default = "default_poster_size")]
    pub poster_size: String,
    #[serde(default = "default_backdrop_size")]
    pub backdrop_size: String,
    #[serde(default = "default_profile_size")]
    pub profile_size: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            api: ApiConfig::default(),
            cache: CacheConfig::default(),
            images: ImageConfig::default(),
            logging: Logging::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            language: default_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            poster_size: default_poster_size(),
            backdrop_size: default_backdrop_size(),
            profile_size: default_profile_size(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: "WARN".to_string(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        // tokio intervals panic on a zero period and on deadline overflow
        Duration::from_secs(self.sweep_interval_secs.clamp(1, MAX_SWEEP_INTERVAL_SECS))
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// Defaults
fn default_theme() -> String {
    "marquee".to_string()
}
fn default_base_url() -> String {
    "https://api.themoviedb.org/3/".to_string()
}
fn default_language() -> String {
    "pt-BR".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_ttl_secs() -> u64 {
    3600
}
fn default_sweep_interval_secs() -> u64 {
    600
}
fn default_poster_size() -> String {
    DEFAULT_POSTER_SIZE.to_string()
}
fn default_backdrop_size() -> String {
    DEFAULT_BACKDROP_SIZE.to_string()
}
fn default_profile_size() -> String {
    DEFAULT_PROFILE_SIZE.to_string()
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("cinecache").join("config.toml"))
}

/// Parse a config document; the environment token wins over the file.
pub fn parse_config(content: &str) -> Result<Config, CatalogError> {
    let mut config: Config = toml::from_str(content)?;
    apply_env(&mut config);
    Ok(config)
}

pub fn load_config() -> Result<Config, CatalogError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match parse_config(&content) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    let mut config = Config::default();
    apply_env(&mut config);
    Ok(config)
}

fn apply_env(config: &mut Config) {
    if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
        if !token.trim().is_empty() {
            config.api.token = Some(token.trim().to_string());
        }
    }
}

pub fn generate_config_sample() -> Result<(), CatalogError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            eprintln!("Config file already exists at: {}", path.display());
            return Ok(());
        }

        // Create directory if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let sample = Config::default();
        let toml_content = toml::to_string_pretty(&sample)
            .map_err(|e| CatalogError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, toml_content)
            .map_err(|e| CatalogError::Config(format!("Failed to write config file: {}", e)))?;
        println!("Generated config file at: {}", path.display());
    } else {
        return Err(CatalogError::Config(
            "Cannot determine config directory".to_string(),
        ));
    }

    Ok(())
}

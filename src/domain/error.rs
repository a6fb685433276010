use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream rate limit reached on {endpoint}")]
    RateLimited { endpoint: String, body: String },

    #[error("Upstream error on {endpoint} (status {status}): {body}")]
    Upstream {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Sub-fetch '{key}' did not complete: {reason}")]
    SubFetch { key: String, reason: String },

    #[error("Enrichment error: {0}")]
    Enrichment(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Start-up error: {0}")]
    Init(String),
}

/// Coarse classification used by callers that map failures to exit codes or
/// response statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    RateLimited,
    Upstream,
    SubFetch,
    Internal,
}

impl CatalogError {
    /// Classify a non-success upstream status.
    pub fn from_status(endpoint: &str, status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            429 => CatalogError::RateLimited {
                endpoint: endpoint.to_string(),
                body,
            },
            404 => CatalogError::NotFound(format!("{} ({})", endpoint, body)),
            _ => CatalogError::Upstream {
                endpoint: endpoint.to_string(),
                status,
                body,
            },
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, CatalogError::RateLimited { .. })
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::Validation,
            CatalogError::NotFound(_) => ErrorKind::NotFound,
            CatalogError::RateLimited { .. } => ErrorKind::RateLimited,
            CatalogError::Upstream { .. } | CatalogError::Http(_) | CatalogError::Json(_) => {
                ErrorKind::Upstream
            }
            CatalogError::SubFetch { .. } => ErrorKind::SubFetch,
            CatalogError::Io(_)
            | CatalogError::Toml(_)
            | CatalogError::Enrichment(_)
            | CatalogError::Config(_)
            | CatalogError::Init(_) => ErrorKind::Internal,
        }
    }
}

//! Error types for the storefront API adapter.

use storefront_core::{Classified, ErrorKind};

/// Result type alias for adapter operations.
pub type AppResult<T> = Result<T, AppError>;

/// Adapter errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] storefront_core::ConfigError),

    #[error("Invalid classifier rules: {0}")]
    Taxonomy(#[from] storefront_core::TaxonomyError),

    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid usage: {0}")]
    Usage(String),
}

impl Classified for AppError {
    fn error_kind(&self) -> ErrorKind {
        match self {
            AppError::Config(_) | AppError::Taxonomy(_) | AppError::Usage(_) => {
                ErrorKind::ValidationError
            }
            AppError::Io(_) | AppError::ConfigParse(_) | AppError::Serialization(_) => {
                ErrorKind::InternalError
            }
        }
    }
}

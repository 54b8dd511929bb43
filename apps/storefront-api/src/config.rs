//! # Adapter Configuration
//!
//! Loads the version policy, classifier table and logging settings once at
//! startup. The resulting values are handed to the core constructors and
//! never change afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_CURRENT_VERSION=2                                       │
//! │     STOREFRONT_SUPPORTED_VERSIONS=v1,v2,v3                             │
//! │     STOREFRONT_BASE_PATH=/shop/api                                     │
//! │     STOREFRONT_LOG=debug                                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config PATH, or STOREFRONT_CONFIG, or                            │
//! │     ~/.config/storefront-api/storefront.toml (Linux)                   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     current v1, supported [v1, v2], standard classifier table          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [version]
//! current_version = 1
//! supported_versions = [1, 2]
//! base_path = "/api"
//!
//! [[classifier.rules]]
//! kind = "RESOURCE_NOT_FOUND"
//! keywords = ["not found", "no such"]
//!
//! [logging]
//! filter = "info,storefront=debug"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use storefront_core::version::normalize;
use storefront_core::{ClassificationRule, ErrorClassifier, VersionConfig, VersionResolver};
use tracing::{debug, info, warn};

use crate::error::AppResult;

/// Env var naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "STOREFRONT_CONFIG";

/// Env var overriding the log filter.
pub const LOG_FILTER_ENV: &str = "STOREFRONT_LOG";

// =============================================================================
// Sections
// =============================================================================

/// Classifier table. Empty means the built-in catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    #[serde(default)]
    pub rules: Vec<ClassificationRule>,
}

/// Logging settings. `RUST_LOG` takes precedence over `filter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info,storefront=debug".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_filter(),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete adapter configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub version: VersionConfig,

    #[serde(default)]
    pub classifier: ClassifierSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`AppConfig::load`] against an arbitrary key lookup instead of the
    /// process environment.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = config_path
            .or_else(|| lookup(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_overrides(lookup);

        config.validate()?;

        info!(
            current = config.version.current_version,
            supported = ?config.version.supported_versions,
            custom_rules = config.classifier.rules.len(),
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Reads a config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        info!(?path, "Loading storefront config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses a TOML document. Missing sections take their defaults.
    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates every section by building the core components from it.
    pub fn validate(&self) -> AppResult<()> {
        self.version.validate()?;
        self.classifier()?;
        Ok(())
    }

    /// Builds the version resolver.
    pub fn resolver(&self) -> AppResult<VersionResolver> {
        Ok(VersionResolver::new(self.version.clone())?)
    }

    /// Builds the classifier; no custom rules means the built-in catalog.
    pub fn classifier(&self) -> AppResult<ErrorClassifier> {
        if self.classifier.rules.is_empty() {
            return Ok(ErrorClassifier::standard());
        }
        Ok(ErrorClassifier::new(self.classifier.rules.clone())?)
    }

    /// Applies overrides from a key lookup (the process environment in
    /// production). Unparseable values are logged and skipped.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("STOREFRONT_CURRENT_VERSION") {
            match normalize(&raw) {
                Ok(version) => {
                    debug!(%version, "Overriding current version from environment");
                    self.version.current_version = version.number();
                }
                Err(e) => warn!(value = %raw, error = %e, "Ignoring STOREFRONT_CURRENT_VERSION"),
            }
        }

        if let Some(raw) = lookup("STOREFRONT_SUPPORTED_VERSIONS") {
            let parsed: Result<Vec<u32>, _> = raw
                .split(',')
                .map(|token| normalize(token).map(|v| v.number()))
                .collect();
            match parsed {
                Ok(versions) => {
                    debug!(?versions, "Overriding supported versions from environment");
                    self.version.supported_versions = versions;
                }
                Err(e) => warn!(value = %raw, error = %e, "Ignoring STOREFRONT_SUPPORTED_VERSIONS"),
            }
        }

        if let Some(path) = lookup("STOREFRONT_BASE_PATH") {
            self.version.base_path = path;
        }

        if let Some(filter) = lookup(LOG_FILTER_ENV) {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "api")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }
}

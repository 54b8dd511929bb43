//! # API Version Resolution
//!
//! Parses client-supplied version tokens and evaluates them against the
//! configured supported set.
//!
//! ## Two Independent Axes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Validity vs. Supportedness                             │
//! │                                                                         │
//! │                    │  supported         │  not supported               │
//! │  ──────────────────┼────────────────────┼────────────────────────────  │
//! │  valid token       │  "v1", "2", " V1 " │  "v0", "99"                  │
//! │                    │  → isSupported     │  → recommendation            │
//! │  ──────────────────┼────────────────────┼────────────────────────────  │
//! │  invalid token     │          "", "abc", "v1.0", "1-rc", "-1"          │
//! │                    │          → VersionError (VALIDATION_ERROR)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Token Grammar
//! ```text
//! token   := ws* ( 'v' | 'V' )? digit+ ws*
//! digit   := '0'..='9'
//! ```
//! Leading zeros are accepted (`"01"` → 1). Anything else is malformed.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ConfigError, VersionError};

/// Version served when the client names none.
pub const DEFAULT_VERSION: u32 = 1;

/// Prefix of every versioned route.
pub const API_BASE_PATH: &str = "/api";

/// Header consulted when header versioning is enabled.
pub const DEFAULT_VERSION_HEADER: &str = "API-Version";

// =============================================================================
// Api Version
// =============================================================================

/// A syntactically valid version ordinal.
///
/// Displays and serializes in canonical form (`v3`).
///
/// ## Example
/// ```rust
/// use storefront_core::ApiVersion;
///
/// let version: ApiVersion = " V02 ".parse().unwrap();
/// assert_eq!(version.number(), 2);
/// assert_eq!(version.to_string(), "v2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion(u32);

impl ApiVersion {
    /// Wraps a known ordinal.
    #[inline]
    pub const fn new(number: u32) -> Self {
        ApiVersion(number)
    }

    /// The ordinal.
    #[inline]
    pub const fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl FromStr for ApiVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

impl From<ApiVersion> for u32 {
    fn from(version: ApiVersion) -> Self {
        version.0
    }
}

impl Serialize for ApiVersion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ApiVersion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        normalize(&raw).map_err(serde::de::Error::custom)
    }
}

/// Normalizes a raw version token.
///
/// ## Rules
/// 1. Blank (after trimming) → [`VersionError::Missing`]
/// 2. One leading `v`/`V` is stripped
/// 3. Remainder must be non-empty ASCII digits that fit the ordinal type,
///    otherwise [`VersionError::Malformed`]
///
/// ## Example
/// ```rust
/// use storefront_core::version::normalize;
/// use storefront_core::VersionError;
///
/// assert_eq!(normalize("v3").unwrap().number(), 3);
/// assert_eq!(normalize("0").unwrap().number(), 0);
/// assert_eq!(normalize("   "), Err(VersionError::Missing));
/// assert!(matches!(normalize("v1.0"), Err(VersionError::Malformed { .. })));
/// ```
pub fn normalize(raw: &str) -> Result<ApiVersion, VersionError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(VersionError::Missing);
    }

    let digits = trimmed
        .strip_prefix(|c: char| c == 'v' || c == 'V')
        .unwrap_or(trimmed);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionError::malformed(raw));
    }

    // All digits, so the only failure left is overflow
    digits
        .parse::<u32>()
        .map(ApiVersion)
        .map_err(|_| VersionError::malformed(raw))
}

/// Normalizes an optional token; `None` is a missing parameter.
pub fn normalize_opt(raw: Option<&str>) -> Result<ApiVersion, VersionError> {
    raw.map_or(Err(VersionError::Missing), normalize)
}

// =============================================================================
// Version Configuration
// =============================================================================

/// How clients may select a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersioningStrategy {
    /// `/api/v1/...` style routes.
    #[serde(default = "default_true")]
    pub url_path: bool,

    /// Version taken from a request header.
    #[serde(default)]
    pub header: bool,

    /// Header consulted when `header` is enabled.
    #[serde(default = "default_header_name")]
    pub header_name: String,
}

fn default_true() -> bool {
    true
}

fn default_header_name() -> String {
    DEFAULT_VERSION_HEADER.to_string()
}

impl Default for VersioningStrategy {
    fn default() -> Self {
        VersioningStrategy {
            url_path: true,
            header: false,
            header_name: default_header_name(),
        }
    }
}

/// Version policy, loaded once at startup.
///
/// ## Config Form
/// ```toml
/// [version]
/// current_version = 1
/// supported_versions = [1, 2]
/// base_path = "/api"
/// backward_compatible = true
///
/// [version.strategy]
/// url_path = true
/// header = false
/// header_name = "API-Version"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionConfig {
    /// Version reported as current and recommended to clients.
    #[serde(default = "default_current_version")]
    pub current_version: u32,

    /// Versions the system currently serves.
    #[serde(default = "default_supported_versions")]
    pub supported_versions: Vec<u32>,

    /// Prefix for versioned routes.
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Whether older supported versions keep working unchanged.
    #[serde(default = "default_true")]
    pub backward_compatible: bool,

    /// Version selection mechanisms.
    #[serde(default)]
    pub strategy: VersioningStrategy,
}

fn default_current_version() -> u32 {
    DEFAULT_VERSION
}

fn default_supported_versions() -> Vec<u32> {
    vec![1, 2]
}

fn default_base_path() -> String {
    API_BASE_PATH.to_string()
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            current_version: default_current_version(),
            supported_versions: default_supported_versions(),
            base_path: default_base_path(),
            backward_compatible: true,
            strategy: VersioningStrategy::default(),
        }
    }
}

impl VersionConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.supported_versions.is_empty() {
            return Err(ConfigError::NoSupportedVersions);
        }

        if self.current_version == 0 {
            return Err(ConfigError::CurrentVersionZero);
        }

        if !self.supported_versions.contains(&self.current_version) {
            return Err(ConfigError::CurrentNotSupported {
                current: self.current_version,
                supported: self.supported_versions.clone(),
            });
        }

        if !self.base_path.trim().starts_with('/') {
            return Err(ConfigError::InvalidBasePath(self.base_path.clone()));
        }

        if self.strategy.header && self.strategy.header_name.trim().is_empty() {
            return Err(ConfigError::MissingHeaderName);
        }

        Ok(())
    }
}

// =============================================================================
// Reports
// =============================================================================

/// Outcome of [`VersionResolver::check_compatibility`].
///
/// ## Serialization
/// ```json
/// {
///   "requestedVersion": "v99",
///   "isSupported": false,
///   "currentVersion": "v1",
///   "supportedVersions": ["v1", "v2"],
///   "recommendation": "API version v99 is not supported. ..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CompatibilityReport {
    /// Canonical form of the requested token.
    #[ts(as = "String")]
    pub requested_version: ApiVersion,

    /// Membership in the supported set.
    pub is_supported: bool,

    /// Configured current version.
    #[ts(as = "String")]
    pub current_version: ApiVersion,

    /// Supported set, ascending.
    #[ts(as = "Vec<String>")]
    pub supported_versions: Vec<ApiVersion>,

    /// Guidance toward a supported version. Present only when unsupported.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub recommendation: Option<String>,
}

/// Versioning mechanisms advertised to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StrategyInfo {
    pub url_path_versioning: bool,
    pub header_versioning: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub header_name: Option<String>,
}

/// Compatibility guarantees advertised to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CompatibilityInfo {
    pub backward_compatible: bool,
    #[ts(as = "Vec<String>")]
    pub deprecated_versions: Vec<ApiVersion>,
}

/// Snapshot of the version policy, served by the version info endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VersionInfo {
    #[ts(as = "String")]
    pub current_version: ApiVersion,
    #[ts(as = "Vec<String>")]
    pub supported_versions: Vec<ApiVersion>,
    pub base_path: String,
    pub strategy: StrategyInfo,
    pub compatibility: CompatibilityInfo,
}

// =============================================================================
// Version Resolver
// =============================================================================

/// Evaluates version tokens against an immutable [`VersionConfig`].
///
/// ## Example
/// ```rust
/// use storefront_core::{VersionConfig, VersionResolver};
///
/// let resolver = VersionResolver::new(VersionConfig::default()).unwrap();
///
/// let report = resolver.check_compatibility("v99").unwrap();
/// assert_eq!(report.requested_version.to_string(), "v99");
/// assert!(!report.is_supported);
/// assert!(report.recommendation.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct VersionResolver {
    config: VersionConfig,
    current: ApiVersion,
    supported: BTreeSet<ApiVersion>,
}

impl VersionResolver {
    /// Validates the configuration and builds a resolver.
    pub fn new(config: VersionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let supported = config
            .supported_versions
            .iter()
            .copied()
            .map(ApiVersion::new)
            .collect();

        Ok(VersionResolver {
            current: ApiVersion::new(config.current_version),
            supported,
            config,
        })
    }

    /// See [`normalize`].
    pub fn normalize(&self, raw: &str) -> Result<ApiVersion, VersionError> {
        normalize(raw)
    }

    /// Normalizes `raw` and reports whether it is served.
    ///
    /// Format errors propagate unchanged; callers map them to a
    /// `VALIDATION_ERROR` envelope.
    pub fn check_compatibility(&self, raw: &str) -> Result<CompatibilityReport, VersionError> {
        let requested = normalize(raw)?;
        Ok(self.report(requested))
    }

    /// Like [`VersionResolver::check_compatibility`] for an optional token.
    pub fn check_compatibility_opt(
        &self,
        raw: Option<&str>,
    ) -> Result<CompatibilityReport, VersionError> {
        let requested = normalize_opt(raw)?;
        Ok(self.report(requested))
    }

    /// Builds the report for an already-normalized version.
    pub fn report(&self, requested: ApiVersion) -> CompatibilityReport {
        let is_supported = self.is_supported(requested);

        CompatibilityReport {
            requested_version: requested,
            is_supported,
            current_version: self.current,
            supported_versions: self.supported_list(),
            recommendation: (!is_supported).then(|| self.recommendation(requested)),
        }
    }

    /// Membership in the supported set.
    pub fn is_supported(&self, version: ApiVersion) -> bool {
        self.supported.contains(&version)
    }

    /// Configured current version.
    pub fn current(&self) -> ApiVersion {
        self.current
    }

    /// Supported set, ascending.
    pub fn supported(&self) -> impl Iterator<Item = ApiVersion> + '_ {
        self.supported.iter().copied()
    }

    /// The configuration this resolver was built from.
    pub fn config(&self) -> &VersionConfig {
        &self.config
    }

    /// Route prefix for a version, e.g. `/api/v1`.
    pub fn base_path(&self, version: ApiVersion) -> String {
        format!("{}/{}", self.config.base_path.trim().trim_end_matches('/'), version)
    }

    /// Describes the version policy.
    ///
    /// Supported versions older than the current one are deprecated only
    /// when backward compatibility is switched off.
    pub fn version_info(&self) -> VersionInfo {
        let deprecated_versions = if self.config.backward_compatible {
            Vec::new()
        } else {
            self.supported().filter(|v| *v < self.current).collect()
        };

        VersionInfo {
            current_version: self.current,
            supported_versions: self.supported_list(),
            base_path: self.base_path(self.current),
            strategy: StrategyInfo {
                url_path_versioning: self.config.strategy.url_path,
                header_versioning: self.config.strategy.header,
                header_name: self
                    .config
                    .strategy
                    .header
                    .then(|| self.config.strategy.header_name.clone()),
            },
            compatibility: CompatibilityInfo {
                backward_compatible: self.config.backward_compatible,
                deprecated_versions,
            },
        }
    }

    fn supported_list(&self) -> Vec<ApiVersion> {
        self.supported().collect()
    }

    fn recommendation(&self, requested: ApiVersion) -> String {
        let supported = self
            .supported()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "API version {} is not supported. Please use the current version {} (supported versions: {}).",
            requested, self.current, supported
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

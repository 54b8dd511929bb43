//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── VersionError   - Malformed or missing version token               │
//! │  ├── ConfigError    - Version configuration rejected at startup        │
//! │  └── TaxonomyError  - Classifier rule table rejected at startup        │
//! │                                                                         │
//! │  storefront-api errors (app crate)                                     │
//! │  └── AppError       - Config loading, I/O, CLI usage                   │
//! │                                                                         │
//! │  Every core error is Classified → VALIDATION_ERROR                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Literal Messages
//! The two version messages are part of the public contract; clients match
//! on them, so they must not be reworded.

use thiserror::Error;

use crate::taxonomy::{Classified, ErrorKind};

/// Message returned when the version token is absent or blank.
pub const VERSION_MISSING_MESSAGE: &str = "Version parameter cannot be null or empty";

/// Message returned when the version token is present but malformed.
pub const VERSION_MALFORMED_MESSAGE: &str =
    "Invalid version format. Version must be a positive integer (e.g., 'v1', 'v2')";

// =============================================================================
// Version Error
// =============================================================================

/// Failure to normalize a client-supplied version token.
///
/// ## User Workflow
/// ```text
/// GET /api/version/compatibility/v1.0
///      │
///      ▼
/// normalize("v1.0")
///      │
///      ├── blank?            → Missing   (400, missing-parameter message)
///      ├── non-digit / sign? → Malformed (400, malformed-format message)
///      └── digits            → ApiVersion(1)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// Token absent, empty, or whitespace only.
    #[error("{}", VERSION_MISSING_MESSAGE)]
    Missing,

    /// Token present but not a plain non-negative integer.
    #[error("{}", VERSION_MALFORMED_MESSAGE)]
    Malformed {
        /// The token as received, kept for diagnostics.
        raw: String,
    },
}

impl VersionError {
    /// Creates a malformed-token error.
    pub fn malformed(raw: impl Into<String>) -> Self {
        VersionError::Malformed { raw: raw.into() }
    }
}

impl Classified for VersionError {
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::ValidationError
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Version configuration rejected by [`VersionConfig::validate`](crate::VersionConfig::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No supported versions configured.
    #[error("supported_versions must not be empty")]
    NoSupportedVersions,

    /// Current version must be a positive integer.
    #[error("current_version must be a positive integer")]
    CurrentVersionZero,

    /// Current version is not one of the supported versions.
    #[error("current_version v{current} is not in supported_versions {supported:?}")]
    CurrentNotSupported { current: u32, supported: Vec<u32> },

    /// Base path for versioned routes is blank or not rooted.
    #[error("base_path must start with '/', got: '{0}'")]
    InvalidBasePath(String),

    /// Header versioning enabled without a header name.
    #[error("header_name is required when header versioning is enabled")]
    MissingHeaderName,
}

impl Classified for ConfigError {
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::ValidationError
    }
}

// =============================================================================
// Taxonomy Error
// =============================================================================

/// Classifier rule table rejected by [`ErrorClassifier::new`](crate::ErrorClassifier::new).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxonomyError {
    /// SUCCESS is never inferred from text.
    #[error("SUCCESS cannot be the target of a classification rule")]
    SuccessRule,

    /// A rule with nothing to match.
    #[error("classification rule for {0} has no keywords")]
    EmptyKeywords(ErrorKind),

    /// Code string that names no taxonomy entry.
    #[error("unknown error code: '{0}'")]
    UnknownCode(String),
}

impl Classified for TaxonomyError {
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::ValidationError
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_messages_are_literal() {
        assert_eq!(VersionError::Missing.to_string(), VERSION_MISSING_MESSAGE);
        assert_eq!(
            VersionError::malformed("v1.0").to_string(),
            VERSION_MALFORMED_MESSAGE
        );
    }

    #[test]
    fn test_version_errors_are_validation_kind() {
        assert_eq!(VersionError::Missing.error_kind(), ErrorKind::ValidationError);
        assert_eq!(
            VersionError::malformed("abc").error_kind(),
            ErrorKind::ValidationError
        );
    }

    #[test]
    fn test_version_messages_classify_as_validation() {
        assert_eq!(
            ErrorKind::from_message(VERSION_MISSING_MESSAGE),
            ErrorKind::ValidationError
        );
        assert_eq!(
            ErrorKind::from_message(VERSION_MALFORMED_MESSAGE),
            ErrorKind::ValidationError
        );
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::CurrentNotSupported {
            current: 3,
            supported: vec![1, 2],
        };
        assert_eq!(
            err.to_string(),
            "current_version v3 is not in supported_versions [1, 2]"
        );
    }

    #[test]
    fn test_taxonomy_error_messages() {
        assert_eq!(
            TaxonomyError::EmptyKeywords(ErrorKind::ResourceNotFound).to_string(),
            "classification rule for RESOURCE_NOT_FOUND has no keywords"
        );
    }
}

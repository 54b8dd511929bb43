//! # Error Taxonomy
//!
//! The closed catalog of outcome kinds every API response is tagged with.
//!
//! ## Catalog (priority order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Error Taxonomy                                   │
//! │                                                                         │
//! │  #  Code                 Keywords (case-insensitive)      Status       │
//! │  ─  ───────────────────  ───────────────────────────────  ──────       │
//! │  1  VALIDATION_ERROR     "invalid", "must be",             400         │
//! │                          "cannot be null or empty",                    │
//! │                          "format"                                      │
//! │  2  RESOURCE_NOT_FOUND   "not found"                       404         │
//! │  3  SUCCESS              (never matched)                   200         │
//! │  4  INTERNAL_ERROR       (fallback)                        500         │
//! │                                                                         │
//! │  First match wins. "Invalid id: user not found" → VALIDATION_ERROR     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Codes Are API
//! Clients branch on `code`, so the strings here are stable across releases.
//! Add new kinds; never rename existing ones.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::TaxonomyError;

// =============================================================================
// Error Kind
// =============================================================================

const VALIDATION_KEYWORDS: &[&str] = &["invalid", "must be", "cannot be null or empty", "format"];
const NOT_FOUND_KEYWORDS: &[&str] = &["not found"];
const NO_KEYWORDS: &[&str] = &[];

/// Symbolic outcome kind carried by every [`ApiResponse`](crate::ApiResponse).
///
/// ## Serialization
/// ```json
/// "RESOURCE_NOT_FOUND"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorKind {
    /// Request input failed validation (400).
    ValidationError,

    /// Requested entity does not exist (404).
    ResourceNotFound,

    /// Operation completed (200). Only ever constructed explicitly.
    Success,

    /// Anything the other kinds do not cover (500).
    InternalError,
}

impl ErrorKind {
    /// The catalog in priority order.
    pub const ALL: [ErrorKind; 4] = [
        ErrorKind::ValidationError,
        ErrorKind::ResourceNotFound,
        ErrorKind::Success,
        ErrorKind::InternalError,
    ];

    /// Stable symbolic code.
    pub const fn code(&self) -> &'static str {
        match self {
            ErrorKind::ValidationError => "VALIDATION_ERROR",
            ErrorKind::ResourceNotFound => "RESOURCE_NOT_FOUND",
            ErrorKind::Success => "SUCCESS",
            ErrorKind::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Message used when the caller supplies none.
    pub const fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::ValidationError => "Invalid request",
            ErrorKind::ResourceNotFound => "Resource not found",
            ErrorKind::Success => "Operation completed successfully",
            ErrorKind::InternalError => "An unexpected error occurred",
        }
    }

    /// Transport status the HTTP layer is expected to answer with.
    pub const fn http_status(&self) -> u16 {
        match self {
            ErrorKind::ValidationError => 400,
            ErrorKind::ResourceNotFound => 404,
            ErrorKind::Success => 200,
            ErrorKind::InternalError => 500,
        }
    }

    /// Lower-case keywords that route a failure message to this kind.
    ///
    /// Empty for `SUCCESS` (never inferred) and `INTERNAL_ERROR` (fallback).
    pub const fn keywords(&self) -> &'static [&'static str] {
        match self {
            ErrorKind::ValidationError => VALIDATION_KEYWORDS,
            ErrorKind::ResourceNotFound => NOT_FOUND_KEYWORDS,
            ErrorKind::Success | ErrorKind::InternalError => NO_KEYWORDS,
        }
    }

    /// Position in the catalog; lower ranks are tested first.
    pub const fn priority(&self) -> u8 {
        match self {
            ErrorKind::ValidationError => 10,
            ErrorKind::ResourceNotFound => 20,
            ErrorKind::Success => 30,
            ErrorKind::InternalError => 40,
        }
    }

    /// Returns true for the success kind.
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorKind::Success)
    }

    /// Classifies a failure message against the standard catalog.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::ErrorKind;
    ///
    /// let kind = ErrorKind::from_message("User not found with id: 999");
    /// assert_eq!(kind, ErrorKind::ResourceNotFound);
    /// ```
    pub fn from_message(message: &str) -> ErrorKind {
        let lowered = message.to_lowercase();
        ErrorKind::ALL
            .into_iter()
            .find(|kind| kind.keywords().iter().any(|kw| lowered.contains(kw)))
            .unwrap_or(ErrorKind::InternalError)
    }

    /// Looks a kind up by its code (case-insensitive).
    pub fn from_code(code: &str) -> Option<ErrorKind> {
        let code = code.trim();
        ErrorKind::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ErrorKind {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorKind::from_code(s).ok_or_else(|| TaxonomyError::UnknownCode(s.to_string()))
    }
}

// =============================================================================
// Classified
// =============================================================================

/// Errors that know which taxonomy entry they belong to.
///
/// Implement this at the place a failure originates so the envelope can be
/// built from a structured kind instead of sniffing the message text.
///
/// ```rust
/// use storefront_core::{ApiResponse, Classified, ErrorKind};
///
/// #[derive(Debug)]
/// struct UserMissing(u64);
///
/// impl std::fmt::Display for UserMissing {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "User {} does not exist", self.0)
///     }
/// }
///
/// impl Classified for UserMissing {
///     fn error_kind(&self) -> ErrorKind {
///         ErrorKind::ResourceNotFound
///     }
/// }
///
/// let response: ApiResponse<()> = ApiResponse::failure(&UserMissing(7));
/// assert_eq!(response.code(), ErrorKind::ResourceNotFound);
/// ```
pub trait Classified {
    /// The taxonomy entry this failure maps to.
    fn error_kind(&self) -> ErrorKind;
}

impl Classified for ErrorKind {
    fn error_kind(&self) -> ErrorKind {
        *self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        for (i, a) in ErrorKind::ALL.iter().enumerate() {
            for b in &ErrorKind::ALL[i + 1..] {
                assert_ne!(a.code(), b.code());
            }
        }
    }

    #[test]
    fn test_exactly_one_success_entry() {
        let successes = ErrorKind::ALL.iter().filter(|k| k.is_success()).count();
        assert_eq!(successes, 1);
        assert!(ErrorKind::Success.keywords().is_empty());
    }

    #[test]
    fn test_catalog_is_in_priority_order() {
        let ranks: Vec<u8> = ErrorKind::ALL.iter().map(|k| k.priority()).collect();
        let mut sorted = ranks.clone();
        sorted.sort_unstable();
        assert_eq!(ranks, sorted);
    }

    #[test]
    fn test_from_message_agrees_with_standard_table() {
        let standard = crate::ErrorClassifier::standard();
        for message in [
            "Invalid reference: product not found",
            "Email must be unique",
            "Bad phone FORMAT",
            "User not found with id: 999",
            "Operation completed successfully",
            "",
        ] {
            assert_eq!(ErrorKind::from_message(message), standard.classify(message));
        }
    }

    #[test]
    fn test_http_status_contract() {
        assert_eq!(ErrorKind::ValidationError.http_status(), 400);
        assert_eq!(ErrorKind::ResourceNotFound.http_status(), 404);
        assert_eq!(ErrorKind::InternalError.http_status(), 500);
        assert_eq!(ErrorKind::Success.http_status(), 200);
    }

    #[test]
    fn test_serializes_as_code() {
        for kind in ErrorKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.code()));
        }
    }

    #[test]
    fn test_from_code() {
        assert_eq!(
            ErrorKind::from_code("resource_not_found"),
            Some(ErrorKind::ResourceNotFound)
        );
        assert_eq!("SUCCESS".parse::<ErrorKind>().unwrap(), ErrorKind::Success);
        assert!("NOPE".parse::<ErrorKind>().is_err());
    }

    #[test]
    fn test_default_messages() {
        assert_eq!(ErrorKind::ValidationError.default_message(), "Invalid request");
        assert_eq!(
            ErrorKind::InternalError.default_message(),
            "An unexpected error occurred"
        );
    }
}

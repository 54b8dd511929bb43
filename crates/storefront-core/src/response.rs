//! # Response Envelope
//!
//! The uniform wrapper every outward-facing payload travels in.
//!
//! ## Wire Shape
//! ```json
//! {
//!   "code": "RESOURCE_NOT_FOUND",
//!   "message": "User not found with id: 999",
//!   "data": null,
//!   "timestamp": "2025-07-11T12:00:00Z"
//! }
//! ```
//!
//! ## Factory Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ApiResponse Factories                            │
//! │                                                                         │
//! │  SUCCESS                                                               │
//! │  ├── success(data)                    default message, data            │
//! │  ├── success_with_message(msg, data)  custom message, data             │
//! │  ├── empty()                          default message, no data         │
//! │  └── empty_with_message(msg)          custom message, no data          │
//! │                                                                         │
//! │  ERROR                                                                 │
//! │  ├── error(kind)                      kind default message             │
//! │  ├── error_with_message(kind, msg)    blank/None → kind default        │
//! │  ├── error_with_data(kind, msg, data) diagnostic payload               │
//! │  ├── error_from_message(msg)          kind from the catalog            │
//! │  └── failure(&err)                    kind from Classified             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Envelopes are immutable: fields are private and there are no setters.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::classifier::ErrorClassifier;
use crate::taxonomy::{Classified, ErrorKind};

/// Unified API response.
///
/// ## Invariants
/// - `is_success()` iff `code == SUCCESS`
/// - error envelopes carry no data unless built with [`ApiResponse::error_with_data`]
/// - `timestamp` is captured once, at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApiResponse<T> {
    code: ErrorKind,

    message: String,

    data: Option<T>,

    #[ts(as = "String")]
    timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    fn new(code: ErrorKind, message: String, data: Option<T>) -> Self {
        ApiResponse {
            code,
            message,
            data,
            timestamp: Utc::now(),
        }
    }

    // =========================================================================
    // Success Factories
    // =========================================================================

    /// Success with data and the default success message.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::ApiResponse;
    ///
    /// let response = ApiResponse::success(42);
    /// assert!(response.is_success());
    /// assert_eq!(response.message(), "Operation completed successfully");
    /// assert_eq!(response.data(), Some(&42));
    /// ```
    pub fn success(data: T) -> Self {
        Self::new(
            ErrorKind::Success,
            ErrorKind::Success.default_message().to_string(),
            Some(data),
        )
    }

    /// Success with data and a custom message.
    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self::new(ErrorKind::Success, message.into(), Some(data))
    }

    /// Success without data.
    pub fn empty() -> Self {
        Self::new(
            ErrorKind::Success,
            ErrorKind::Success.default_message().to_string(),
            None,
        )
    }

    /// Success without data, custom message.
    pub fn empty_with_message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Success, message.into(), None)
    }

    // =========================================================================
    // Error Factories
    // =========================================================================

    /// Error with the kind's default message.
    pub fn error(kind: ErrorKind) -> Self {
        Self::new(kind, kind.default_message().to_string(), None)
    }

    /// Error with an overridable message.
    ///
    /// `None` or a blank message falls back to the kind's default.
    pub fn error_with_message<M: Into<String>>(kind: ErrorKind, message: Option<M>) -> Self {
        Self::new(kind, resolve_message(kind, message), None)
    }

    /// Error carrying a diagnostic payload (e.g. field-level validation errors).
    pub fn error_with_data<M: Into<String>>(kind: ErrorKind, message: Option<M>, data: T) -> Self {
        Self::new(kind, resolve_message(kind, message), Some(data))
    }

    /// Error whose kind is inferred from the message text.
    ///
    /// Fallback for failures that arrive as bare strings. The message is
    /// kept verbatim; a blank one becomes the inferred kind's default.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{ApiResponse, ErrorKind};
    ///
    /// let response: ApiResponse<()> = ApiResponse::error_from_message("User not found with id: 999");
    /// assert_eq!(response.code(), ErrorKind::ResourceNotFound);
    /// assert_eq!(response.message(), "User not found with id: 999");
    /// ```
    pub fn error_from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let kind = ErrorKind::from_message(&message);
        Self::error_with_message(kind, Some(message))
    }

    /// Like [`ApiResponse::error_from_message`] with an explicit rule table.
    pub fn classify_with(classifier: &ErrorClassifier, message: impl Into<String>) -> Self {
        let message = message.into();
        let kind = classifier.classify(&message);
        Self::error_with_message(kind, Some(message))
    }

    /// Error built from a failure that carries its own kind.
    pub fn failure<E>(err: &E) -> Self
    where
        E: Classified + fmt::Display + ?Sized,
    {
        let kind = err.error_kind();
        Self::error_with_message(kind, Some(err.to_string()))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Outcome kind.
    pub fn code(&self) -> ErrorKind {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Payload, if any.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Creation instant.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Consumes the envelope, returning the payload.
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// True iff the code is `SUCCESS`.
    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }

    /// Negation of [`ApiResponse::is_success`].
    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Transport status implied by the code.
    pub fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

fn resolve_message<M: Into<String>>(kind: ErrorKind, message: Option<M>) -> String {
    message
        .map(Into::into)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| kind.default_message().to_string())
}

impl<T: fmt::Debug> fmt::Display for ApiResponse<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ApiResponse{{code={}, message={}, data={:?}, timestamp={}}}",
            self.code,
            self.message,
            self.data,
            self.timestamp.to_rfc3339()
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_variants() {
        let with_data = ApiResponse::success("payload");
        assert_eq!(with_data.code(), ErrorKind::Success);
        assert_eq!(with_data.message(), "Operation completed successfully");
        assert_eq!(with_data.data(), Some(&"payload"));

        let custom = ApiResponse::success_with_message("User created", 7);
        assert_eq!(custom.message(), "User created");
        assert_eq!(custom.into_data(), Some(7));

        let empty: ApiResponse<()> = ApiResponse::empty();
        assert!(empty.is_success());
        assert!(empty.data().is_none());

        let empty_custom: ApiResponse<()> = ApiResponse::empty_with_message("Deleted");
        assert_eq!(empty_custom.message(), "Deleted");
        assert!(empty_custom.data().is_none());
    }

    #[test]
    fn test_error_uses_default_message() {
        let response: ApiResponse<()> = ApiResponse::error(ErrorKind::ResourceNotFound);
        assert!(response.is_error());
        assert_eq!(response.message(), "Resource not found");
        assert!(response.data().is_none());
        assert_eq!(response.http_status(), 404);
    }

    #[test]
    fn test_error_message_fallbacks() {
        let none: ApiResponse<()> =
            ApiResponse::error_with_message(ErrorKind::ValidationError, None::<String>);
        assert_eq!(none.message(), "Invalid request");

        let blank: ApiResponse<()> =
            ApiResponse::error_with_message(ErrorKind::ValidationError, Some("  "));
        assert_eq!(blank.message(), "Invalid request");

        let custom: ApiResponse<()> =
            ApiResponse::error_with_message(ErrorKind::ValidationError, Some("Email is bad"));
        assert_eq!(custom.message(), "Email is bad");
    }

    #[test]
    fn test_error_with_diagnostic_data() {
        let fields = vec!["email", "phone"];
        let response =
            ApiResponse::error_with_data(ErrorKind::ValidationError, None::<&str>, fields.clone());
        assert!(response.is_error());
        assert_eq!(response.data(), Some(&fields));
    }

    #[test]
    fn test_error_from_message_classifies() {
        let cases = [
            ("User not found with id: 999", ErrorKind::ResourceNotFound),
            ("Invalid version format...", ErrorKind::ValidationError),
            ("Database connection failed", ErrorKind::InternalError),
        ];

        for (message, expected) in cases {
            let response: ApiResponse<()> = ApiResponse::error_from_message(message);
            assert_eq!(response.code(), expected);
            assert_eq!(response.message(), message);
            assert!(response.data().is_none());
        }
    }

    #[test]
    fn test_error_from_blank_message() {
        let response: ApiResponse<()> = ApiResponse::error_from_message("");
        assert_eq!(response.code(), ErrorKind::InternalError);
        assert_eq!(response.message(), "An unexpected error occurred");
    }

    #[test]
    fn test_failure_uses_structured_kind() {
        let err = crate::error::VersionError::Missing;
        let response: ApiResponse<()> = ApiResponse::failure(&err);
        assert_eq!(response.code(), ErrorKind::ValidationError);
        assert_eq!(response.message(), "Version parameter cannot be null or empty");
    }

    #[test]
    fn test_success_invariant_across_kinds() {
        for kind in ErrorKind::ALL {
            let response: ApiResponse<u8> = ApiResponse::error(kind);
            assert_eq!(response.is_success(), kind == ErrorKind::Success);
            assert_eq!(response.is_error(), !response.is_success());
            assert!(response.data().is_none());
        }
    }

    #[test]
    fn test_timestamp_captured_at_construction() {
        let before = Utc::now();
        let response = ApiResponse::success(1);
        let after = Utc::now();

        assert!(response.timestamp() >= before);
        assert!(response.timestamp() <= after);
    }

    #[test]
    fn test_json_shape() {
        let response: ApiResponse<()> = ApiResponse::error(ErrorKind::InternalError);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["code"], json!("INTERNAL_ERROR"));
        assert_eq!(value["message"], json!("An unexpected error occurred"));
        assert_eq!(value["data"], json!(null));
        assert!(value["timestamp"].is_string());
        assert!(value.get("isSuccess").is_none());
        assert_eq!(value.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_json_round_trip_preserves_timestamp() {
        let response = ApiResponse::success(json!({ "id": 1 }));
        let text = serde_json::to_string(&response).unwrap();
        let back: ApiResponse<serde_json::Value> = serde_json::from_str(&text).unwrap();

        assert_eq!(back, response);
    }

    #[test]
    fn test_display() {
        let response = ApiResponse::success(5);
        let text = response.to_string();
        assert!(text.starts_with("ApiResponse{code=SUCCESS, message=Operation completed successfully, data=Some(5)"));
    }
}

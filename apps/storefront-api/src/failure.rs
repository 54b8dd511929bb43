//! # Failure Handling
//!
//! Turns faults raised anywhere in the backend into an envelope plus the
//! transport status the HTTP layer should answer with.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Fault → Reply                                        │
//! │                                                                         │
//! │  Structured fault (impl Classified) ──► handle_classified ──┐          │
//! │                                                              │          │
//! │  Foreign error (impl Error) ──► handle_error ──┐            │          │
//! │                                                 ▼            ▼          │
//! │  Bare message ──────────────────────► classify ──► Reply               │
//! │                                                   { status, body }     │
//! │                                                                         │
//! │  Logging: INTERNAL_ERROR → error!, NOT_FOUND → warn!, else debug!      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;
use storefront_core::{ApiResponse, Classified, ErrorClassifier, ErrorKind};
use tracing::{debug, error, warn};

/// An envelope paired with its transport status, success or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply<T> {
    pub status: u16,
    pub body: ApiResponse<T>,
}

impl<T> Reply<T> {
    /// Pairs an envelope with the status its code implies.
    pub fn from_body(body: ApiResponse<T>) -> Self {
        Reply {
            status: body.http_status(),
            body,
        }
    }

    /// Pairs an envelope with an explicit status.
    pub fn with_status(status: u16, body: ApiResponse<T>) -> Self {
        Reply { status, body }
    }
}

/// Builds error replies with a fixed classification table.
#[derive(Debug, Clone, Default)]
pub struct FailureHandler {
    classifier: ErrorClassifier,
}

impl FailureHandler {
    /// Creates a handler around a classifier.
    pub fn new(classifier: ErrorClassifier) -> Self {
        FailureHandler { classifier }
    }

    /// Handles a fault that only exists as text.
    pub fn handle_message<T>(&self, message: &str) -> Reply<T> {
        let body = ApiResponse::classify_with(&self.classifier, message);
        log_failure(body.code(), message, None);
        Reply::from_body(body)
    }

    /// Handles a foreign error by classifying its display text.
    pub fn handle_error<T, E>(&self, err: &E) -> Reply<T>
    where
        E: StdError + ?Sized,
    {
        let message = err.to_string();
        let body = ApiResponse::classify_with(&self.classifier, message.as_str());
        log_failure(body.code(), &message, err.source());
        Reply::from_body(body)
    }

    /// Handles a fault that already knows its kind. No text sniffing.
    pub fn handle_classified<T, E>(&self, err: &E) -> Reply<T>
    where
        E: Classified + fmt::Display + ?Sized,
    {
        let body = ApiResponse::failure(err);
        log_failure(body.code(), body.message(), None);
        Reply::from_body(body)
    }

    /// The table this handler classifies with.
    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }
}

fn log_failure(kind: ErrorKind, message: &str, source: Option<&(dyn StdError + 'static)>) {
    let cause = source.map(render_chain).unwrap_or_default();

    match kind {
        ErrorKind::InternalError => {
            error!(code = %kind, cause = %cause, "Unhandled failure: {}", message)
        }
        ErrorKind::ResourceNotFound => warn!(code = %kind, "{}", message),
        _ => debug!(code = %kind, "{}", message),
    }
}

fn render_chain(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut current = err.source();
    while let Some(next) = current {
        parts.push(next.to_string());
        current = next.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{ClassificationRule, VersionError};

    #[derive(Debug)]
    struct Wrapped {
        inner: std::io::Error,
    }

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Database connection failed")
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.inner)
        }
    }

    #[test]
    fn test_handle_message_maps_status() {
        let handler = FailureHandler::default();

        let reply: Reply<()> = handler.handle_message("User not found with id: 999");
        assert_eq!(reply.status, 404);
        assert_eq!(reply.body.code(), ErrorKind::ResourceNotFound);
        assert_eq!(reply.body.message(), "User not found with id: 999");

        let reply: Reply<()> = handler.handle_message("Email must be unique");
        assert_eq!(reply.status, 400);

        let reply: Reply<()> = handler.handle_message("");
        assert_eq!(reply.status, 500);
        assert_eq!(reply.body.message(), "An unexpected error occurred");
    }

    #[test]
    fn test_handle_error_uses_display_text() {
        let handler = FailureHandler::default();
        let err = Wrapped {
            inner: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        };

        let reply: Reply<()> = handler.handle_error(&err);
        assert_eq!(reply.status, 500);
        assert_eq!(reply.body.code(), ErrorKind::InternalError);
        assert!(reply.body.data().is_none());
    }

    #[test]
    fn test_handle_classified_skips_text() {
        let handler = FailureHandler::default();
        let reply: Reply<()> = handler.handle_classified(&VersionError::Missing);

        assert_eq!(reply.status, 400);
        assert_eq!(reply.body.code(), ErrorKind::ValidationError);
        assert_eq!(
            reply.body.message(),
            "Version parameter cannot be null or empty"
        );
    }

    #[test]
    fn test_custom_classifier() {
        let classifier = ErrorClassifier::new(vec![ClassificationRule::new(
            ErrorKind::ResourceNotFound,
            ["unknown sku"],
        )])
        .unwrap();
        let handler = FailureHandler::new(classifier);

        let reply: Reply<()> = handler.handle_message("Unknown SKU COKE-330");
        assert_eq!(reply.status, 404);
    }

    #[test]
    fn test_render_chain() {
        let err = Wrapped {
            inner: std::io::Error::new(std::io::ErrorKind::Other, "socket closed"),
        };
        assert_eq!(render_chain(&err), "Database connection failed: socket closed");
    }

    #[test]
    fn test_reply_serializes_body() {
        let reply: Reply<()> = FailureHandler::default().handle_message("Invalid email");
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["status"], 400);
        assert_eq!(json["body"]["code"], "VALIDATION_ERROR");
    }

    #[test]
    fn test_reply_carries_success_status() {
        let reply = Reply::from_body(ApiResponse::success("ok"));
        assert_eq!(reply.status, 200);
        assert!(reply.body.is_success());

        let overridden = Reply::with_status(503, ApiResponse::<()>::error(ErrorKind::InternalError));
        assert_eq!(overridden.status, 503);
    }
}

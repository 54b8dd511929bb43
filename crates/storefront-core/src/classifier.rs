//! # Error Classifier
//!
//! Maps free-text failure messages onto the [`ErrorKind`] taxonomy.
//!
//! ## Where This Sits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Failure → Envelope                                   │
//! │                                                                         │
//! │  Fault with structured kind ──► Classified::error_kind() ──┐           │
//! │                                                             │           │
//! │  Fault with only a message ──► ErrorClassifier::classify ──┤           │
//! │  (third-party error, string                                 │           │
//! │   crossing an untyped boundary)                             ▼           │
//! │                                                     ApiResponse::error  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Text sniffing is the fallback path. Prefer attaching a kind where the
//! failure originates.
//!
//! ## Algorithm
//! 1. Lower-case the message.
//! 2. Walk rules in ascending priority (stable for equal ranks).
//! 3. First rule with a keyword contained in the message wins.
//! 4. No match → `INTERNAL_ERROR`.

use serde::{Deserialize, Serialize};

use crate::error::TaxonomyError;
use crate::taxonomy::ErrorKind;

// =============================================================================
// Classification Rule
// =============================================================================

/// One row of the classification table.
///
/// ## Config Form
/// ```toml
/// [[classifier.rules]]
/// kind = "RESOURCE_NOT_FOUND"
/// keywords = ["not found", "no such"]
/// priority = 20
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRule {
    /// Kind assigned when this rule matches.
    pub kind: ErrorKind,

    /// Substrings tested case-insensitively against the message.
    pub keywords: Vec<String>,

    /// Lower ranks are tested first. Defaults to the kind's catalog rank.
    #[serde(default)]
    pub priority: Option<u8>,
}

impl ClassificationRule {
    /// Creates a rule with the kind's catalog priority.
    pub fn new<I, S>(kind: ErrorKind, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ClassificationRule {
            kind,
            keywords: keywords.into_iter().map(Into::into).collect(),
            priority: None,
        }
    }

    /// Overrides the priority rank.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Effective priority rank.
    pub fn rank(&self) -> u8 {
        self.priority.unwrap_or_else(|| self.kind.priority())
    }

    fn matches(&self, lowered: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowered.contains(keyword.as_str()))
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Priority-ordered classification table.
///
/// Immutable after construction, so one instance can be shared freely
/// across threads.
///
/// ## Example
/// ```rust
/// use storefront_core::{ErrorClassifier, ErrorKind};
///
/// let classifier = ErrorClassifier::standard();
/// assert_eq!(
///     classifier.classify("Invalid id, user not found"),
///     ErrorKind::ValidationError
/// );
/// assert_eq!(
///     classifier.classify("Database connection failed"),
///     ErrorKind::InternalError
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorClassifier {
    rules: Vec<ClassificationRule>,
}

impl ErrorClassifier {
    /// Builds a classifier from a custom rule table.
    ///
    /// ## Rules
    /// - No rule may target `SUCCESS`
    /// - Every rule needs at least one non-blank keyword
    /// - Keywords are trimmed and lower-cased here, once
    pub fn new(rules: Vec<ClassificationRule>) -> Result<Self, TaxonomyError> {
        let mut normalized = Vec::with_capacity(rules.len());

        for rule in rules {
            if rule.kind.is_success() {
                return Err(TaxonomyError::SuccessRule);
            }

            let keywords: Vec<String> = rule
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();

            if keywords.is_empty() {
                return Err(TaxonomyError::EmptyKeywords(rule.kind));
            }

            normalized.push(ClassificationRule { keywords, ..rule });
        }

        // Stable: equal ranks keep their declaration order
        normalized.sort_by_key(ClassificationRule::rank);

        Ok(ErrorClassifier { rules: normalized })
    }

    /// The built-in catalog table.
    pub fn standard() -> Self {
        let rules = ErrorKind::ALL
            .into_iter()
            .filter(|kind| !kind.keywords().is_empty())
            .map(|kind| ClassificationRule::new(kind, kind.keywords().iter().copied()))
            .collect();

        ErrorClassifier { rules }
    }

    /// Classifies a failure message. Total: never fails.
    pub fn classify(&self, message: &str) -> ErrorKind {
        let lowered = message.to_lowercase();

        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.kind)
            .unwrap_or(ErrorKind::InternalError)
    }

    /// Classifies an optional message; `None` is treated as empty.
    pub fn classify_opt(&self, message: Option<&str>) -> ErrorKind {
        self.classify(message.unwrap_or_default())
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        ErrorClassifier::standard()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

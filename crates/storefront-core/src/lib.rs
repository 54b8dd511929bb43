//! # storefront-core: Pure API Contract Logic
//!
//! The response-classification and API-contract layer of the storefront
//! backend. Everything here is a pure function over immutable inputs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Backend                                 │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        HTTP layer / controllers (external collaborators)        │   │
//! │  │    routing ──► handlers ──► fault handling ──► JSON writer     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               storefront-api (adapter crate)                    │   │
//! │  │      FailureHandler • VersionGate • AppConfig • tracing         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │ response  │  │ taxonomy  │  │ classifier │  │  version  │  │   │
//! │  │   │ApiResponse│  │ ErrorKind │  │  rules     │  │ Resolver  │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO GLOBAL STATE • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`response`] - `ApiResponse<T>` envelope
//! - [`taxonomy`] - `ErrorKind` catalog and the `Classified` trait
//! - [`classifier`] - priority-ordered message classification
//! - [`version`] - version token parsing and compatibility checks
//! - [`error`] - domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{ApiResponse, ErrorKind, VersionConfig, VersionResolver};
//!
//! // A fault that only arrived as text
//! let response: ApiResponse<()> = ApiResponse::error_from_message("Order not found: 42");
//! assert_eq!(response.code(), ErrorKind::ResourceNotFound);
//! assert_eq!(response.http_status(), 404);
//!
//! // A version token from the request path
//! let resolver = VersionResolver::new(VersionConfig::default()).unwrap();
//! let report = resolver.check_compatibility("v2").unwrap();
//! assert!(report.is_supported);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod classifier;
pub mod error;
pub mod response;
pub mod taxonomy;
pub mod version;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use classifier::{ClassificationRule, ErrorClassifier};
pub use error::{ConfigError, TaxonomyError, VersionError};
pub use response::ApiResponse;
pub use taxonomy::{Classified, ErrorKind};
pub use version::{
    ApiVersion, CompatibilityReport, VersionConfig, VersionInfo, VersionResolver,
    VersioningStrategy, API_BASE_PATH, DEFAULT_VERSION,
};

// =============================================================================
// Thread-Safety Guarantees
// =============================================================================

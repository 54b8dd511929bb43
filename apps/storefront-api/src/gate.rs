//! # Version Gate
//!
//! Decides, before dispatch, whether a request's version token is served.
//!
//! ## Decision Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  token            admit()                    compatibility()            │
//! │  ───────────────  ─────────────────────────  ─────────────────────────  │
//! │  "v1" (served)    Serve { v1, "/api/v1" }    200 SUCCESS + report       │
//! │  "v99", "0"       Reject 400 + report        200 SUCCESS + report       │
//! │  "", "v1.0"       Reject 400, no data        400 VALIDATION_ERROR       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::{
    ApiResponse, ApiVersion, CompatibilityReport, ErrorKind, VersionError, VersionInfo,
    VersionResolver,
};
use tracing::debug;

use crate::failure::Reply;

/// Outcome of [`VersionGate::admit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    /// Dispatch under this version.
    Serve {
        version: ApiVersion,
        base_path: String,
    },

    /// Answer with this reply instead of dispatching.
    Reject(Reply<CompatibilityReport>),
}

impl Admission {
    /// Returns true if the request may be dispatched.
    pub fn is_served(&self) -> bool {
        matches!(self, Admission::Serve { .. })
    }
}

/// Version check in front of the router.
#[derive(Debug, Clone)]
pub struct VersionGate {
    resolver: VersionResolver,
}

impl VersionGate {
    /// Creates a gate around a resolver.
    pub fn new(resolver: VersionResolver) -> Self {
        VersionGate { resolver }
    }

    /// Admits or rejects a request by its version token.
    pub fn admit(&self, raw: &str) -> Admission {
        let report = match self.resolver.check_compatibility(raw) {
            Ok(report) => report,
            Err(e) => return Admission::Reject(format_rejection(raw, &e)),
        };

        if report.is_supported {
            let version = report.requested_version;
            debug!(%version, "Version admitted");
            return Admission::Serve {
                version,
                base_path: self.resolver.base_path(version),
            };
        }

        debug!(version = %report.requested_version, "Version not supported");
        let message = report.recommendation.clone();
        Admission::Reject(Reply::from_body(ApiResponse::error_with_data(
            ErrorKind::ValidationError,
            message,
            report,
        )))
    }

    /// Answers a compatibility query.
    ///
    /// Valid tokens get a SUCCESS envelope with the report whether or not
    /// they are served; malformed tokens get a VALIDATION_ERROR.
    pub fn compatibility(&self, raw: &str) -> Reply<CompatibilityReport> {
        match self.resolver.check_compatibility(raw) {
            Ok(report) => Reply::from_body(ApiResponse::success(report)),
            Err(e) => format_rejection(raw, &e),
        }
    }

    /// Answers a version info query.
    pub fn info(&self) -> ApiResponse<VersionInfo> {
        ApiResponse::success(self.resolver.version_info())
    }

    /// The resolver behind this gate.
    pub fn resolver(&self) -> &VersionResolver {
        &self.resolver
    }
}

fn format_rejection(raw: &str, err: &VersionError) -> Reply<CompatibilityReport> {
    debug!(token = %raw, error = %err, "Rejected version token");
    Reply::from_body(ApiResponse::failure(err))
}

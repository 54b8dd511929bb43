//! # Storefront API Adapter
//!
//! The collaborator side of the API contract: loads configuration, owns
//! logging, and turns core decisions into replies the HTTP layer can send.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       storefront-api                                    │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  AppConfig     │  │ FailureHandler │  │  VersionGate               ││
//! │  │                │  │                │  │                            ││
//! │  │ • TOML file    │  │ • message      │  │ • admit                    ││
//! │  │ • env override │  │ • std error    │  │ • compatibility            ││
//! │  │ • validation   │  │ • Classified   │  │ • info                     ││
//! │  └───────┬────────┘  └───────┬────────┘  └─────────────┬──────────────┘│
//! │          │                   │                         │               │
//! │          ▼                   ▼                         ▼               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      storefront-core                             │  │
//! │  │   ErrorClassifier • ApiResponse • VersionResolver                │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `STOREFRONT_CONFIG` - Path to the TOML config file
//! - `STOREFRONT_CURRENT_VERSION` - Current API version (e.g. `v2`)
//! - `STOREFRONT_SUPPORTED_VERSIONS` - Comma list (e.g. `v1,v2`)
//! - `STOREFRONT_BASE_PATH` - Versioned route prefix (default: `/api`)
//! - `STOREFRONT_LOG` - Log filter (overridden by `RUST_LOG`)

pub mod config;
pub mod error;
pub mod failure;
pub mod gate;

use tracing::{debug, warn, Subscriber};
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter, Registry};

// Re-exports
pub use config::{AppConfig, LoggingSettings};
pub use error::{AppError, AppResult};
pub use failure::{FailureHandler, Reply};
pub use gate::{Admission, VersionGate};

/// Shared application state, built once at startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub failures: FailureHandler,
    pub gate: VersionGate,
}

impl AppState {
    /// Builds every component from a validated configuration.
    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        let failures = FailureHandler::new(config.classifier()?);
        let gate = VersionGate::new(config.resolver()?);

        Ok(AppState {
            config,
            failures,
            gate,
        })
    }
}

/// Handle to the filter installed by [`init_tracing`].
///
/// Tracing starts before configuration is read so load-time warnings are
/// not lost; the configured filter is swapped in afterwards unless
/// `RUST_LOG` pinned one at startup.
#[derive(Debug, Clone)]
pub struct LogHandle {
    handle: reload::Handle<EnvFilter, Registry>,
    pinned_by_env: bool,
}

impl LogHandle {
    /// Replaces the active filter with `directives`.
    pub fn apply(&self, directives: &str) {
        if self.pinned_by_env {
            debug!("RUST_LOG is set, keeping its filter");
            return;
        }

        if let Err(e) = self.handle.reload(EnvFilter::new(directives)) {
            warn!(error = %e, "Failed to apply configured log filter");
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Show trace for this crate only
/// - Default: `default_filter` until [`LogHandle::apply`] is called
///
/// Returns `None` if a global subscriber was already installed.
pub fn init_tracing(default_filter: &str) -> Option<LogHandle> {
    let from_env = EnvFilter::try_from_default_env().ok();
    let pinned_by_env = from_env.is_some();
    let filter = from_env.unwrap_or_else(|| EnvFilter::new(default_filter));

    // Output goes to stderr so stdout stays clean JSON
    let (subscriber, handle) = tracing_stack(filter, std::io::stderr);
    subscriber.try_init().ok()?;

    Some(LogHandle {
        handle,
        pinned_by_env,
    })
}

fn tracing_stack<W>(
    filter: EnvFilter,
    writer: W,
) -> (
    impl Subscriber + Send + Sync + 'static,
    reload::Handle<EnvFilter, Registry>,
)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(writer));
    (subscriber, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_state_from_default_config() {
        let state = AppState::from_config(AppConfig::default()).unwrap();
        assert!(state.gate.admit("v1").is_served());

        let reply: Reply<()> = state.failures.handle_message("Order not found");
        assert_eq!(reply.status, 404);
    }

    #[test]
    fn test_state_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.version.supported_versions.clear();
        assert!(matches!(
            AppState::from_config(config),
            Err(AppError::Config(_))
        ));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'w> MakeWriter<'w> for Captured {
        type Writer = Captured;

        fn make_writer(&'w self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_config_warnings_reach_the_log() {
        let captured = Captured::default();
        let (subscriber, _handle) =
            tracing_stack(EnvFilter::new(LoggingSettings::default().filter), captured.clone());

        tracing::subscriber::with_default(subscriber, || {
            let missing = std::env::temp_dir().join("storefront-log-test-missing.toml");
            let config = AppConfig::load_with(Some(missing), |key| {
                (key == "STOREFRONT_CURRENT_VERSION").then(|| "v1.5".to_string())
            })
            .unwrap();
            assert_eq!(config.version.current_version, 1);
        });

        let output = captured.text();
        assert!(output.contains("Ignoring STOREFRONT_CURRENT_VERSION"));
        assert!(output.contains("Configuration loaded"));
    }

    #[test]
    fn test_configured_filter_replaces_startup_filter() {
        let captured = Captured::default();
        let (subscriber, handle) = tracing_stack(EnvFilter::new("info"), captured.clone());
        let logs = LogHandle {
            handle,
            pinned_by_env: false,
        };

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("before reload");
            logs.apply("error");
            tracing::info!("after reload");
        });

        let output = captured.text();
        assert!(output.contains("before reload"));
        assert!(!output.contains("after reload"));
    }

    #[test]
    fn test_rust_log_pins_the_filter() {
        let captured = Captured::default();
        let (subscriber, handle) = tracing_stack(EnvFilter::new("info"), captured.clone());
        let logs = LogHandle {
            handle,
            pinned_by_env: true,
        };

        tracing::subscriber::with_default(subscriber, || {
            logs.apply("error");
            tracing::info!("still visible");
        });

        assert!(captured.text().contains("still visible"));
    }
}

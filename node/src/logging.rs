//! # Structured Logging
//!
//! Initializes the `tracing` subscriber with configurable format (JSON or
//! pretty-printed) and environment-based filtering via `RUST_LOG`.
//!
//! All log output is written to stderr so that stdout stays clean for the
//! JSON reports the binary prints.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "tollgate_node=info,tollgate_contracts=info,tollgate_protocol=warn";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, colored output. Suitable for local runs.
    Pretty,
    /// Machine-parseable JSON lines. Suitable for log aggregation.
    Json,
}

impl LogFormat {
    /// Parse a format string. Accepts "json" or "pretty" (case-insensitive).
    /// Returns `Pretty` for any unrecognized value.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Call this exactly once, early in `main()`. Subsequent calls will panic.
///
/// # Environment
///
/// The `RUST_LOG` environment variable overrides `default_level` when set,
/// e.g. `RUST_LOG=tollgate_contracts=debug,tollgate_protocol=debug` to see
/// every committed call and every fee split.
pub fn init_logging(default_level: &str, format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_file(true)
                        .with_line_number(true),
                )
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(true),
                )
                .init();
        }
    }

    tracing::debug!("logging initialized (format={:?})", format);
}

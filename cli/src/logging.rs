//! # Logging
//!
//! Installs the `tracing` subscriber for the tool. Output goes to stderr:
//! stdout carries the envelopes and key material the commands print, and
//! must stay clean enough to pipe.

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "vochain_txtool=info,vochain_tx=info";

/// Filter used with `--verbose`.
pub const VERBOSE_FILTER: &str = "vochain_txtool=debug,vochain_tx=debug";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Initialize the global subscriber. Call once, first thing in `main()`.
///
/// `RUST_LOG` takes precedence over `default_filter`, e.g.
///
/// ```text
/// RUST_LOG=vochain_tx=trace vochain-txtool send-tokens ...
/// ```
pub fn init_logging(default_filter: &str, format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_line_number(false),
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

    tracing::debug!(?format, "logging initialized");
}

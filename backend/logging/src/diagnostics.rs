//! Diagnostics subscriber
//!
//! The library reports its own housekeeping (rotations, retries, archive failures)
//! through `tracing`. Binaries call [`init_diagnostics`] to see those events on
//! stderr, with `RUST_LOG` taking precedence over the given level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output style of the diagnostics stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagnosticsFormat {
    #[default]
    Text,
    Json,
}

/// Install a global subscriber for the logger's internal events.
/// Does nothing if a subscriber is already set.
pub fn init_diagnostics(level: &str, format: DiagnosticsFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let json_layer = (format == DiagnosticsFormat::Json).then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_ansi(false)
    });

    let text_layer = (format == DiagnosticsFormat::Text).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(false)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init();
}

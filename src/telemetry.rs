//! Tracing subscriber setup.

use std::io;

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogFormat, LoggingSettings};

/// Installs the global subscriber. `RUST_LOG` overrides the configured
/// level. Calling it again is a no-op.
pub fn init(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stdout);

    let _ = match settings.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

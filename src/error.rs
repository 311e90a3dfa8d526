//! Unified error type.

use std::time::Duration;

/// The error type returned by bookshelf's fallible operations.
///
/// Request-level failures (401, 404, 405, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// process-level failures: loading configuration, binding the listener, and
/// shutdowns that overrun their grace period.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address: {0}")]
    Addr(#[from] std::net::AddrParseError),

    /// Connections were still open when the grace period ran out and were
    /// closed forcibly.
    #[error("grace period of {grace:?} elapsed with {open} connection(s) still open")]
    ShutdownTimeout { grace: Duration, open: usize },
}

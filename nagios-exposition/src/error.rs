//! Error types for the metrics server.

use std::io;

use thiserror::Error;

/// Errors that can occur while starting the metrics server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listen address does not parse as `host:port`.
    #[error("Invalid listen address {addr}: {reason}")]
    InvalidAddress { addr: String, reason: String },

    /// Binding the listening socket failed.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
}

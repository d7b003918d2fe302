//! Error types for the Nagios client.

use thiserror::Error;

use crate::Resource;

/// Errors that can occur while fetching or decoding a Nagios resource.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection refused, DNS failure, or the transfer broke off.
    #[error("Connection failed: {0}")]
    Network(String),

    /// No response within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The API answered with a non-2xx status.
    #[error("{resource} returned HTTP status {status}")]
    HttpStatus { resource: Resource, status: u16 },

    /// The API answered 200 with an `{"error": ...}` body, e.g. a bad key.
    #[error("Nagios API error: {0}")]
    Api(String),

    /// The body is not JSON or does not have the expected shape.
    #[error("Failed to decode {resource} response: {message}")]
    Schema { resource: Resource, message: String },

    /// The configured endpoint cannot be used to build requests.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl ClientError {
    /// Whether a later scrape may succeed without operator intervention.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Network(_) | ClientError::Timeout => true,
            ClientError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            ClientError::Api(_) | ClientError::Schema { .. } | ClientError::InvalidEndpoint(_) => {
                false
            }
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key as a query parameter.
        let err = err.without_url();
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_builder() {
            ClientError::InvalidEndpoint(error_chain(&err))
        } else {
            ClientError::Network(error_chain(&err))
        }
    }
}

/// `err` followed by each of its sources, e.g.
/// `error sending request: client error (Connect): connection refused`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.ends_with(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}

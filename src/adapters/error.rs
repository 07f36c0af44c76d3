//! Error types for the cluster REST adapters.

use thiserror::Error;

/// Failures on the wire or while decoding what came back. A response that
/// is not decodable as the expected shape is a transport-level failure too;
/// the adapters do not distinguish "not found" from "wrong shape".
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to decode the response body.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid endpoint URL.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

//! Error types for the hero API client.
//!
//! # Design
//! The variants exist for diagnostics only. `HeroClient` treats every one of
//! them the same way: it logs the raw error, notifies, and substitutes a
//! fallback value. None of them ever reaches a caller of the public
//! operations. `Transport` displays as the bare message so notifications read
//! `"<operation> failed: <message>"` exactly as the transport reported it.

use thiserror::Error;

/// Failures raised while executing or decoding a request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout...).
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}{}", body_suffix(.body))]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

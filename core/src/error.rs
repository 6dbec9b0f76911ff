//! Error types for the HTTP client.
//!
//! # Design
//! Only connection-level failures, timeouts, and malformed URLs fail a
//! request. A non-2xx status is a normal response and never lands here.
//! Transport errors are carried through untouched, so callers see exactly
//! what the underlying engine reported.

use std::time::Duration;

use crate::transport::TransportError;

/// Errors returned by `HttpClient` operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The URL (or base URL plus relative URL) could not be resolved to an
    /// absolute `http`/`https` URL. Raised before any network activity.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// No complete response arrived within the configured duration.
    #[error("Request timeout after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The transport failed (refused connection, DNS, TLS, reset, ...).
    #[error(transparent)]
    Transport(TransportError),

    /// A request body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A response body could not be deserialized into the requested type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ClientError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Timeout(_))
    }
}

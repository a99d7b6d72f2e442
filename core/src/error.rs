//! Error types for the MyFinances client.
//!
//! # Design
//! Variants fall into three groups. Transport errors (`NotFound`,
//! `HttpError`, `Connection`) come out of the transport unchanged. Validation
//! errors (`Validation`, `Serialization`) mean a payload did not match its
//! declared type. Usage errors (`MissingParameter`) are raised before any
//! request leaves the process.
//!
//! A response whose `meta.success` is `false` is not an error; it comes back
//! as a normal `ResponseEnvelope` for the caller to inspect.

use thiserror::Error;

/// Errors returned by the client, its services and its transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404. The requested resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response (DNS, connect, IO, timeout).
    #[error("connection failed: {0}")]
    Connection(String),

    /// The response did not match the `{meta, data}` envelope or the
    /// declared payload type.
    #[error("invalid response: {0}")]
    Validation(String),

    /// The request input could not be encoded as a JSON object.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A required parameter was absent or blank.
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),

    /// Client configuration was incomplete or malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Network failure or non-2xx status.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::NotFound | ApiError::HttpError { .. } | ApiError::Connection(_)
        )
    }

    /// Payload did not match its declared shape.
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_) | ApiError::SerializationError(_))
    }

    /// The caller omitted something required. No request was sent.
    pub fn is_usage(&self) -> bool {
        matches!(self, ApiError::MissingParameter(_))
    }
}

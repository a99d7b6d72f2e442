//! The `{meta, data}` envelope wrapped around every API response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Outcome metadata present on every response.
///
/// `success == false` marks a business-rule rejection. It is delivered as
/// a normal value, never as an `ApiError`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub success: bool,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A typed response: metadata plus a payload of type `T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub meta: ResponseMeta,
    pub data: T,
}

impl<T: DeserializeOwned> ResponseEnvelope<T> {
    /// Build an envelope from the raw document returned by a transport.
    ///
    /// Fails with `ApiError::Validation` when `meta` or `data` is missing or
    /// either does not match its declared type.
    pub fn from_raw(raw: Value) -> Result<Self, ApiError> {
        serde_json::from_value(raw).map_err(|e| ApiError::Validation(e.to_string()))
    }
}

impl<T> ResponseEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.meta.success
    }

    /// Discard the metadata.
    pub fn into_data(self) -> T {
        self.data
    }
}

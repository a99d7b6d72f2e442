//! Parameter mappings with unset entries removed.
//!
//! # Design
//! Every create, update, list and search call funnels its input through
//! `Params`. Optional inputs are `Option<T>`; `None` means "the caller did
//! not supply this" and the key is left out of the outgoing payload
//! entirely, so partial updates never overwrite server-side fields with
//! `null`. An explicit JSON `null` is treated the same way.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Field name to value mapping containing only present fields, sorted by
/// field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep every `(name, Some(value))` pair whose value is not `null`.
    pub fn from_fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<Value>)>,
        K: Into<String>,
    {
        let map = fields
            .into_iter()
            .filter_map(|(key, value)| match value {
                Some(Value::Null) | None => None,
                Some(value) => Some((key.into(), value)),
            })
            .collect();
        Self(map)
    }

    /// Encode a typed input struct and drop its unset fields.
    ///
    /// The input must serialize to a JSON object.
    pub fn from_serialize<S: Serialize + ?Sized>(input: &S) -> Result<Self, ApiError> {
        match serde_json::to_value(input) {
            Ok(Value::Object(map)) => {
                Ok(Self::from_fields(map.into_iter().map(|(k, v)| (k, Some(v)))))
            }
            Ok(other) => Err(ApiError::SerializationError(format!(
                "expected a JSON object, got {other}"
            ))),
            Err(e) => Err(ApiError::SerializationError(e.to_string())),
        }
    }

    /// Fail with `MissingParameter` unless every name in `required` is
    /// present. Blank strings count as absent.
    pub fn require(&self, required: &[&'static str]) -> Result<(), ApiError> {
        for &name in required {
            match self.0.get(name) {
                None => return Err(ApiError::MissingParameter(name)),
                Some(Value::String(s)) if s.trim().is_empty() => {
                    return Err(ApiError::MissingParameter(name));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as query pairs. Strings are sent bare, everything else in its
    /// JSON text form.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(key, value)| {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), rendered)
            })
            .collect()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl Serialize for Params {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl PartialEq<Value> for Params {
    fn eq(&self, other: &Value) -> bool {
        matches!(other, Value::Object(map) if *map == self.0)
    }
}

//! The HTTP-calling collaborator behind every service.
//!
//! # Design
//! Services only ever see the four-verb `Transport` trait and the raw JSON
//! document it returns. `HttpTransport` is the stock implementation. It
//! splits each call into `build_request` (pure), a blocking ureq round-trip,
//! and `parse_response` (pure), so the interesting parts can be tested
//! without a socket.
//!
//! Transports report failures as-is. Nothing here retries.

use std::fmt;
use std::time::Duration;

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::params::Params;

/// Four-verb interface every resource service dispatches through.
///
/// Each method returns the response body as a JSON document shaped like
/// `{"meta": {...}, "data": ...}`. Implementations decide what counts as a
/// transport failure; services never reinterpret it.
pub trait Transport {
    fn get(&self, path: &str, params: &Params) -> Result<Value, ApiError>;
    fn post(&self, path: &str, body: &Params) -> Result<Value, ApiError>;
    fn patch(&self, path: &str, body: &Params) -> Result<Value, ApiError>;
    fn delete(&self, path: &str) -> Result<Value, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, path: &str, params: &Params) -> Result<Value, ApiError> {
        (**self).get(path, params)
    }

    fn post(&self, path: &str, body: &Params) -> Result<Value, ApiError> {
        (**self).post(path, body)
    }

    fn patch(&self, path: &str, body: &Params) -> Result<Value, ApiError> {
        (**self).patch(path, body)
    }

    fn delete(&self, path: &str) -> Result<Value, ApiError> {
        (**self).delete(path)
    }
}

/// Blocking JSON-over-HTTP transport authenticated with a bearer API key.
#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    api_key: String,
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(api_key: &str, base_url: &str) -> Self {
        Self::with_timeout(api_key, base_url, None)
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_timeout(&config.api_key, &config.base_url, config.timeout)
    }

    fn with_timeout(api_key: &str, base_url: &str, timeout: Option<Duration>) -> Self {
        // Status codes are interpreted by `parse_response`, not by ureq.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            agent,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Describe a call as plain data. GET sends `params` as the query
    /// string, POST and PATCH send them as a JSON body, DELETE sends neither.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        params: &Params,
    ) -> Result<HttpRequest, ApiError> {
        let mut headers = vec![
            ("accept".to_string(), "application/json".to_string()),
            ("authorization".to_string(), format!("Bearer {}", self.api_key)),
        ];
        let (query, body) = match method {
            HttpMethod::Get => (params.to_query_pairs(), None),
            HttpMethod::Delete => (Vec::new(), None),
            HttpMethod::Post | HttpMethod::Patch => {
                let body = serde_json::to_string(params)
                    .map_err(|e| ApiError::SerializationError(e.to_string()))?;
                headers.push(("content-type".to_string(), "application/json".to_string()));
                (Vec::new(), Some(body))
            }
        };
        Ok(HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            query,
            headers,
            body,
        })
    }

    /// Turn a raw response into the JSON document, or a transport error for
    /// any non-2xx status.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Err(ApiError::Validation("empty response body".to_string()));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Validation(e.to_string()))
    }

    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = match req.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&req.path);
                for (key, value) in &req.query {
                    builder = builder.query(key, value);
                }
                for (name, value) in &req.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Delete => {
                let mut builder = self.agent.delete(&req.path);
                for (name, value) in &req.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post | HttpMethod::Patch => {
                let mut builder = if req.method == HttpMethod::Post {
                    self.agent.post(&req.path)
                } else {
                    self.agent.patch(&req.path)
                };
                for (name, value) in &req.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &req.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| ApiError::Connection(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (name.as_str().to_string(), value.to_str().unwrap_or_default().to_string())
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        tracing::debug!(method = req.method.as_str(), path = %req.path, status, "response received");

        Ok(HttpResponse { status, headers, body })
    }

    fn send(&self, method: HttpMethod, path: &str, params: &Params) -> Result<Value, ApiError> {
        let req = self.build_request(method, path, params)?;
        let response = self.execute(req)?;
        self.parse_response(response)
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str, params: &Params) -> Result<Value, ApiError> {
        self.send(HttpMethod::Get, path, params)
    }

    fn post(&self, path: &str, body: &Params) -> Result<Value, ApiError> {
        self.send(HttpMethod::Post, path, body)
    }

    fn patch(&self, path: &str, body: &Params) -> Result<Value, ApiError> {
        self.send(HttpMethod::Patch, path, body)
    }

    fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.send(HttpMethod::Delete, path, &Params::new())
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

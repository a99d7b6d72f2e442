//! In-process `Transport` that records every call and replays canned
//! documents, so tests can assert on exactly what a service sent.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use myfinances::{ApiError, HttpMethod, MyFinancesClient, Params, Transport};
use serde_json::{json, Value};

/// One recorded transport invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: HttpMethod,
    pub path: String,
    pub params: Value,
}

#[derive(Debug, Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
    replies: Mutex<VecDeque<Result<Value, ApiError>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next document to return.
    pub fn reply(&self, doc: Value) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(doc));
        self
    }

    /// Queue a transport failure.
    pub fn fail(&self, err: ApiError) -> &Self {
        self.replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn only_call(&self) -> Call {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one transport call, got {calls:?}");
        calls.into_iter().next().unwrap()
    }

    fn record(&self, method: HttpMethod, path: &str, params: &Params) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            params: params.to_value(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no reply queued for {} {path}", method.as_str()))
    }
}

impl Transport for RecordingTransport {
    fn get(&self, path: &str, params: &Params) -> Result<Value, ApiError> {
        self.record(HttpMethod::Get, path, params)
    }

    fn post(&self, path: &str, body: &Params) -> Result<Value, ApiError> {
        self.record(HttpMethod::Post, path, body)
    }

    fn patch(&self, path: &str, body: &Params) -> Result<Value, ApiError> {
        self.record(HttpMethod::Patch, path, body)
    }

    fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.record(HttpMethod::Delete, path, &Params::new())
    }
}

pub fn client() -> MyFinancesClient<RecordingTransport> {
    MyFinancesClient::with_transport(RecordingTransport::new())
}

/// A successful envelope around `data`.
pub fn ok(data: Value) -> Value {
    json!({
        "meta": {"success": true, "status_code": 200, "message": "Success"},
        "data": data,
    })
}

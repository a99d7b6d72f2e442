//! Resource services and the base they share.
//!
//! # Design
//! A service borrows the client's transport for as long as it lives and
//! holds nothing else. Every operation follows the same three steps:
//! filter the typed input into `Params`, dispatch one transport call, and
//! wrap the raw document in a `ResponseEnvelope`.

pub mod clients;
pub mod invoices;
pub mod receipts;

use serde::de::DeserializeOwned;

use crate::envelope::ResponseEnvelope;
use crate::error::ApiError;
use crate::params::Params;
use crate::transport::Transport;

pub use clients::ClientsService;
pub use invoices::InvoicesService;
pub use receipts::ReceiptsService;

/// Transport handle shared by the resource services. Errors from the
/// transport pass through untouched.
#[derive(Debug)]
pub struct BaseService<'a, T: ?Sized> {
    transport: &'a T,
}

impl<T: ?Sized> Clone for BaseService<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for BaseService<'_, T> {}

impl<'a, T: Transport + ?Sized> BaseService<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    pub(crate) fn get<D: DeserializeOwned>(
        &self,
        path: &str,
        params: &Params,
    ) -> Result<ResponseEnvelope<D>, ApiError> {
        log_dispatch("GET", path, params);
        ResponseEnvelope::from_raw(self.transport.get(path, params)?)
    }

    pub(crate) fn post<D: DeserializeOwned>(
        &self,
        path: &str,
        body: &Params,
    ) -> Result<ResponseEnvelope<D>, ApiError> {
        log_dispatch("POST", path, body);
        ResponseEnvelope::from_raw(self.transport.post(path, body)?)
    }

    pub(crate) fn patch<D: DeserializeOwned>(
        &self,
        path: &str,
        body: &Params,
    ) -> Result<ResponseEnvelope<D>, ApiError> {
        log_dispatch("PATCH", path, body);
        ResponseEnvelope::from_raw(self.transport.patch(path, body)?)
    }

    pub(crate) fn delete<D: DeserializeOwned>(&self, path: &str) -> Result<ResponseEnvelope<D>, ApiError> {
        log_dispatch("DELETE", path, &Params::new());
        ResponseEnvelope::from_raw(self.transport.delete(path)?)
    }
}

// Keys only; values may hold personal data.
fn log_dispatch(method: &str, path: &str, params: &Params) {
    if tracing::enabled!(tracing::Level::DEBUG) {
        let keys: Vec<&str> = params.keys().collect();
        tracing::debug!(method, path, ?keys, "dispatching request");
    }
}

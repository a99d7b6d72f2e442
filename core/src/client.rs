//! Top-level entry point for the MyFinances API.
//!
//! # Design
//! `MyFinancesClient` owns one transport and nothing else. Resource services
//! are cheap borrowed views created on demand, so the client can be shared
//! by reference and every call stays independent. Whether calls may run on
//! several threads at once depends only on the transport; `HttpTransport`
//! is `Send + Sync`.

use crate::config::ClientConfig;
use crate::services::{BaseService, ClientsService, InvoicesService, ReceiptsService};
use crate::transport::{HttpTransport, Transport};

/// Typed client exposing the `clients`, `invoices` and `receipts`
/// namespaces.
#[derive(Debug, Clone)]
pub struct MyFinancesClient<T = HttpTransport> {
    transport: T,
}

impl MyFinancesClient<HttpTransport> {
    /// Connect to `base_url` (e.g. `http://127.0.0.1:8000/api/public`)
    /// using `api_key` as the bearer token.
    pub fn new(api_key: &str, base_url: &str) -> Self {
        Self::with_transport(HttpTransport::new(api_key, base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_transport(HttpTransport::from_config(config))
    }
}

impl<T: Transport> MyFinancesClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn clients(&self) -> ClientsService<'_, T> {
        ClientsService::new(self.base())
    }

    pub fn invoices(&self) -> InvoicesService<'_, T> {
        InvoicesService::new(self.base())
    }

    pub fn receipts(&self) -> ReceiptsService<'_, T> {
        ReceiptsService::new(self.base())
    }

    fn base(&self) -> BaseService<'_, T> {
        BaseService::new(&self.transport)
    }
}

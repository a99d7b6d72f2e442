//! Typed client for the MyFinances finance-management API.
//!
//! # Overview
//! `MyFinancesClient` exposes three resource namespaces (`clients()`,
//! `invoices()`, `receipts()`). Each operation turns a typed input into a
//! filtered parameter mapping, makes exactly one blocking transport call,
//! and returns the server's `{meta, data}` document as a typed
//! `ResponseEnvelope<T>`.
//!
//! # Design
//! - Optional inputs are `Option<T>`. Unset fields never reach the wire, so
//!   partial updates leave untouched fields alone server-side (`Params`).
//! - The network sits behind the four-verb `Transport` trait. `HttpTransport`
//!   is the stock blocking implementation; tests plug in their own.
//! - `meta.success == false` is data, not an error. Only transport failures,
//!   envelope mismatches and missing required inputs produce `ApiError`.
//!
//! ```no_run
//! use myfinances::{CreateClient, MyFinancesClient};
//!
//! let client = MyFinancesClient::new("api-key", "http://127.0.0.1:8000/api/public");
//! let created = client.clients().create(&CreateClient {
//!     name: "nerd".to_string(),
//!     ..Default::default()
//! })?;
//! println!("created client {}", created.data.client_id);
//! # Ok::<(), myfinances::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod params;
pub mod services;
pub mod transport;
pub mod types;

pub use client::MyFinancesClient;
pub use config::ClientConfig;
pub use envelope::{ResponseEnvelope, ResponseMeta};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use params::Params;
pub use services::{BaseService, ClientsService, InvoicesService, ReceiptsService};
pub use transport::{HttpTransport, Transport};
pub use types::{
    Ack, Client, ClientId, ClientQuery, CreateClient, CreateInvoice, CreateReceipt, Invoice,
    InvoiceId, InvoiceQuery, Receipt, ReceiptId, ReceiptQuery, UpdateClient, UpdateInvoice,
};

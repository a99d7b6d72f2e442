//! Invoices: create, list, get, delete, search, update.

use crate::envelope::ResponseEnvelope;
use crate::error::ApiError;
use crate::params::Params;
use crate::services::BaseService;
use crate::transport::Transport;
use crate::types::{Ack, CreateInvoice, Invoice, InvoiceId, InvoiceQuery, UpdateInvoice};

#[derive(Debug)]
pub struct InvoicesService<'a, T: ?Sized> {
    base: BaseService<'a, T>,
}

impl<'a, T: Transport + ?Sized> InvoicesService<'a, T> {
    pub fn new(base: BaseService<'a, T>) -> Self {
        Self { base }
    }

    /// `POST /invoices/create`. Fails with `MissingParameter` before sending
    /// anything unless both `customer_id` and a finite `amount` are set.
    pub fn create(&self, input: &CreateInvoice) -> Result<ResponseEnvelope<InvoiceId>, ApiError> {
        let body = Params::from_serialize(input)?;
        body.require(&["customer_id", "amount"])?;
        self.base.post("/invoices/create", &body)
    }

    pub fn list(&self) -> Result<ResponseEnvelope<Vec<Invoice>>, ApiError> {
        self.base.get("/invoices/", &Params::new())
    }

    pub fn get(&self, invoice_id: i64) -> Result<ResponseEnvelope<Invoice>, ApiError> {
        self.base.get(&format!("/invoices/{invoice_id}/"), &Params::new())
    }

    pub fn delete(&self, invoice_id: i64) -> Result<ResponseEnvelope<Ack>, ApiError> {
        self.base.delete(&format!("/invoices/{invoice_id}/delete"))
    }

    /// `GET /invoices/search` filtered by customer and/or status.
    pub fn search(&self, query: &InvoiceQuery) -> Result<ResponseEnvelope<Vec<Invoice>>, ApiError> {
        let params = Params::from_serialize(query)?;
        self.base.get("/invoices/search", &params)
    }

    /// `PATCH /invoices/{id}/update`. This is the only way an invoice's
    /// status changes.
    pub fn update(
        &self,
        invoice_id: i64,
        input: &UpdateInvoice,
    ) -> Result<ResponseEnvelope<Invoice>, ApiError> {
        let body = Params::from_serialize(input)?;
        self.base.patch(&format!("/invoices/{invoice_id}/update"), &body)
    }
}

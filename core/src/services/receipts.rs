//! Receipts: create, list, delete, search.

use crate::envelope::ResponseEnvelope;
use crate::error::ApiError;
use crate::params::Params;
use crate::services::BaseService;
use crate::transport::Transport;
use crate::types::{Ack, CreateReceipt, Receipt, ReceiptId, ReceiptQuery};

#[derive(Debug)]
pub struct ReceiptsService<'a, T: ?Sized> {
    base: BaseService<'a, T>,
}

impl<'a, T: Transport + ?Sized> ReceiptsService<'a, T> {
    pub fn new(base: BaseService<'a, T>) -> Self {
        Self { base }
    }

    /// `POST /receipts/create/`. The name must not be blank.
    pub fn create(&self, input: &CreateReceipt) -> Result<ResponseEnvelope<ReceiptId>, ApiError> {
        let body = Params::from_serialize(input)?;
        body.require(&["name"])?;
        self.base.post("/receipts/create/", &body)
    }

    pub fn list(&self) -> Result<ResponseEnvelope<Vec<Receipt>>, ApiError> {
        self.base.get("/receipts/", &Params::new())
    }

    pub fn delete(&self, receipt_id: i64) -> Result<ResponseEnvelope<Ack>, ApiError> {
        self.base.delete(&format!("/receipts/{receipt_id}/delete"))
    }

    pub fn search(&self, query: &ReceiptQuery) -> Result<ResponseEnvelope<Vec<Receipt>>, ApiError> {
        let params = Params::from_serialize(query)?;
        self.base.get("/receipts/search/", &params)
    }
}

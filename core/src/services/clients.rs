//! Client records: list, create, get, update, delete.

use crate::envelope::ResponseEnvelope;
use crate::error::ApiError;
use crate::params::Params;
use crate::services::BaseService;
use crate::transport::Transport;
use crate::types::{Ack, Client, ClientId, ClientQuery, CreateClient, UpdateClient};

#[derive(Debug)]
pub struct ClientsService<'a, T: ?Sized> {
    base: BaseService<'a, T>,
}

impl<'a, T: Transport + ?Sized> ClientsService<'a, T> {
    pub fn new(base: BaseService<'a, T>) -> Self {
        Self { base }
    }

    /// `GET /clients/`, optionally ordered and filtered by a search term.
    pub fn list(&self, query: &ClientQuery) -> Result<ResponseEnvelope<Vec<Client>>, ApiError> {
        let params = Params::from_serialize(query)?;
        self.base.get("/clients/", &params)
    }

    /// `POST /clients/create/`. Fails with `MissingParameter("name")` before
    /// sending anything if the name is blank.
    pub fn create(&self, input: &CreateClient) -> Result<ResponseEnvelope<ClientId>, ApiError> {
        let body = Params::from_serialize(input)?;
        body.require(&["name"])?;
        self.base.post("/clients/create/", &body)
    }

    pub fn get(&self, client_id: i64) -> Result<ResponseEnvelope<Client>, ApiError> {
        self.base.get(&format!("/clients/{client_id}"), &Params::new())
    }

    /// `PATCH /clients/update/` with only the fields that are set.
    pub fn update(&self, input: &UpdateClient) -> Result<ResponseEnvelope<Client>, ApiError> {
        let body = Params::from_serialize(input)?;
        self.base.patch("/clients/update/", &body)
    }

    pub fn delete(&self, client_id: i64) -> Result<ResponseEnvelope<Ack>, ApiError> {
        self.base.delete(&format!("/clients/{client_id}/delete"))
    }
}

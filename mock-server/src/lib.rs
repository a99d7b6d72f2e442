//! In-memory stand-in for the MyFinances public API.
//!
//! Serves every client, invoice and receipt route with `{meta, data}`
//! envelopes. Ids are assigned sequentially from 1 across all resources.
//! When started with an API key, every request must present it as a bearer
//! token.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Meta {
    pub success: bool,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: Meta,
    pub data: T,
}

fn envelope<T: Serialize>(status: StatusCode, message: &str, data: T) -> Response {
    let body = Envelope {
        meta: Meta {
            success: status.is_success(),
            status_code: status.as_u16(),
            message: Some(message.to_string()),
        },
        data,
    };
    (status, Json(body)).into_response()
}

/// A business-rule rejection: HTTP 200 carrying `success: false`.
fn rejected(message: &str) -> Response {
    let body = Envelope {
        meta: Meta {
            success: false,
            status_code: StatusCode::BAD_REQUEST.as_u16(),
            message: Some(message.to_string()),
        },
        data: Value::Null,
    };
    (StatusCode::OK, Json(body)).into_response()
}

fn not_found(entity: &str, id: i64) -> Response {
    envelope(StatusCode::NOT_FOUND, &format!("{entity} {id} not found"), Value::Null)
}

// ---------------------------------------------------------------------------
// Records and inputs
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub contact_method: Option<String>,
    pub is_representative: bool,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateClient {
    pub name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub contact_method: Option<String>,
    #[serde(default)]
    pub is_representative: bool,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateClient {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub contact_method: Option<String>,
    pub is_representative: Option<bool>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Deserialize)]
pub struct ClientListQuery {
    pub order_by: Option<String>,
    pub search: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub customer_id: i64,
    pub amount: f64,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: String,
}

#[derive(Deserialize)]
pub struct CreateInvoice {
    pub customer_id: i64,
    pub amount: f64,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct UpdateInvoice {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct InvoiceSearch {
    pub customer_id: Option<i64>,
    pub status: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Receipt {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub date: Option<NaiveDate>,
    pub merchant_store: Option<String>,
    pub purchase_category: Option<String>,
    pub total_amount: f64,
    pub owner: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateReceipt {
    pub name: String,
    pub image: Option<String>,
    pub date: Option<NaiveDate>,
    pub merchant_store: Option<String>,
    pub purchase_category: Option<String>,
    pub total_amount: Option<f64>,
    pub owner: Option<String>,
}

#[derive(Deserialize)]
pub struct ReceiptSearch {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub merchant_store: Option<String>,
    pub image: Option<String>,
    pub date: Option<NaiveDate>,
    pub purchase_category: Option<String>,
    pub total_amount: Option<f64>,
    pub owner: Option<String>,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Store {
    clients: BTreeMap<i64, Client>,
    invoices: BTreeMap<i64, Invoice>,
    receipts: BTreeMap<i64, Receipt>,
    last_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    api_key: Option<Arc<str>>,
}

/// Build the router. With `Some(key)`, requests lacking
/// `Authorization: Bearer <key>` get a 401 envelope.
pub fn app(api_key: Option<String>) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Store::default())),
        api_key: api_key.map(Arc::from),
    };
    Router::new()
        .route("/clients/", get(list_clients))
        .route("/clients/create/", post(create_client))
        .route("/clients/update/", patch(update_client))
        .route("/clients/{id}", get(get_client))
        .route("/clients/{id}/delete", delete(delete_client))
        .route("/invoices/", get(list_invoices))
        .route("/invoices/create", post(create_invoice))
        .route("/invoices/search", get(search_invoices))
        .route("/invoices/{id}/", get(get_invoice))
        .route("/invoices/{id}/update", patch(update_invoice))
        .route("/invoices/{id}/delete", delete(delete_invoice))
        .route("/receipts/", get(list_receipts))
        .route("/receipts/create/", post(create_receipt))
        .route("/receipts/search/", get(search_receipts))
        .route("/receipts/{id}/delete", delete(delete_receipt))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: Option<String>) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

async fn require_api_key(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if let Some(expected) = state.api_key.as_deref() {
        let presented = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));
        if presented != Some(expected) {
            tracing::warn!(path = %req.uri().path(), "rejected request with bad API key");
            return envelope(StatusCode::UNAUTHORIZED, "invalid or missing API key", Value::Null);
        }
    }
    next.run(req).await
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

async fn list_clients(State(state): State<AppState>, Query(query): Query<ClientListQuery>) -> Response {
    let store = state.db.read().await;
    let mut clients: Vec<Client> = store
        .clients
        .values()
        .filter(|c| match &query.search {
            None => true,
            Some(term) => {
                contains_ignore_case(Some(&c.name), term)
                    || contains_ignore_case(c.company.as_deref(), term)
                    || contains_ignore_case(c.email.as_deref(), term)
            }
        })
        .cloned()
        .collect();
    match query.order_by.as_deref() {
        Some("name") => clients.sort_by(|a, b| a.name.cmp(&b.name)),
        Some("-name") => clients.sort_by(|a, b| b.name.cmp(&a.name)),
        Some("-id") => clients.reverse(),
        _ => {}
    }
    envelope(StatusCode::OK, "Success", clients)
}

async fn create_client(State(state): State<AppState>, Json(input): Json<CreateClient>) -> Response {
    if input.name.trim().is_empty() {
        return rejected("name is required");
    }
    let mut store = state.db.write().await;
    let id = store.next_id();
    store.clients.insert(
        id,
        Client {
            id,
            name: input.name,
            phone_number: input.phone_number,
            email: input.email,
            company: input.company,
            contact_method: input.contact_method,
            is_representative: input.is_representative,
            address: input.address,
            city: input.city,
            country: input.country,
        },
    );
    tracing::info!(id, "client created");
    envelope(StatusCode::CREATED, "Client created", json!({"client_id": id}))
}

async fn get_client(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let store = state.db.read().await;
    match store.clients.get(&id) {
        Some(client) => envelope(StatusCode::OK, "Success", client),
        None => not_found("client", id),
    }
}

async fn update_client(State(state): State<AppState>, Json(input): Json<UpdateClient>) -> Response {
    let Some(id) = input.id else {
        return rejected("client id is required");
    };
    let mut store = state.db.write().await;
    let Some(client) = store.clients.get_mut(&id) else {
        return not_found("client", id);
    };
    if let Some(name) = input.name {
        client.name = name;
    }
    if let Some(phone_number) = input.phone_number {
        client.phone_number = Some(phone_number);
    }
    if let Some(email) = input.email {
        client.email = Some(email);
    }
    if let Some(company) = input.company {
        client.company = Some(company);
    }
    if let Some(contact_method) = input.contact_method {
        client.contact_method = Some(contact_method);
    }
    if let Some(is_representative) = input.is_representative {
        client.is_representative = is_representative;
    }
    if let Some(address) = input.address {
        client.address = Some(address);
    }
    if let Some(city) = input.city {
        client.city = Some(city);
    }
    if let Some(country) = input.country {
        client.country = Some(country);
    }
    envelope(StatusCode::OK, "Client updated", client.clone())
}

async fn delete_client(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let mut store = state.db.write().await;
    match store.clients.remove(&id) {
        Some(_) => envelope(StatusCode::OK, "Client deleted", json!({"client_id": id})),
        None => not_found("client", id),
    }
}

// ---------------------------------------------------------------------------
// Invoices
// ---------------------------------------------------------------------------

async fn create_invoice(State(state): State<AppState>, Json(input): Json<CreateInvoice>) -> Response {
    if input.amount <= 0.0 {
        return rejected("amount must be greater than zero");
    }
    let mut store = state.db.write().await;
    let id = store.next_id();
    store.invoices.insert(
        id,
        Invoice {
            id,
            customer_id: input.customer_id,
            amount: input.amount,
            description: input.description,
            due_date: input.due_date,
            status: "pending".to_string(),
        },
    );
    tracing::info!(id, "invoice created");
    envelope(StatusCode::CREATED, "Successfully created", json!({"invoice_id": id}))
}

async fn list_invoices(State(state): State<AppState>) -> Response {
    let store = state.db.read().await;
    let invoices: Vec<Invoice> = store.invoices.values().cloned().collect();
    envelope(StatusCode::OK, "Successfully fetched invoices", invoices)
}

async fn get_invoice(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let store = state.db.read().await;
    match store.invoices.get(&id) {
        Some(invoice) => envelope(StatusCode::OK, "Invoice fetched successfully", invoice),
        None => not_found("invoice", id),
    }
}

async fn search_invoices(State(state): State<AppState>, Query(query): Query<InvoiceSearch>) -> Response {
    let store = state.db.read().await;
    let invoices: Vec<Invoice> = store
        .invoices
        .values()
        .filter(|i| query.customer_id.map_or(true, |id| i.customer_id == id))
        .filter(|i| query.status.as_ref().map_or(true, |s| &i.status == s))
        .cloned()
        .collect();
    envelope(StatusCode::OK, "Invoices fetched successfully", invoices)
}

async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateInvoice>,
) -> Response {
    if input.amount.is_some_and(|amount| amount <= 0.0) {
        return rejected("amount must be greater than zero");
    }
    let mut store = state.db.write().await;
    let Some(invoice) = store.invoices.get_mut(&id) else {
        return not_found("invoice", id);
    };
    if let Some(amount) = input.amount {
        invoice.amount = amount;
    }
    if let Some(description) = input.description {
        invoice.description = Some(description);
    }
    if let Some(due_date) = input.due_date {
        invoice.due_date = Some(due_date);
    }
    if let Some(status) = input.status {
        invoice.status = status;
    }
    envelope(StatusCode::OK, "Invoices successfully updated", invoice.clone())
}

async fn delete_invoice(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let mut store = state.db.write().await;
    match store.invoices.remove(&id) {
        Some(_) => envelope(StatusCode::OK, "Successfully deleted invoice", json!({"invoice_id": id})),
        None => not_found("invoice", id),
    }
}

// ---------------------------------------------------------------------------
// Receipts
// ---------------------------------------------------------------------------

async fn create_receipt(State(state): State<AppState>, Json(input): Json<CreateReceipt>) -> Response {
    if input.name.trim().is_empty() {
        return rejected("name is required");
    }
    let Some(total_amount) = input.total_amount.filter(|amount| *amount > 0.0) else {
        return rejected("total_amount must be greater than zero");
    };
    let mut store = state.db.write().await;
    let id = store.next_id();
    store.receipts.insert(
        id,
        Receipt {
            id,
            name: input.name,
            image: input.image.unwrap_or_default(),
            date: input.date,
            merchant_store: input.merchant_store,
            purchase_category: input.purchase_category,
            total_amount,
            owner: input.owner,
        },
    );
    tracing::info!(id, "receipt created");
    envelope(StatusCode::CREATED, "Receipt created", json!({"receipt_id": id}))
}

async fn list_receipts(State(state): State<AppState>) -> Response {
    let store = state.db.read().await;
    let receipts: Vec<Receipt> = store.receipts.values().cloned().collect();
    envelope(StatusCode::OK, "Success", receipts)
}

async fn search_receipts(State(state): State<AppState>, Query(query): Query<ReceiptSearch>) -> Response {
    let store = state.db.read().await;
    let receipts: Vec<Receipt> = store
        .receipts
        .values()
        .filter(|r| query.id.map_or(true, |id| r.id == id))
        .filter(|r| query.name.as_deref().map_or(true, |n| contains_ignore_case(Some(&r.name), n)))
        .filter(|r| query.merchant_store.is_none() || r.merchant_store == query.merchant_store)
        .filter(|r| query.image.as_ref().map_or(true, |image| &r.image == image))
        .filter(|r| query.date.is_none() || r.date == query.date)
        .filter(|r| query.purchase_category.is_none() || r.purchase_category == query.purchase_category)
        .filter(|r| query.total_amount.map_or(true, |amount| r.total_amount == amount))
        .filter(|r| query.owner.is_none() || r.owner == query.owner)
        .cloned()
        .collect();
    envelope(StatusCode::OK, "Success", receipts)
}

async fn delete_receipt(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let mut store = state.db.write().await;
    match store.receipts.remove(&id) {
        Some(_) => envelope(StatusCode::OK, "Receipt deleted", json!({"receipt_id": id})),
        None => not_found("receipt", id),
    }
}

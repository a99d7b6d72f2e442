//! Every service operation against a recording transport: verb, path,
//! exact outgoing keys, and the typed envelope that comes back.

mod common;

use chrono::NaiveDate;
use common::{client, ok};
use myfinances::{
    ApiError, ClientQuery, CreateClient, CreateInvoice, CreateReceipt, HttpMethod, InvoiceQuery,
    ReceiptQuery, UpdateClient, UpdateInvoice,
};
use serde_json::json;

fn sample_clients() -> serde_json::Value {
    json!([
        {"id": 1, "name": "Client 1", "company": "Company 1", "phone_number": "1234567890",
         "email": "company1@company1.com", "contact_method": "phone", "is_representative": true,
         "address": "123 Main", "city": "Sample City", "country": "Australia"},
        {"id": 2, "name": "Client 2", "company": "Company 2", "phone_number": "0987654321",
         "email": "company2@company2.com", "contact_method": "email", "is_representative": true,
         "address": "321 Main", "city": "Sample City", "country": "South America"},
    ])
}

fn sample_invoices() -> serde_json::Value {
    json!([
        {"id": 1, "customer_id": 123, "amount": 300.0, "description": "Analytics Consultant", "status": "pending"},
        {"id": 2, "customer_id": 124, "amount": 150.0, "description": "Service fee", "status": "paid"},
    ])
}

fn sample_receipts() -> serde_json::Value {
    json!([
        {"id": 1, "name": "Client 1", "image": "file_example", "date": "2024-05-21",
         "merchant_store": "Store 1", "purchase_category": "Purchase 1", "total_amount": 100, "owner": "Owner 1"},
        {"id": 2, "name": "Client 2", "image": "file1_example", "date": "2024-03-21",
         "merchant_store": "Store 2", "purchase_category": "Purchase 2", "total_amount": 245, "owner": "Owner 2"},
    ])
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

#[test]
fn create_client_sends_every_given_field() {
    let c = client();
    c.transport().reply(ok(json!({"client_id": 123})));

    let input = CreateClient {
        name: "John Doe".to_string(),
        phone_number: Some("1234567890".to_string()),
        email: Some("john.doe@example.com".to_string()),
        company: Some("Example Inc".to_string()),
        contact_method: Some("email".to_string()),
        is_representative: Some(true),
        address: Some("123 Main St".to_string()),
        city: Some("Sample City".to_string()),
        country: Some("Sample Country".to_string()),
    };
    let response = c.clients().create(&input).unwrap();

    let call = c.transport().only_call();
    assert_eq!(call.method, HttpMethod::Post);
    assert_eq!(call.path, "/clients/create/");
    assert_eq!(
        call.params,
        json!({
            "name": "John Doe",
            "phone_number": "1234567890",
            "email": "john.doe@example.com",
            "company": "Example Inc",
            "contact_method": "email",
            "is_representative": true,
            "address": "123 Main St",
            "city": "Sample City",
            "country": "Sample Country",
        })
    );
    assert_eq!(response.data.client_id, 123);
    assert!(response.meta.success);
    assert_eq!(response.meta.status_code, 200);
    assert_eq!(response.meta.message.as_deref(), Some("Success"));
}

#[test]
fn create_client_with_name_only_sends_only_name() {
    let c = client();
    c.transport().reply(ok(json!({"client_id": 7})));

    c.clients()
        .create(&CreateClient { name: "nerd".to_string(), ..Default::default() })
        .unwrap();

    assert_eq!(c.transport().only_call().params, json!({"name": "nerd"}));
}

#[test]
fn create_client_sends_explicit_false_flag() {
    let c = client();
    c.transport().reply(ok(json!({"client_id": 8})));

    let input = CreateClient {
        name: "nerd".to_string(),
        is_representative: Some(false),
        ..Default::default()
    };
    c.clients().create(&input).unwrap();

    assert_eq!(
        c.transport().only_call().params,
        json!({"name": "nerd", "is_representative": false})
    );
}

#[test]
fn create_client_without_name_never_reaches_transport() {
    let c = client();
    let err = c.clients().create(&CreateClient::default()).unwrap_err();
    assert!(matches!(err, ApiError::MissingParameter("name")));
    assert!(err.is_usage());
    assert!(c.transport().calls().is_empty());
}

#[test]
fn list_clients_without_filters_sends_no_params() {
    let c = client();
    c.transport().reply(ok(sample_clients()));

    let response = c.clients().list(&ClientQuery::default()).unwrap();

    let call = c.transport().only_call();
    assert_eq!(call.method, HttpMethod::Get);
    assert_eq!(call.path, "/clients/");
    assert_eq!(call.params, json!({}));
    assert_eq!(response.data.len(), 2);
    assert_eq!(response.data[0].id, 1);
    assert_eq!(response.data[1].country.as_deref(), Some("South America"));
}

#[test]
fn list_clients_sends_only_given_filters() {
    let c = client();
    c.transport().reply(ok(json!([])));

    let query = ClientQuery { search: Some("acme".to_string()), ..Default::default() };
    let response = c.clients().list(&query).unwrap();

    assert_eq!(c.transport().only_call().params, json!({"search": "acme"}));
    assert!(response.data.is_empty());
}

#[test]
fn get_client_by_id() {
    let c = client();
    c.transport().reply(ok(sample_clients()[0].clone()));

    let response = c.clients().get(1).unwrap();

    let call = c.transport().only_call();
    assert_eq!(call.method, HttpMethod::Get);
    assert_eq!(call.path, "/clients/1");
    assert_eq!(response.data.name, "Client 1");
    assert_eq!(response.data.company.as_deref(), Some("Company 1"));
    assert!(response.data.is_representative);
}

#[test]
fn partial_client_update_sends_only_name() {
    let c = client();
    let mut updated = sample_clients()[0].clone();
    updated["name"] = json!("Client 3");
    c.transport().reply(ok(updated.clone()));
    c.transport().reply(ok(updated));

    let input = UpdateClient { name: Some("Client 3".to_string()), ..Default::default() };
    let response = c.clients().update(&input).unwrap();
    assert_eq!(response.data.name, "Client 3");

    let refetched = c.clients().get(1).unwrap();
    assert_eq!(refetched.data.name, "Client 3");

    let calls = c.transport().calls();
    assert_eq!(calls[0].method, HttpMethod::Patch);
    assert_eq!(calls[0].path, "/clients/update/");
    assert_eq!(calls[0].params, json!({"name": "Client 3"}));
    assert_eq!(calls[1].path, "/clients/1");
}

#[test]
fn client_update_can_clear_representative_flag_explicitly() {
    let c = client();
    c.transport().reply(ok(sample_clients()[0].clone()));

    let input = UpdateClient { id: Some(1), is_representative: Some(false), ..Default::default() };
    c.clients().update(&input).unwrap();

    assert_eq!(c.transport().only_call().params, json!({"id": 1, "is_representative": false}));
}

#[test]
fn delete_client() {
    let c = client();
    c.transport().reply(ok(json!({"client_id": 1})));

    let response = c.clients().delete(1).unwrap();

    let call = c.transport().only_call();
    assert_eq!(call.method, HttpMethod::Delete);
    assert_eq!(call.path, "/clients/1/delete");
    assert_eq!(response.data["client_id"], 1);
}

// ---------------------------------------------------------------------------
// Invoices
// ---------------------------------------------------------------------------

#[test]
fn create_invoice() {
    let c = client();
    c.transport().reply(json!({
        "meta": {"success": true, "status_code": 200, "message": "Successfully created"},
        "data": {"invoice_id": 102},
    }));

    let input = CreateInvoice {
        customer_id: Some(123),
        amount: Some(100.0),
        description: Some("Data Analytics service".to_string()),
        due_date: NaiveDate::from_ymd_opt(2020, 5, 21),
    };
    let response = c.invoices().create(&input).unwrap();

    let call = c.transport().only_call();
    assert_eq!(call.method, HttpMethod::Post);
    assert_eq!(call.path, "/invoices/create");
    assert_eq!(
        call.params,
        json!({
            "customer_id": 123,
            "amount": 100.0,
            "description": "Data Analytics service",
            "due_date": "2020-05-21",
        })
    );
    assert_eq!(response.data.invoice_id, 102);
    assert_eq!(response.meta.message.as_deref(), Some("Successfully created"));
}

#[test]
fn create_invoice_omits_unset_optionals() {
    let c = client();
    c.transport().reply(ok(json!({"invoice_id": 5})));

    c.invoices()
        .create(&CreateInvoice { customer_id: Some(9), amount: Some(42.5), ..Default::default() })
        .unwrap();

    assert_eq!(c.transport().only_call().params, json!({"customer_id": 9, "amount": 42.5}));
}

#[test]
fn create_invoice_with_unrepresentable_amount_is_a_usage_error() {
    let c = client();
    let input = CreateInvoice { customer_id: Some(9), amount: Some(f64::NAN), ..Default::default() };
    let err = c.invoices().create(&input).unwrap_err();
    assert!(matches!(err, ApiError::MissingParameter("amount")));
    assert!(c.transport().calls().is_empty());
}

#[test]
fn create_invoice_without_customer_never_reaches_transport() {
    let c = client();
    let input = CreateInvoice { amount: Some(5.0), ..Default::default() };
    let err = c.invoices().create(&input).unwrap_err();
    assert!(matches!(err, ApiError::MissingParameter("customer_id")));
    assert!(err.is_usage());
    assert!(c.transport().calls().is_empty());
}

#[test]
fn create_invoice_without_amount_never_reaches_transport() {
    let c = client();
    let input = CreateInvoice { customer_id: Some(124), ..Default::default() };
    let err = c.invoices().create(&input).unwrap_err();
    assert!(matches!(err, ApiError::MissingParameter("amount")));
    assert!(c.transport().calls().is_empty());
}

#[test]
fn empty_invoice_input_is_a_usage_error() {
    let c = client();
    let err = c.invoices().create(&CreateInvoice::default()).unwrap_err();
    assert!(err.is_usage());
    assert!(c.transport().calls().is_empty());
}

#[test]
fn list_invoices() {
    let c = client();
    c.transport().reply(ok(sample_invoices()));

    let response = c.invoices().list().unwrap();

    let call = c.transport().only_call();
    assert_eq!(call.method, HttpMethod::Get);
    assert_eq!(call.path, "/invoices/");
    assert_eq!(call.params, json!({}));
    assert_eq!(response.data.len(), 2);
    assert_eq!(response.data[1].amount, 150.0);
    assert_eq!(response.data[0].status.as_deref(), Some("pending"));
}

#[test]
fn get_invoice_uses_trailing_slash() {
    let c = client();
    c.transport().reply(ok(sample_invoices()[1].clone()));

    let response = c.invoices().get(2).unwrap();

    assert_eq!(c.transport().only_call().path, "/invoices/2/");
    assert_eq!(response.data.id, 2);
    assert_eq!(response.data.customer_id, 124);
}

#[test]
fn delete_invoice() {
    let c = client();
    c.transport().reply(json!({
        "meta": {"success": true, "status_code": 200, "message": "Successfully deleted invoice"},
        "data": null,
    }));

    let response = c.invoices().delete(1).unwrap();

    let call = c.transport().only_call();
    assert_eq!(call.method, HttpMethod::Delete);
    assert_eq!(call.path, "/invoices/1/delete");
    assert!(response.data.is_null());
}

#[test]
fn search_invoices_by_customer() {
    let c = client();
    c.transport().reply(ok(json!([sample_invoices()[1].clone()])));

    let query = InvoiceQuery { customer_id: Some(124), ..Default::default() };
    let response = c.invoices().search(&query).unwrap();

    let call = c.transport().only_call();
    assert_eq!(call.method, HttpMethod::Get);
    assert_eq!(call.path, "/invoices/search");
    assert_eq!(call.params, json!({"customer_id": 124}));
    assert!(response.data.iter().any(|invoice| invoice.customer_id == 124));
}

#[test]
fn update_invoice_status_only() {
    let c = client();
    c.transport().reply(ok(json!({
        "id": 1, "customer_id": 125, "amount": 100, "description": "Service fees",
        "due_date": "2024-12-31", "status": "paid",
    })));

    let input = UpdateInvoice { status: Some("paid".to_string()), ..Default::default() };
    let response = c.invoices().update(1, &input).unwrap();

    let call = c.transport().only_call();
    assert_eq!(call.method, HttpMethod::Patch);
    assert_eq!(call.path, "/invoices/1/update");
    assert_eq!(call.params, json!({"status": "paid"}));
    assert_eq!(response.data.status.as_deref(), Some("paid"));
    assert_eq!(response.data.due_date, NaiveDate::from_ymd_opt(2024, 12, 31));
}

// ---------------------------------------------------------------------------
// Receipts
// ---------------------------------------------------------------------------

#[test]
fn create_receipt() {
    let c = client();
    c.transport().reply(ok(json!({"receipt_id": 3})));

    let input = CreateReceipt {
        name: "Client 1".to_string(),
        image: Some("file_example".to_string()),
        date: NaiveDate::from_ymd_opt(2024, 5, 21),
        merchant_store: Some("Store 1".to_string()),
        purchase_category: Some("Purchase 1".to_string()),
        total_amount: Some(500.0),
        owner: Some("Client 2".to_string()),
    };
    let response = c.receipts().create(&input).unwrap();

    let call = c.transport().only_call();
    assert_eq!(call.method, HttpMethod::Post);
    assert_eq!(call.path, "/receipts/create/");
    assert_eq!(
        call.params,
        json!({
            "name": "Client 1",
            "image": "file_example",
            "date": "2024-05-21",
            "merchant_store": "Store 1",
            "purchase_category": "Purchase 1",
            "total_amount": 500.0,
            "owner": "Client 2",
        })
    );
    assert_eq!(response.data.receipt_id, 3);
}

#[test]
fn create_receipt_with_blank_name_is_rejected() {
    let c = client();
    let input = CreateReceipt { name: " ".to_string(), total_amount: Some(1.0), ..Default::default() };
    let err = c.receipts().create(&input).unwrap_err();
    assert!(matches!(err, ApiError::MissingParameter("name")));
    assert!(c.transport().calls().is_empty());
}

#[test]
fn list_receipts() {
    let c = client();
    c.transport().reply(ok(sample_receipts()));

    let response = c.receipts().list().unwrap();

    let call = c.transport().only_call();
    assert_eq!(call.path, "/receipts/");
    assert_eq!(call.params, json!({}));
    assert_eq!(response.data.len(), 2);
    assert_eq!(response.data[1].total_amount, 245.0);
}

#[test]
fn search_receipts_by_name() {
    let c = client();
    c.transport().reply(ok(json!([sample_receipts()[1].clone()])));

    let query = ReceiptQuery { name: Some("Client 2".to_string()), ..Default::default() };
    let response = c.receipts().search(&query).unwrap();

    let call = c.transport().only_call();
    assert_eq!(call.method, HttpMethod::Get);
    assert_eq!(call.path, "/receipts/search/");
    assert_eq!(call.params, json!({"name": "Client 2"}));
    assert_eq!(response.data[0].name, "Client 2");
}

#[test]
fn delete_receipt_then_list_excludes_it() {
    let c = client();
    c.transport().reply(ok(json!({"receipt_id": 2})));
    c.transport().reply(ok(json!([sample_receipts()[0].clone()])));

    c.receipts().delete(2).unwrap();
    let remaining = c.receipts().list().unwrap();

    let calls = c.transport().calls();
    assert_eq!(calls[0].method, HttpMethod::Delete);
    assert_eq!(calls[0].path, "/receipts/2/delete");
    assert_eq!(calls[1].path, "/receipts/");
    assert!(remaining.data.iter().all(|receipt| receipt.id != 2));
}

// ---------------------------------------------------------------------------
// Cross-cutting
// ---------------------------------------------------------------------------

#[test]
fn unsuccessful_meta_is_returned_not_raised() {
    let c = client();
    c.transport().reply(json!({
        "meta": {"success": false, "status_code": 400, "message": "client id is required"},
        "data": null,
    }));

    let response = c.clients().delete(99).unwrap();

    assert!(!response.meta.success);
    assert_eq!(response.meta.status_code, 400);
    assert_eq!(response.meta.message.as_deref(), Some("client id is required"));
}

#[test]
fn transport_errors_propagate_unchanged() {
    let c = client();
    c.transport().fail(ApiError::HttpError { status: 503, body: "maintenance".to_string() });

    let err = c.invoices().list().unwrap_err();

    assert!(matches!(err, ApiError::HttpError { status: 503, ref body } if body == "maintenance"));
    assert_eq!(c.transport().calls().len(), 1);
}

#[test]
fn mismatched_payload_is_a_validation_error() {
    let c = client();
    c.transport().reply(ok(json!({"id": 1, "name": "not a list"})));

    let err = c.clients().list(&ClientQuery::default()).unwrap_err();

    assert!(err.is_validation());
}

#[test]
fn missing_meta_is_a_validation_error() {
    let c = client();
    c.transport().reply(json!({"data": {"client_id": 1}}));

    let err = c.clients().create(&CreateClient { name: "x".to_string(), ..Default::default() }).unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
}

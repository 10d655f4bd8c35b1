//! Invoice form endpoint tests for invoicing-service.

mod common;

use axum::http::{header, StatusCode};
use common::{body_json, location, test_invoice, test_user, TestApp, DELBA_ID, LEE_ID};
use invoicing_service::services::MockStore;
use serde_json::json;

#[tokio::test]
async fn create_requires_a_session() {
    let app = TestApp::spawn();

    let response = app
        .post_form("/dashboard/invoices", "customerId=c1&amount=10&status=paid", None)
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
    assert_eq!(app.store.invoice_count(), 0);
}

#[tokio::test]
async fn create_redirects_to_listing_and_revalidates_it() {
    let app = TestApp::spawn();
    let cookie = app.login().await;

    let response = app
        .post_form(
            "/dashboard/invoices",
            &format!("customerId={}&amount=49.99&status=pending", DELBA_ID),
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/dashboard/invoices"));
    assert_eq!(
        response.headers().get("x-revalidate-path").unwrap(),
        "/dashboard/invoices"
    );
    assert_eq!(response.headers().get(header::CACHE_CONTROL).unwrap(), "no-store");

    let invoices = app.store.invoices.lock().unwrap();
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices.values().next().unwrap().amount, 4999);
}

#[tokio::test]
async fn create_with_missing_fields_returns_field_errors() {
    let app = TestApp::spawn();
    let cookie = app.login().await;

    let response = app
        .post_form("/dashboard/invoices", "amount=0", Some(&cookie))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "errors": {
                "amount": ["Please enter an amount greater than $0."],
                "customerId": ["Please select a customer."],
                "status": ["Please select an invoice status."]
            },
            "message": "Missing Fields. Failed to Create Invoice."
        })
    );
    assert_eq!(app.store.invoice_count(), 0);
}

#[tokio::test]
async fn create_store_failure_returns_generic_message() {
    let app = TestApp::with_store(MockStore::new().with_user(test_user()));
    let cookie = app.login().await;
    app.store.fail_writes(true);

    let response = app
        .post_form(
            "/dashboard/invoices",
            &format!("customerId={}&amount=10&status=paid", DELBA_ID),
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "message": "Database Error: Failed to Create Invoice" }));
}

#[tokio::test]
async fn create_with_malformed_customer_reference_returns_generic_message() {
    let app = TestApp::spawn();
    let cookie = app.login().await;

    let response = app
        .post_form(
            "/dashboard/invoices",
            "customerId=c1&amount=10&status=paid",
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "message": "Database Error: Failed to Create Invoice" }));
    assert_eq!(app.store.invoice_count(), 0);
}

#[tokio::test]
async fn update_overwrites_the_invoice() {
    let invoice = test_invoice();
    let app = TestApp::with_store(
        MockStore::new()
            .with_user(test_user())
            .with_invoice(invoice.clone()),
    );
    let cookie = app.login().await;

    let response = app
        .post_form(
            &format!("/dashboard/invoices/{}", invoice.id),
            &format!("customerId={}&amount=12.5&status=paid", LEE_ID),
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/dashboard/invoices"));

    let stored = app.store.invoices.lock().unwrap()[&invoice.id].clone();
    assert_eq!(stored.customer_id, LEE_ID);
    assert_eq!(stored.amount, 1250);
    assert_eq!(stored.status, "paid");
    assert_eq!(stored.date, invoice.date);
}

#[tokio::test]
async fn update_with_bad_status_returns_update_message() {
    let invoice = test_invoice();
    let app = TestApp::with_store(
        MockStore::new()
            .with_user(test_user())
            .with_invoice(invoice.clone()),
    );
    let cookie = app.login().await;

    let response = app
        .post_form(
            &format!("/dashboard/invoices/{}", invoice.id),
            &format!("customerId={}&amount=12.5&status=overdue", LEE_ID),
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Missing Fields. Failed to Update Invoice.");
    assert_eq!(body["errors"]["status"][0], "Please select an invoice status.");
}

#[tokio::test]
async fn delete_removes_the_invoice() {
    let invoice = test_invoice();
    let app = TestApp::with_store(
        MockStore::new()
            .with_user(test_user())
            .with_invoice(invoice.clone()),
    );
    let cookie = app.login().await;

    let response = app
        .post_form(
            &format!("/dashboard/invoices/{}/delete", invoice.id),
            "",
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/dashboard/invoices"));
    assert_eq!(
        response.headers().get("x-flash-message").unwrap(),
        "Deleted Invoice."
    );
    assert_eq!(app.store.invoice_count(), 0);
}

#[tokio::test]
async fn delete_of_unknown_invoice_still_navigates() {
    let app = TestApp::spawn();
    let cookie = app.login().await;

    let response = app
        .post_form(
            "/dashboard/invoices/6f9619ff-8b86-d011-b42d-00cf4fc964ff/delete",
            "",
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/dashboard/invoices"));
}

#[tokio::test]
async fn delete_store_failure_returns_generic_message() {
    let invoice = test_invoice();
    let app = TestApp::with_store(
        MockStore::new()
            .with_user(test_user())
            .with_invoice(invoice.clone()),
    );
    let cookie = app.login().await;
    app.store.fail_writes(true);

    let response = app
        .post_form(
            &format!("/dashboard/invoices/{}/delete", invoice.id),
            "",
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Database Error: Failed to Delete Invoice.");
    assert_eq!(app.store.invoice_count(), 1);
}

use chrono::{Duration, SecondsFormat, Utc};
use serde_json::{json, Value};

mod common;
use common::TestApp;

fn days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn payload(amount: f64, category: &str, days: i64) -> Value {
    json!({
        "amount": amount,
        "description": format!("{category} purchase"),
        "date": days_ago(days),
        "category": category,
    })
}

async fn create(app: &TestApp, token: &str, body: Value) -> Value {
    let response = app.post("/transactions", &body, Some(token)).await;
    assert_eq!(response.status(), 201, "create failed: {:?}", response.json());
    response.json()
}

#[actix_rt::test]
async fn test_create_derives_type_and_source() {
    let app = TestApp::new();
    let (user_id, token) = app.new_user();

    let body = create(&app, &token, payload(-42.5, "Food & Dining", 1)).await;

    assert_eq!(body["type"], "expense");
    assert_eq!(body["source"], "manual");
    assert_eq!(body["amount"], -42.5);
    assert_eq!(body["category"], "Food & Dining");
    assert_eq!(body["userId"], user_id.to_string());
    assert_eq!(body["isTaxDeductible"], false);
}

#[actix_rt::test]
async fn test_client_cannot_set_source() {
    let app = TestApp::new();
    let (_, token) = app.new_user();

    let mut body = payload(1200.0, "Salary", 2);
    body["source"] = json!("bank_sync");
    let created = create(&app, &token, body).await;

    assert_eq!(created["source"], "manual");
    assert_eq!(created["type"], "income");
}

#[actix_rt::test]
async fn test_create_zero_amount_rejected() {
    let app = TestApp::new();
    let (_, token) = app.new_user();

    let response = app
        .post("/transactions", &payload(0.0, "Shopping", 1), Some(&token))
        .await;

    assert_eq!(response.status(), 400);
    let body = response.json();
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().starts_with("amount:"));
}

#[actix_rt::test]
async fn test_create_future_date_rejected() {
    let app = TestApp::new();
    let (_, token) = app.new_user();

    let response = app
        .post("/transactions", &payload(-10.0, "Shopping", -3), Some(&token))
        .await;

    assert_eq!(response.status(), 400);
    assert!(response.json()["message"]
        .as_str()
        .unwrap()
        .starts_with("date:"));
}

#[actix_rt::test]
async fn test_malformed_body_is_validation_error() {
    let app = TestApp::new();
    let (_, token) = app.new_user();

    let body = json!({ "amount": "lots", "description": "x", "date": days_ago(1) });
    let response = app.post("/transactions", &body, Some(&token)).await;

    assert_eq!(response.status(), 400);
    assert_eq!(response.json()["error"], "VALIDATION_ERROR");
}

#[actix_rt::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app.get("/transactions", None).await;

    assert_eq!(response.status(), 401);
    assert_eq!(response.json()["error"], "UNAUTHORIZED");
}

#[actix_rt::test]
async fn test_list_filters_by_category_and_isolates_owners() {
    let app = TestApp::new();
    let (_, alice) = app.new_user();
    let (_, bob) = app.new_user();

    create(&app, &alice, payload(-12.0, "Food & Dining", 1)).await;
    create(&app, &alice, payload(-30.0, "Travel", 2)).await;
    create(&app, &bob, payload(-99.0, "Food & Dining", 1)).await;

    let response = app
        .get("/transactions?category=Food%20%26%20Dining", Some(&alice))
        .await;
    assert_eq!(response.status(), 200);

    let body = response.json();
    let transactions = body["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0]["amount"], -12.0);
    assert_eq!(body["pagination"]["totalTransactions"], 1);
}

#[actix_rt::test]
async fn test_list_pagination_metadata() {
    let app = TestApp::new();
    let (_, token) = app.new_user();
    for day in 1..=5 {
        create(&app, &token, payload(-(day as f64), "Shopping", day)).await;
    }

    let response = app
        .get("/transactions?page=2&limit=2&sortBy=amount&sortOrder=ASC", Some(&token))
        .await;
    assert_eq!(response.status(), 200);

    let body = response.json();
    let amounts: Vec<f64> = body["transactions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["amount"].as_f64().unwrap())
        .collect();
    assert_eq!(amounts, vec![-3.0, -2.0]);

    let pagination = &body["pagination"];
    assert_eq!(pagination["currentPage"], 2);
    assert_eq!(pagination["totalPages"], 3);
    assert_eq!(pagination["totalTransactions"], 5);
    assert_eq!(pagination["hasNextPage"], true);
    assert_eq!(pagination["hasPrevPage"], true);
    assert_eq!(pagination["limit"], 2);
}

#[actix_rt::test]
async fn test_list_empty_result() {
    let app = TestApp::new();
    let (_, token) = app.new_user();

    let response = app.get("/transactions?page=3", Some(&token)).await;
    assert_eq!(response.status(), 200);

    let body = response.json();
    assert!(body["transactions"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["totalPages"], 0);
    assert_eq!(body["pagination"]["hasNextPage"], false);
    assert_eq!(body["pagination"]["hasPrevPage"], false);
}

#[actix_rt::test]
async fn test_list_rejects_unknown_sort_field() {
    let app = TestApp::new();
    let (_, token) = app.new_user();

    let response = app
        .get("/transactions?sortBy=password_hash", Some(&token))
        .await;

    assert_eq!(response.status(), 400);
    assert!(response.json()["message"]
        .as_str()
        .unwrap()
        .starts_with("sortBy:"));
}

#[actix_rt::test]
async fn test_list_amount_bounds_and_search() {
    let app = TestApp::new();
    let (_, token) = app.new_user();
    create(&app, &token, payload(-5.0, "Groceries", 1)).await;
    create(&app, &token, payload(-50.0, "Groceries", 1)).await;
    create(&app, &token, payload(-500.0, "Rent", 1)).await;

    let response = app
        .get("/transactions?minAmount=-60&maxAmount=-5", Some(&token))
        .await;
    assert_eq!(response.json()["pagination"]["totalTransactions"], 2);

    let response = app.get("/transactions?search=RENT", Some(&token)).await;
    let body = response.json();
    assert_eq!(body["pagination"]["totalTransactions"], 1);
    assert_eq!(body["transactions"][0]["category"], "Rent");
}

#[actix_rt::test]
async fn test_get_update_delete_lifecycle() {
    let app = TestApp::new();
    let (_, token) = app.new_user();
    let created = create(&app, &token, payload(-20.0, "Entertainment", 1)).await;
    let path = format!("/transactions/{}", created["id"].as_str().unwrap());

    let fetched = app.get(&path, Some(&token)).await;
    assert_eq!(fetched.status(), 200);
    assert_eq!(fetched.json()["description"], "Entertainment purchase");

    let updated = app
        .put(&path, &json!({ "amount": 20.0, "notes": "refund" }), Some(&token))
        .await;
    assert_eq!(updated.status(), 200);
    let body = updated.json();
    assert_eq!(body["type"], "income");
    assert_eq!(body["notes"], "refund");
    assert_eq!(body["category"], "Entertainment");

    let deleted = app.delete(&path, Some(&token)).await;
    assert_eq!(deleted.status(), 200);
    assert_eq!(deleted.json()["id"], created["id"]);

    assert_eq!(app.get(&path, Some(&token)).await.status(), 404);
}

#[actix_rt::test]
async fn test_foreign_and_malformed_ids_are_not_found() {
    let app = TestApp::new();
    let (_, owner) = app.new_user();
    let (_, intruder) = app.new_user();
    let created = create(&app, &owner, payload(-20.0, "Shopping", 1)).await;
    let path = format!("/transactions/{}", created["id"].as_str().unwrap());

    assert_eq!(app.get(&path, Some(&intruder)).await.status(), 404);
    assert_eq!(
        app.put(&path, &json!({ "amount": -1.0 }), Some(&intruder))
            .await
            .status(),
        404
    );
    assert_eq!(app.delete(&path, Some(&intruder)).await.status(), 404);
    assert_eq!(
        app.get("/transactions/not-a-uuid", Some(&owner))
            .await
            .status(),
        404
    );

    // Untouched for the owner
    let fetched = app.get(&path, Some(&owner)).await.json();
    assert_eq!(fetched["amount"], -20.0);
}

#[actix_rt::test]
async fn test_analytics_summary() {
    let app = TestApp::new();
    let (_, token) = app.new_user();
    create(&app, &token, payload(100.0, "Salary", 1)).await;
    create(&app, &token, payload(-40.0, "Food & Dining", 1)).await;
    create(&app, &token, payload(-10.0, "Food & Dining", 1)).await;
    create(&app, &token, payload(-70.0, "Travel", 30)).await;

    let uri = format!(
        "/transactions/analytics/summary?startDate={}&endDate={}",
        (Utc::now() - Duration::days(7)).format("%Y-%m-%d"),
        (Utc::now() + Duration::days(1)).format("%Y-%m-%d"),
    );
    let response = app.get(&uri, Some(&token)).await;
    assert_eq!(response.status(), 200);

    let body = response.json();
    assert_eq!(body["summary"]["totalIncome"], 100.0);
    assert_eq!(body["summary"]["totalExpenses"], 50.0);
    assert_eq!(body["summary"]["netIncome"], 50.0);
    assert_eq!(body["summary"]["transactionCount"], 3);

    let breakdown = body["categoryBreakdown"].as_array().unwrap();
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown[0]["category"], "Food & Dining");
    assert_eq!(breakdown[0]["totalAmount"], 50.0);
    assert_eq!(breakdown[0]["count"], 2);
}

#[actix_rt::test]
async fn test_analytics_summary_rejects_bad_date() {
    let app = TestApp::new();
    let (_, token) = app.new_user();

    let response = app
        .get("/transactions/analytics/summary?startDate=soon", Some(&token))
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(response.json()["error"], "VALIDATION_ERROR");
}

#[actix_rt::test]
async fn test_update_with_null_clears_tax_category() {
    let app = TestApp::new();
    let (_, token) = app.new_user();
    let mut body = payload(-80.0, "Healthcare", 1);
    body["isTaxDeductible"] = json!(true);
    body["taxCategory"] = json!("medical");
    let created = create(&app, &token, body).await;
    assert_eq!(created["taxCategory"], "medical");
    let path = format!("/transactions/{}", created["id"].as_str().unwrap());

    let response = app
        .put(&path, &json!({ "taxCategory": null }), Some(&token))
        .await;
    assert_eq!(response.status(), 200);
    let body = response.json();
    assert!(body["taxCategory"].is_null());
    assert_eq!(body["isTaxDeductible"], true);

    // Omitting the field leaves the stored value alone
    let response = app
        .put(&path, &json!({ "taxCategory": "charitable" }), Some(&token))
        .await;
    assert_eq!(response.json()["taxCategory"], "charitable");
    let response = app.put(&path, &json!({ "notes": "receipt" }), Some(&token)).await;
    assert_eq!(response.json()["taxCategory"], "charitable");
}

#[actix_rt::test]
async fn test_amount_outside_column_range_rejected() {
    let app = TestApp::new();
    let (_, token) = app.new_user();

    for amount in [0.00001, 1e16, -1e16, 5e28] {
        let response = app
            .post("/transactions", &payload(amount, "Shopping", 1), Some(&token))
            .await;
        assert_eq!(response.status(), 400, "amount {amount} was accepted");
        let body = response.json();
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert!(body["message"].as_str().unwrap().starts_with("amount:"));
    }

    let created = create(&app, &token, payload(-12.3456, "Shopping", 1)).await;
    let path = format!("/transactions/{}", created["id"].as_str().unwrap());
    let response = app.put(&path, &json!({ "amount": 1e15 }), Some(&token)).await;
    assert_eq!(response.status(), 400);

    let listed = app.get("/transactions", Some(&token)).await.json();
    assert_eq!(listed["pagination"]["totalTransactions"], 1);
}

#[actix_rt::test]
async fn test_analytics_summary_inverted_range_is_empty() {
    let app = TestApp::new();
    let (_, token) = app.new_user();
    create(&app, &token, payload(300.0, "Salary", 1)).await;
    create(&app, &token, payload(-45.0, "Groceries", 2)).await;

    let response = app
        .get(
            "/transactions/analytics/summary?startDate=2024-05-10&endDate=2024-05-01",
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), 200);

    let body = response.json();
    assert_eq!(body["summary"]["totalIncome"], 0.0);
    assert_eq!(body["summary"]["totalExpenses"], 0.0);
    assert_eq!(body["summary"]["netIncome"], 0.0);
    assert_eq!(body["summary"]["transactionCount"], 0);
    assert!(body["categoryBreakdown"].as_array().unwrap().is_empty());
    assert!(body["monthlyTrends"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_analytics_summary_single_instant_without_records() {
    let app = TestApp::new();
    let (_, token) = app.new_user();
    create(&app, &token, payload(-45.0, "Groceries", 2)).await;

    let instant = days_ago(10);
    let uri = format!(
        "/transactions/analytics/summary?startDate={instant}&endDate={instant}"
    );
    let response = app.get(&uri, Some(&token)).await;
    assert_eq!(response.status(), 200);

    let body = response.json();
    assert_eq!(body["summary"]["transactionCount"], 0);
    assert_eq!(body["summary"]["totalExpenses"], 0.0);
    assert!(body["categoryBreakdown"].as_array().unwrap().is_empty());
}

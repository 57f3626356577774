use std::sync::Arc;

use actix_web::{test, web, App};
use chrono::Utc;
use once_cell::sync::Lazy;
use secrecy::Secret;
use serde_json::Value;
use uuid::Uuid;

use fintrack_api::auth::{create_access_token, SubscriptionTier, User};
use fintrack_api::errors::{json_error_handler, query_error_handler};
use fintrack_api::transaction::{self, MemoryTransactionStore, TransactionStore};

static JWT_SECRET: Lazy<Secret<String>> =
    Lazy::new(|| Secret::new("test_jwt_secret_for_integration_tests".to_string()));

/// In-process application over the memory store; no database required.
pub struct TestApp {
    store: Arc<dyn TransactionStore>,
}

pub struct TestResponse {
    status: u16,
    body: bytes::Bytes,
}

impl TestResponse {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }
}

impl TestApp {
    pub fn new() -> Self {
        TestApp {
            store: Arc::new(MemoryTransactionStore::new()),
        }
    }

    /// Mint an access token for a fresh user and return it with the user's id
    pub fn new_user(&self) -> (Uuid, String) {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: format!("{}@test.com", Uuid::new_v4()),
            password_hash: String::new(),
            full_name: None,
            subscription_tier: SubscriptionTier::Free,
            created_at: now,
            updated_at: now,
        };
        let token = create_access_token(&user, &JWT_SECRET).expect("Failed to mint token");
        (user.id, token)
    }

    async fn send(&self, req: test::TestRequest, token: Option<&str>) -> TestResponse {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(JWT_SECRET.clone()))
                .app_data(web::Data::from(self.store.clone()))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .configure(transaction::configure),
        )
        .await;

        let req = match token {
            Some(token) => req.insert_header(("Authorization", format!("Bearer {token}"))),
            None => req,
        };
        let resp = test::call_service(&app, req.to_request()).await;

        let status = resp.status().as_u16();
        let body = test::read_body(resp).await;

        TestResponse { status, body }
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        self.send(test::TestRequest::get().uri(path), token).await
    }

    pub async fn post(&self, path: &str, payload: &Value, token: Option<&str>) -> TestResponse {
        self.send(test::TestRequest::post().uri(path).set_json(payload), token)
            .await
    }

    pub async fn put(&self, path: &str, payload: &Value, token: Option<&str>) -> TestResponse {
        self.send(test::TestRequest::put().uri(path).set_json(payload), token)
            .await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> TestResponse {
        self.send(test::TestRequest::delete().uri(path), token).await
    }
}

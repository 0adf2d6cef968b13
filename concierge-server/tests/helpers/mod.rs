//! Test harness: real router, in-memory database, oneshot requests
//!
//! Drives the axum `Router` directly as a tower `Service` — no network
//! stack — against a single-connection in-memory SQLite pool with the
//! embedded migrations applied.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use concierge_server::{AppState, api, create_token};
use shared::models::Role;

pub const JWT_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub async fn spawn_app() -> TestApp {
    let state = AppState::in_memory(JWT_SECRET)
        .await
        .expect("in-memory state");
    let router = api::create_router(state.clone());
    TestApp { router, state }
}

impl TestApp {
    pub fn token(&self, user_id: &str, role: Role, project_id: Option<i64>) -> String {
        create_token(user_id, role, project_id, JWT_SECRET).expect("token")
    }

    /// Fire one request through the router and return (status, json body).
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router oneshot");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, json)
    }

    /// Register a kiosk bound to a device principal, returning its id.
    pub async fn seed_kiosk(&self, project_id: i64, name: &str, device_user_id: &str) -> i64 {
        concierge_server::db::kiosks::create_kiosk(
            &self.state.db.pool,
            project_id,
            name,
            device_user_id,
            shared::util::now_millis(),
        )
        .await
        .expect("seed kiosk")
    }

    /// Record an approved payment, returning its internal id.
    pub async fn seed_payment(&self, transaction_id: &str, amount: i64) -> i64 {
        concierge_server::db::payments::create_approved(
            &self.state.db.pool,
            None,
            transaction_id,
            amount,
            0,
            "credit",
            Some("A000"),
            shared::util::now_millis(),
        )
        .await
        .expect("seed payment")
    }
}

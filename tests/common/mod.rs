// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use account_session::services::AccountApiClient;
use account_session::store::{MemoryStorage, PersistentStore};
use account_session::AccountSession;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Known test account.
#[allow(dead_code)]
pub const EMAIL: &str = "alice@example.com";
#[allow(dead_code)]
pub const PASSWORD: &str = "correct horse";

/// In-memory stand-in for the account API.
#[derive(Default)]
pub struct FakeAccounts {
    accounts: Mutex<HashMap<String, (String, Value)>>,
    requests: Mutex<Vec<(&'static str, Value)>>,
}

impl FakeAccounts {
    /// Endpoint and body of every request received so far.
    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<(&'static str, Value)> {
        self.requests.lock().unwrap().clone()
    }
}

async fn login(State(state): State<Arc<FakeAccounts>>, Json(body): Json<Value>) -> Json<Value> {
    state
        .requests
        .lock()
        .unwrap()
        .push(("/api/users/login", body.clone()));
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let accounts = state.accounts.lock().unwrap();
    match accounts.get(email) {
        Some((stored, user)) if stored == password => {
            Json(json!({"success": true, "user": user}))
        }
        _ => Json(json!({"success": false, "message": "Identifiants invalides"})),
    }
}

async fn register(
    State(state): State<Arc<FakeAccounts>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state
        .requests
        .lock()
        .unwrap()
        .push(("/api/users/register", body.clone()));
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();

    let mut accounts = state.accounts.lock().unwrap();
    if accounts.contains_key(&email) {
        return (
            StatusCode::CONFLICT,
            Json(json!({"success": false, "message": "Email déjà utilisé"})),
        );
    }

    let user = json!({
        "id": accounts.len() + 1,
        "email": email,
        "tokens": 100,
        "subscription": "Free",
        "history": [],
        "createdAt": "2026-10-16T08:00:00Z"
    });
    accounts.insert(email, (password, user.clone()));
    (StatusCode::CREATED, Json(json!({"success": true, "user": user})))
}

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    format!("http://{}", addr)
}

/// Start the fake account API with [`EMAIL`]/[`PASSWORD`] already registered.
#[allow(dead_code)]
pub async fn spawn_accounts_api() -> (String, Arc<FakeAccounts>) {
    let state = Arc::new(FakeAccounts::default());
    state.accounts.lock().unwrap().insert(
        EMAIL.to_string(),
        (
            PASSWORD.to_string(),
            json!({
                "id": "u-1",
                "email": EMAIL,
                "tokens": 100,
                "subscription": "Free",
                "history": [{"date": "2026-10-01", "action": "Inscription"}]
            }),
        ),
    );

    let app = Router::new()
        .route("/api/users/login", post(login))
        .route("/api/users/register", post(register))
        .with_state(state.clone());
    (serve(app).await, state)
}

/// Start an API that answers both endpoints with a fixed status and body.
#[allow(dead_code)]
pub async fn spawn_fixed_api(status: StatusCode, body: &'static str) -> String {
    let respond = move || async move { (status, body) };
    let app = Router::new()
        .route("/api/users/login", post(respond))
        .route("/api/users/register", post(respond));
    serve(app).await
}

/// Base URL where nothing is listening.
#[allow(dead_code)]
pub async fn dead_api() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[allow(dead_code)]
pub fn fixed_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

/// Session against `base_url` backed by `storage`, dated [`fixed_day`].
#[allow(dead_code)]
pub fn session(base_url: &str, storage: &MemoryStorage) -> AccountSession {
    AccountSession::new(
        AccountApiClient::new(base_url).expect("Failed to build API client"),
        PersistentStore::new(storage.clone()),
        "user",
    )
    .with_clock(fixed_day)
}

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use cat_api_rust::{app, auth, store::MemoryStore, AppState};

/// In-process application with a handle on the memory store so tests can
/// inspect persisted state directly (e.g. assert that a rejected request
/// wrote nothing).
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let state = AppState {
        store: store.clone(),
    };
    TestApp {
        router: app(state),
        store,
    }
}

/// Mint a bearer token for the given principal id using the development
/// secret the config falls back to in tests.
pub fn bearer_token(user: &str) -> String {
    auth::generate_jwt(auth::Claims::new(user.to_string())).expect("token generation")
}

/// Drive one request through the router and return status plus parsed JSON
/// body (Null for empty bodies such as 204 responses).
pub async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .context("building request")?;

    let response = router
        .clone()
        .oneshot(request)
        .await
        .context("driving request")?;

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .context("collecting body")?
        .to_bytes();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).context("parsing response body")?
    };

    Ok((status, value))
}

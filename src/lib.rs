use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pipeline;
pub mod store;

/// Shared application state: the record store behind its trait so tests can
/// swap the Postgres backend for the in-memory one.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn store::CatStore>,
}

/// Build the full application router. Lives in the library so integration
/// tests can drive it in-process.
pub fn app(state: AppState) -> Router {
    let protected = Router::new()
        .route("/cats", get(handlers::cat_list).post(handlers::cat_create))
        .route(
            "/cats/:id",
            get(handlers::cat_get)
                .patch(handlers::cat_update)
                .delete(handlers::cat_delete),
        )
        .route_layer(axum::middleware::from_fn(middleware::bearer_auth_middleware));

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Protected resource
        .merge(protected)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Cat API (Rust)",
        "version": version,
        "description": "Bearer-token protected CRUD over owned cat records",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "cats": "GET|POST /cats, GET|PATCH|DELETE /cats/:id (bearer token required)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "store": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "store_error": e.to_string()
            })),
        ),
    }
}

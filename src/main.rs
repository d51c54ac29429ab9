use std::sync::Arc;

use cat_api_rust::{app, config, store::PostgresStore, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Cat API in {:?} mode", config.environment);

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set (see .env)");

    let store = PostgresStore::connect(
        &database_url,
        config.database.max_connections,
        config.database.connection_timeout,
    )
    .await
    .unwrap_or_else(|e| panic!("failed to connect to database: {}", e));

    store
        .ensure_schema()
        .await
        .unwrap_or_else(|e| panic!("failed to prepare schema: {}", e));

    let state = AppState {
        store: Arc::new(store),
    };

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Cat API server listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.expect("server");
}

//! Axum router configuration with middleware.
//!
//! JSON routes live under `/api/`. The front end's page shells (`/`,
//! `/analyzer`) and its assets (`/static/*`) are served from the configured
//! web directory; a missing file is a plain 404.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::extract::State;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/parse", post(handlers::parse::parse));

    let web_dir = state.web_dir.clone();

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .route_service("/", ServeFile::new(web_dir.join("index.html")))
        .route_service("/analyzer", ServeFile::new(web_dir.join("analyzer.html")))
        .nest_service("/static", ServeDir::new(web_dir.join("static")))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - liveness plus the number of stored messages.
async fn health_check(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "messages": state.store.len().await,
    }))
}

pub mod request_id;

use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::controllers::{
    health::{self, ReadinessInfo},
    page::PageController,
    translate::TranslateController,
};
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Largest accepted document upload
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Build the application router with every route and middleware attached
pub fn build_router(
    readiness: Arc<ReadinessInfo>,
    translate_controller: Arc<TranslateController>,
    page_controller: Arc<PageController>,
) -> Router {
    // Health routes
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(readiness);

    // JSON API
    let api_routes = Router::new()
        .route("/api/translate", post(TranslateController::translate))
        .route(
            "/api/translate/document",
            post(TranslateController::translate_document)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(translate_controller);

    // HTML page
    let page_routes = Router::new()
        .route("/", get(PageController::index).post(PageController::submit))
        .route(
            "/document",
            post(PageController::submit_document).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(page_controller);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .merge(health_routes)
        .merge(api_routes)
        .merge(page_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(cors),
        )
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    readiness: Arc<ReadinessInfo>,
    translate_controller: Arc<TranslateController>,
    page_controller: Arc<PageController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(readiness, translate_controller, page_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

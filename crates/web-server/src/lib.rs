use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use core_types::Student;
use database::Repository;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer, AllowOrigin, ExposeHeaders, AllowHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod extract;
pub mod handlers;
pub mod openapi;

/// Request bodies larger than this are rejected before deserialization.
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub students: Arc<dyn Repository<Student>>,
}

impl AppState {
    pub fn new(students: Arc<dyn Repository<Student>>) -> Self {
        Self { students }
    }
}

/// Builds the full application: student routes, health check, Swagger UI,
/// and the CORS / tracing / body-limit middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/student",
            get(handlers::list_students).post(handlers::create_student),
        )
        .route(
            "/api/student/:id",
            get(handlers::get_student)
                .put(handlers::update_student)
                .delete(handlers::delete_student),
        )
        .with_state(Arc::new(state))
        .merge(openapi::swagger_ui())
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}

/// Serves the application on `addr` until Ctrl-C is received.
///
/// Tracing must already be initialised by the caller.
pub async fn run_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}{}", addr, openapi::SWAGGER_UI_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
}

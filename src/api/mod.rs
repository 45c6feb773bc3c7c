//! Web API module for taskd

pub mod extract;
pub mod handlers;
pub mod response;
pub mod state;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use state::AppState;

const ALLOW_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";

/// Create the API router
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route(
            "/health",
            get(handlers::health::health).fallback(handlers::method_not_allowed),
        )
        // Tasks API
        .route(
            "/tasks",
            get(handlers::tasks::list_tasks)
                .post(handlers::tasks::create_task)
                .put(handlers::tasks::update_task_by_body)
                .delete(handlers::tasks::delete_task_by_body)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/tasks/{id}",
            get(handlers::tasks::get_task)
                .put(handlers::tasks::update_task)
                .delete(handlers::tasks::delete_task)
                .fallback(handlers::method_not_allowed),
        )
        // Empty id: "/api/tasks/"
        .route(
            "/tasks/",
            put(handlers::tasks::update_task_without_id)
                .delete(handlers::tasks::delete_task_without_id)
                .fallback(handlers::route_not_found),
        )
}

/// Create the full router: API, CORS, request tracing, 404 fallback
///
/// `CorsLayer` answers every OPTIONS request itself (200, empty body) but
/// only puts Allow-Methods/Allow-Headers on those preflight responses; the
/// `SetResponseHeaderLayer`s add them to every other response too.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/api", create_api_router())
        .fallback(handlers::route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("content-type"),
        ))
        .layer(cors)
        .with_state(state)
}

/// Start the API server and run until Ctrl+C
pub async fn start_server(host: &str, port: u16, state: AppState) -> std::io::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("taskd API server: http://{}/api", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(e) => {
            warn!(error = %e, "cannot listen for Ctrl+C, running until killed");
            std::future::pending::<()>().await;
        }
    }
}

//! Router construction

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use std::path::PathBuf;
use std::sync::Arc;

use crate::context::ServiceContext;
use crate::http::handlers;
use crate::middleware::logging::log_request;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<ServiceContext>,
    pub static_root: Arc<PathBuf>,
    /// Canonical directory that static requests may not reach into
    pub private_dir: Arc<PathBuf>,
}

pub fn build_router(
    context: Arc<ServiceContext>,
    static_root: PathBuf,
    private_dir: PathBuf,
) -> Router {
    let state = AppState {
        context,
        static_root: Arc::new(static_root),
        private_dir: Arc::new(private_dir),
    };

    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/run-backend", post(handlers::run_backend))
        .route("/users", get(handlers::list_users))
        .route("/", get(handlers::serve_index))
        .route("/{*path}", get(handlers::serve_asset))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

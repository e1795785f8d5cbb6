//! Endpoint handlers
//!
//! Each handler moves its core operation onto the blocking pool: the
//! operations take the service lock and do synchronous file and process I/O.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;

use crate::error::ServiceError;
use crate::http::requests::{CommandRequest, CredentialsRequest};
use crate::http::responses;
use crate::http::routes::AppState;
use crate::http::static_files::{INDEX_FILE, serve_static};

/// Runs a blocking core operation off the async runtime.
async fn run_blocking<F, T, E>(operation: F) -> Result<T, ServiceError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ServiceError> + Send + 'static,
{
    tokio::task::spawn_blocking(operation)
        .await
        .map_err(|e| ServiceError::WorkerFailed(e.to_string()))?
        .map_err(Into::into)
}

/// `POST /register`
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<&'static str, ServiceError> {
    let context = state.context;
    run_blocking(move || context.register(&request.username, &request.password)).await?;
    Ok(responses::ACCOUNT_CREATED)
}

/// `POST /login`
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<&'static str, ServiceError> {
    let context = state.context;
    run_blocking(move || context.login(&request.username, &request.password)).await?;
    Ok(responses::LOGIN_SUCCESSFUL)
}

/// `POST /run-backend`: relays the executable's output verbatim
pub async fn run_backend(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> Result<String, ServiceError> {
    let context = state.context;
    run_blocking(move || context.execute(&request.command)).await
}

/// `GET /users`
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<String>>, ServiceError> {
    let context = state.context;
    let users = run_blocking(move || Ok::<_, ServiceError>(context.list_users())).await?;
    Ok(Json(users))
}

/// `GET /`
pub async fn serve_index(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(serve_static(&state.static_root, &state.private_dir, INDEX_FILE).await?)
}

/// `GET /<path>`
pub async fn serve_asset(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, ServiceError> {
    Ok(serve_static(&state.static_root, &state.private_dir, &path).await?)
}

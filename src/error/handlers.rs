//! Error handlers
//!
//! Maps server errors onto HTTP status codes and the fixed response texts
//! clients rely on.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, info};

use crate::error::types::{ServiceError, StaticFileError, StoreError};
use crate::http::responses;

/// Log a server error at a level matching its severity
pub fn handle_error(err: &ServiceError) {
    if error_to_status_code(err).is_server_error() {
        error!("Request failed: {}", err);
    } else {
        info!("Request rejected: {}", err);
    }
}

/// Convert error to HTTP status code
pub fn error_to_status_code(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Store(StoreError::IoError(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        ServiceError::Store(_) => StatusCode::BAD_REQUEST,
        ServiceError::Bridge(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ServiceError::StaticFile(StaticFileError::IoError(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        ServiceError::StaticFile(_) => StatusCode::NOT_FOUND,
        ServiceError::WorkerFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert error to the plain-text body sent to the client
pub fn error_to_message(err: &ServiceError) -> String {
    match err {
        ServiceError::Store(store_error) => match store_error {
            StoreError::MissingCredentials => responses::CREDENTIALS_REQUIRED.into(),
            StoreError::InvalidUsername(_) => responses::INVALID_USERNAME.into(),
            StoreError::DuplicateUser(_) => responses::USERNAME_EXISTS.into(),
            StoreError::NoUsers => responses::NO_USERS.into(),
            StoreError::UserNotFound(_) => responses::USER_NOT_FOUND.into(),
            StoreError::IncorrectPassword(_) => responses::INCORRECT_PASSWORD.into(),
            StoreError::IoError(_) => responses::INTERNAL_ERROR.into(),
        },
        ServiceError::Bridge(e) => format!("{}{}", responses::BACKEND_ERROR_PREFIX, e),
        ServiceError::StaticFile(StaticFileError::IoError(_)) => responses::INTERNAL_ERROR.into(),
        ServiceError::StaticFile(_) => responses::NOT_FOUND.into(),
        ServiceError::WorkerFailed(_) => responses::INTERNAL_ERROR.into(),
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        handle_error(&self);
        (error_to_status_code(&self), error_to_message(&self)).into_response()
    }
}

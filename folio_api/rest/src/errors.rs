use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio_models::email_address::EmailAddress;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

pub fn error(code: StatusCode, error: impl Into<String>) -> Response {
    (
        code,
        Json(ApiError {
            error: error.into(),
        }),
    )
        .into_response()
}

/// Log `err` and respond with the generic catch-all error.
pub fn unexpected_error(err: impl Into<anyhow::Error>, fallback_email: &EmailAddress) -> Response {
    let err = err.into();
    tracing::error!("unexpected error: {err:#}");
    error(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("An unexpected error occurred. Please contact directly at {fallback_email}"),
    )
}

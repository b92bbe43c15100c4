use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use folio_models::email_address::EmailAddress;
use tracing::warn;

use crate::{
    errors::{error, unexpected_error},
    models::{contact::ApiContactSubmission, ApiMessage},
};

pub const SUCCESS_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";

struct ContactState<Contact> {
    service: Arc<Contact>,
    fallback_email: Arc<EmailAddress>,
}

impl<Contact> Clone for ContactState<Contact> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            fallback_email: Arc::clone(&self.fallback_email),
        }
    }
}

pub fn router<Contact: ContactFeatureService>(
    service: Arc<Contact>,
    fallback_email: Arc<EmailAddress>,
) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(send_message::<Contact>))
        .with_state(ContactState {
            service,
            fallback_email,
        })
}

async fn send_message<Contact: ContactFeatureService>(
    State(state): State<ContactState<Contact>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let fallback_email = &*state.fallback_email;

    // The body is parsed regardless of the request's content type.
    let submission = match body
        .map_err(anyhow::Error::from)
        .and_then(|body| Ok(serde_json::from_slice::<ApiContactSubmission>(&body)?))
    {
        Ok(submission) => submission,
        Err(err) => return unexpected_error(err, fallback_email),
    };

    match state.service.send_message(submission.into()).await {
        Ok(()) => Json(ApiMessage {
            message: SUCCESS_MESSAGE.into(),
        })
        .into_response(),
        Err(ContactSendMessageError::Validation(err)) => {
            warn!("rejected contact message: {err}");
            error(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(err @ ContactSendMessageError::Unavailable) => {
            tracing::error!("{err}");
            error(
                StatusCode::SERVICE_UNAVAILABLE,
                format!(
                    "Email service is temporarily unavailable. Please try again later or \
                     contact directly at {fallback_email}"
                ),
            )
        }
        Err(err @ ContactSendMessageError::Transport(_)) => {
            tracing::error!("{err:#}");
            error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "Email service configuration error. Please contact directly at \
                     {fallback_email}"
                ),
            )
        }
        Err(err @ ContactSendMessageError::Verify(_)) => {
            tracing::error!("{err:#}");
            error(
                StatusCode::SERVICE_UNAVAILABLE,
                format!(
                    "Email service is currently unavailable. Please contact directly at \
                     {fallback_email}"
                ),
            )
        }
        Err(err @ ContactSendMessageError::Send(_)) => {
            tracing::error!("{err:#}");
            error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "Failed to send message. Please try again or contact directly at \
                     {fallback_email}"
                ),
            )
        }
        Err(ContactSendMessageError::Other(err)) => unexpected_error(err, fallback_email),
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use axum::{body::Body, http::Request};
    use folio_core_contact_contracts::MockContactFeatureService;
    use folio_models::contact::{ContactSubmission, ContactValidationError};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    const FALLBACK: &str = "hello@example.com";

    #[tokio::test]
    async fn ok() {
        // Arrange
        let service = MockContactFeatureService::new().with_send_message(submission(), Ok(()));

        // Act
        let (status, body) = post(service, &json!(submission()).to_string()).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": SUCCESS_MESSAGE }));
    }

    #[tokio::test]
    async fn missing_fields() {
        // Arrange
        let expected = ContactSubmission {
            name: "".into(),
            ..submission()
        };
        let service = MockContactFeatureService::new().with_send_message(
            expected,
            Err(ContactValidationError::MissingFields.into()),
        );

        // Act
        let (status, body) = post(
            service,
            r#"{"email": "max.mustermann@example.de", "subject": "Collaboration", "message": "Hello!"}"#,
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "All fields are required" }));
    }

    #[tokio::test]
    async fn invalid_email() {
        // Arrange
        let service = MockContactFeatureService::new().with_send_message(
            submission(),
            Err(ContactValidationError::InvalidEmail.into()),
        );

        // Act
        let (status, body) = post(service, &json!(submission()).to_string()).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid email format" }));
    }

    #[tokio::test]
    async fn failures_name_fallback_address() {
        for (result, expected_status, expected_prefix) in [
            (
                ContactSendMessageError::Unavailable,
                StatusCode::SERVICE_UNAVAILABLE,
                "Email service is temporarily unavailable.",
            ),
            (
                ContactSendMessageError::Transport(anyhow!("invalid host")),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Email service configuration error.",
            ),
            (
                ContactSendMessageError::Verify(anyhow!("authentication failed")),
                StatusCode::SERVICE_UNAVAILABLE,
                "Email service is currently unavailable.",
            ),
            (
                ContactSendMessageError::Send(anyhow!("connection reset")),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to send message.",
            ),
            (
                ContactSendMessageError::Other(anyhow!("template error")),
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred.",
            ),
        ] {
            // Arrange
            let service =
                MockContactFeatureService::new().with_send_message(submission(), Err(result));

            // Act
            let (status, body) = post(service, &json!(submission()).to_string()).await;

            // Assert
            assert_eq!(status, expected_status);
            let error = body["error"].as_str().unwrap();
            assert!(error.starts_with(expected_prefix), "{error}");
            assert!(error.ends_with(&format!("contact directly at {FALLBACK}")), "{error}");
        }
    }

    #[tokio::test]
    async fn malformed_body() {
        // Arrange
        let service = MockContactFeatureService::new();

        // Act
        let (status, body) = post(service, "{\"name\": ").await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({
                "error": format!("An unexpected error occurred. Please contact directly at {FALLBACK}")
            })
        );
    }

    #[tokio::test]
    async fn content_type_header_is_optional() {
        // Arrange
        let service = MockContactFeatureService::new().with_send_message(submission(), Ok(()));
        let router = router(Arc::new(service), Arc::new(FALLBACK.parse().unwrap()));

        // Act
        let response = router
            .oneshot(
                Request::post("/api/contact")
                    .body(Body::from(json!(submission()).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn non_string_field() {
        // Arrange
        let service = MockContactFeatureService::new();

        // Act
        let (status, _) = post(
            service,
            r#"{"name": 42, "email": "max.mustermann@example.de", "subject": "Hi", "message": "Hi"}"#,
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    async fn post(service: MockContactFeatureService, body: &str) -> (StatusCode, Value) {
        let router = router(Arc::new(service), Arc::new(FALLBACK.parse().unwrap()));

        let response = router
            .oneshot(
                Request::post("/api/contact")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_owned()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Max Mustermann".into(),
            email: "max.mustermann@example.de".into(),
            subject: "Collaboration".into(),
            message: "Hello!".into(),
        }
    }
}

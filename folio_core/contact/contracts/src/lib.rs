use std::future::Future;

use folio_models::contact::{ContactSubmission, ContactValidationError};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validate a contact form submission and forward it to the configured
    /// recipient via the smtp relay.
    fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<(), ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error(transparent)]
    Validation(#[from] ContactValidationError),
    #[error("The smtp password is not configured.")]
    Unavailable,
    #[error("Failed to build the smtp transport: {0}")]
    Transport(anyhow::Error),
    #[error("Failed to verify the smtp connection: {0}")]
    Verify(anyhow::Error),
    #[error("Failed to send message: {0}")]
    Send(anyhow::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_send_message(
        mut self,
        submission: ContactSubmission,
        result: Result<(), ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}

//! Client side state of the contact form.
//!
//! The form validates the draft locally, performs a single request against the
//! contact endpoint and ends up in either [`FormStatus::Success`] or
//! [`FormStatus::Error`].

use std::sync::Arc;

use folio_extern_contracts::contact::{ContactApiResponse, ContactApiService};
use folio_models::{
    contact::{is_valid_email, ContactSubmission},
    email_address::EmailAddress,
};
use tracing::{error, info};
use url::Url;


pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const SEND_FAILED_MESSAGE: &str = "Failed to send message";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

#[derive(Debug, Clone)]
pub struct ContactFormConfig {
    /// Address offered for direct contact.
    pub fallback_email: Arc<EmailAddress>,
    pub mailto_subject: Arc<str>,
    pub mailto_body: Arc<str>,
}

#[derive(Debug)]
pub struct ContactForm<Api> {
    api: Api,
    config: ContactFormConfig,
    draft: ContactSubmission,
    status: FormStatus,
}

impl<Api> ContactForm<Api> {
    pub fn new(api: Api, config: ContactFormConfig) -> Self {
        Self {
            api,
            config,
            draft: ContactSubmission::default(),
            status: FormStatus::Idle,
        }
    }

    pub fn draft(&self) -> &ContactSubmission {
        &self.draft
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub fn update_field(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.draft.name = value,
            ContactField::Email => self.draft.email = value,
            ContactField::Subject => self.draft.subject = value,
            ContactField::Message => self.draft.message = value,
        }
    }

    /// Validates the draft and enters [`FormStatus::Submitting`].
    ///
    /// Returns `None` (and enters [`FormStatus::Error`]) if the draft must not
    /// be sent.
    pub fn prepare_submission(&mut self) -> Option<ContactSubmission> {
        if self.draft.has_blank_field() {
            self.status = FormStatus::Error(MISSING_FIELDS_MESSAGE.into());
            return None;
        }

        if !is_valid_email(&self.draft.email) {
            self.status = FormStatus::Error(INVALID_EMAIL_MESSAGE.into());
            return None;
        }

        self.status = FormStatus::Submitting;
        Some(self.draft.clone())
    }

    /// Applies the outcome of a request started by
    /// [`prepare_submission`](Self::prepare_submission).
    pub fn complete_submission(&mut self, result: anyhow::Result<ContactApiResponse>) {
        self.status = match result {
            Ok(ContactApiResponse::Success { .. }) => {
                self.draft = ContactSubmission::default();
                FormStatus::Success
            }
            Ok(ContactApiResponse::Failure { status, error }) => {
                info!(status, ?error, "contact message was rejected");
                FormStatus::Error(error.unwrap_or_else(|| SEND_FAILED_MESSAGE.into()))
            }
            Err(err) => {
                error!("Contact form error: {err:#}");
                FormStatus::Error(self.network_error_message())
            }
        };
    }

    /// Link for contacting the fallback address with the local mail client.
    pub fn mailto_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("mailto:{}", self.config.fallback_email))?;
        url.set_query(Some(&format!(
            "subject={}&body={}",
            self.config.mailto_subject, self.config.mailto_body
        )));
        Ok(url)
    }

    fn network_error_message(&self) -> String {
        format!(
            "Network error. Please check your connection and try again, or contact me directly \
             at {}",
            self.config.fallback_email
        )
    }
}

impl<Api: ContactApiService> ContactForm<Api> {
    /// Validates and sends the draft, leaving the form in either
    /// [`FormStatus::Success`] or [`FormStatus::Error`].
    pub async fn submit(&mut self) -> &FormStatus {
        if let Some(submission) = self.prepare_submission() {
            let result = self.api.submit(&submission).await;
            self.complete_submission(result);
        }
        &self.status
    }
}

use folio_models::contact::ContactSubmission;
use serde::Deserialize;

/// Missing fields are accepted here and rejected by the contact service.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiContactSubmission {
    /// Full name of the user
    #[serde(default)]
    pub name: Option<String>,
    /// Email address of the user
    #[serde(default)]
    pub email: Option<String>,
    /// Subject of the message
    #[serde(default)]
    pub subject: Option<String>,
    /// Content of the message
    #[serde(default)]
    pub message: Option<String>,
}

impl From<ApiContactSubmission> for ContactSubmission {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name.unwrap_or_default(),
            email: value.email.unwrap_or_default(),
            subject: value.subject.unwrap_or_default(),
            message: value.message.unwrap_or_default(),
        }
    }
}

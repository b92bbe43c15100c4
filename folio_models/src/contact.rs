use std::{str::FromStr, sync::LazyLock};

use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::email_address::EmailAddress;

/// The email rule shared by the contact form and the relay endpoint.
pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Raw contact form payload, as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Invalid email format")]
    InvalidEmail,
}

impl ContactSubmission {
    pub fn fields(&self) -> [&str; 4] {
        [&self.name, &self.email, &self.subject, &self.message]
    }

    /// Whether any field is empty or consists only of whitespace.
    pub fn has_blank_field(&self) -> bool {
        self.fields().iter().any(|f| f.trim().is_empty())
    }

    /// Validates the submission as received by the relay endpoint.
    ///
    /// Fields are not trimmed here; only literally empty fields are rejected.
    pub fn validate(self) -> Result<ContactMessage, ContactValidationError> {
        if self.fields().iter().any(|f| f.is_empty()) {
            return Err(ContactValidationError::MissingFields);
        }

        if !is_valid_email(&self.email) {
            return Err(ContactValidationError::InvalidEmail);
        }

        Ok(ContactMessage {
            author: ContactMessageAuthor {
                name: ContactMessageAuthorName::try_new(self.name)
                    .map_err(|_| ContactValidationError::MissingFields)?,
                email: self.email,
            },
            subject: ContactMessageSubject::try_new(self.subject)
                .map_err(|_| ContactValidationError::MissingFields)?,
            content: ContactMessageContent::try_new(self.message)
                .map_err(|_| ContactValidationError::MissingFields)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub subject: ContactMessageSubject,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    /// Matches [`EMAIL_REGEX`], but is not necessarily a deliverable address.
    pub email: String,
}

impl ContactMessageAuthor {
    /// The author's address as a mailbox, if it can be used as a `Reply-To`.
    pub fn reply_to(&self) -> Result<EmailAddress, <EmailAddress as FromStr>::Err> {
        self.email.parse()
    }
}

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageAuthorName(String);

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageSubject(String);

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

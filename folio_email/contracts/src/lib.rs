use std::future::Future;

use folio_models::{
    email_address::{EmailAddress, EmailAddressWithName},
    Sensitive,
};

/// Builds SMTP transports from per-request credentials.
#[cfg_attr(feature = "mock", mockall::automock(type Transport = MockEmailService;))]
pub trait EmailTransportService: Send + Sync + 'static {
    type Transport: EmailService;

    /// Build a new transport. No network connection is established here.
    fn build(&self, credentials: SmtpCredentials) -> anyhow::Result<Self::Transport>;
}

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Send an email. Returns `false` if the server responded negatively.
    fn send(&self, email: Email) -> impl Future<Output = anyhow::Result<bool>> + Send;

    /// Connect and authenticate without sending anything.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpCredentials {
    pub username: EmailAddress,
    pub password: Sensitive<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub from: EmailAddressWithName,
    pub recipient: EmailAddressWithName,
    pub subject: String,
    pub body: EmailBody,
    pub reply_to: Option<EmailAddressWithName>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailBody {
    Text(String),
    Html(String),
    /// `multipart/alternative` with a plain text and an html part.
    Alternative { text: String, html: String },
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email, result: bool) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_send_error(mut self, email: Email, error: anyhow::Error) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Err(error))));
        self
    }

    /// The send future never resolves.
    pub fn with_send_pending(mut self) -> Self {
        self.expect_send()
            .once()
            .return_once(|_| Box::pin(std::future::pending::<anyhow::Result<bool>>()));
        self
    }

    pub fn with_ping(mut self, result: anyhow::Result<()>) -> Self {
        self.expect_ping()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }

    /// The ping future never resolves.
    pub fn with_ping_pending(mut self) -> Self {
        self.expect_ping()
            .once()
            .return_once(|| Box::pin(std::future::pending::<anyhow::Result<()>>()));
        self
    }
}

#[cfg(feature = "mock")]
impl MockEmailTransportService {
    pub fn with_build(mut self, credentials: SmtpCredentials, transport: MockEmailService) -> Self {
        self.expect_build()
            .once()
            .with(mockall::predicate::eq(credentials))
            .return_once(move |_| Ok(transport));
        self
    }

    pub fn with_build_error(mut self, error: anyhow::Error) -> Self {
        self.expect_build()
            .once()
            .return_once(move |_| Err(error));
        self
    }
}

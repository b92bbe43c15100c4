use std::{sync::Arc, time::Duration};

use anyhow::anyhow;
use folio_di::Build;
use folio_email_contracts::{Email, EmailBody, EmailService, EmailTransportService, SmtpCredentials};
use folio_utils::Apply;
use lettre::{
    message::{header, MessageBuilder, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

#[derive(Debug, Clone, Build)]
pub struct EmailTransportServiceImpl {
    config: EmailTransportConfig,
}

#[derive(Debug, Clone)]
pub struct EmailTransportConfig {
    pub host: Arc<str>,
    pub port: u16,
    pub connection_timeout: Duration,
    pub greeting_timeout: Duration,
    pub socket_timeout: Duration,
}

impl EmailTransportConfig {
    /// lettre applies a single timeout to connecting, reading the greeting and
    /// every socket operation, so the strictest bound is used for all of them.
    fn timeout(&self) -> Duration {
        self.connection_timeout
            .min(self.greeting_timeout)
            .min(self.socket_timeout)
    }
}

impl EmailTransportService for EmailTransportServiceImpl {
    type Transport = EmailServiceImpl;

    fn build(&self, credentials: SmtpCredentials) -> anyhow::Result<Self::Transport> {
        debug!(
            host = %self.config.host,
            port = self.config.port,
            username = %credentials.username,
            "building smtp transport"
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
            .port(self.config.port)
            .credentials(Credentials::new(
                credentials.username.as_str().into(),
                credentials.password.0,
            ))
            .timeout(Some(self.config.timeout()))
            .build();

        Ok(EmailServiceImpl { transport })
    }
}

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let message = build_message(email)?;

        self.transport
            .send(message)
            .await
            .map(|response| response.is_positive())
            .map_err(Into::into)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

fn build_message(email: Email) -> anyhow::Result<Message> {
    let builder = Message::builder()
        .from(email.from.0)
        .to(email.recipient.0)
        .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
        .subject(email.subject);

    let message = match email.body {
        EmailBody::Text(body) => builder.header(header::ContentType::TEXT_PLAIN).body(body),
        EmailBody::Html(body) => builder.header(header::ContentType::TEXT_HTML).body(body),
        EmailBody::Alternative { text, html } => {
            builder.multipart(MultiPart::alternative_plain_html(text, html))
        }
    }?;

    Ok(message)
}

use anyhow::{ensure, Context};
use clap::Subcommand;
use folio_config::Config;
use folio_di::Provide;
use folio_email_contracts::{
    Email, EmailBody, EmailService, EmailTransportService, SmtpCredentials,
};
use folio_models::email_address::EmailAddressWithName;
use tracing::info;

use crate::environment::{types::EmailTransport, Provider};

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let password = config
        .email
        .password()
        .context("The smtp password is not configured")?;

    let mut provider = Provider::from_config(&config);
    let email_transport: EmailTransport = provider.provide();

    let transport = email_transport.build(SmtpCredentials {
        username: config.email.sender.clone(),
        password: password.to_owned().into(),
    })?;

    info!("Connecting to smtp server");
    transport
        .ping()
        .await
        .context("Failed to connect to smtp server")?;

    let ok = transport
        .send(Email {
            from: config
                .email
                .sender
                .clone()
                .with_name(config.email.sender_name.clone()),
            recipient,
            subject: "Email Deliverability Test".into(),
            body: EmailBody::Text("Email deliverability seems to be working!".into()),
            reply_to: None,
        })
        .await?;

    ensure!(ok, "Failed to send email");

    Ok(())
}

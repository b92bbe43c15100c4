use std::{sync::Arc, time::Duration};

use anyhow::anyhow;
use folio_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use folio_di::Build;
use folio_email_contracts::{
    Email, EmailBody, EmailService, EmailTransportService, SmtpCredentials,
};
use folio_models::{
    contact::{ContactMessage, ContactSubmission},
    email_address::EmailAddressWithName,
    Sensitive,
};
use folio_templates_contracts::{
    ContactMessageTemplate, ContactMessageTextTemplate, TemplateService,
};
use tracing::{debug, info};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Build)]
pub struct ContactFeatureServiceImpl<EmailTransport, Template> {
    email_transport: EmailTransport,
    template: Template,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Display name and address used as `From` and as the smtp username.
    pub sender: Arc<EmailAddressWithName>,
    pub recipient: Arc<EmailAddressWithName>,
    /// `None` if the smtp password has not been configured.
    pub smtp_password: Option<Arc<Sensitive<String>>>,
    pub subject_prefix: Arc<str>,
    pub verify_timeout: Duration,
    pub send_timeout: Duration,
}

impl<EmailTransport, Template> ContactFeatureService
    for ContactFeatureServiceImpl<EmailTransport, Template>
where
    EmailTransport: EmailTransportService,
    Template: TemplateService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<(), ContactSendMessageError> {
        let message = submission.validate()?;

        let Some(password) = self.config.smtp_password.as_deref() else {
            return Err(ContactSendMessageError::Unavailable);
        };

        let transport = self
            .email_transport
            .build(SmtpCredentials {
                username: self.config.sender.email(),
                password: password.clone(),
            })
            .map_err(ContactSendMessageError::Transport)?;

        debug!("verifying smtp connection");
        let verify_timeout = self.config.verify_timeout;
        tokio::time::timeout(verify_timeout, transport.ping())
            .await
            .unwrap_or_else(|_| Err(anyhow!("Verification timed out after {verify_timeout:?}")))
            .map_err(ContactSendMessageError::Verify)?;

        let email = self.compose(message)?;

        debug!("sending contact message");
        let send_timeout = self.config.send_timeout;
        let accepted = tokio::time::timeout(send_timeout, transport.send(email))
            .await
            .unwrap_or_else(|_| Err(anyhow!("Sending timed out after {send_timeout:?}")))
            .map_err(ContactSendMessageError::Send)?;

        if !accepted {
            return Err(ContactSendMessageError::Send(anyhow!(
                "The smtp server rejected the message"
            )));
        }

        info!("forwarded contact message");

        Ok(())
    }
}

impl<EmailTransport, Template> ContactFeatureServiceImpl<EmailTransport, Template>
where
    Template: TemplateService,
{
    fn compose(&self, message: ContactMessage) -> Result<Email, ContactSendMessageError> {
        let subject = format!("{}{}", self.config.subject_prefix, *message.subject);
        let reply_to = message.author.reply_to().map_err(|err| {
            ContactSendMessageError::Send(anyhow!(
                "Cannot use {:?} as reply-to address: {err}",
                message.author.email
            ))
        })?;

        let data = ContactMessageTemplate {
            name: message.author.name.into_inner(),
            email: message.author.email,
            subject: message.subject.into_inner(),
            message: message.content.into_inner(),
        };
        let html = self.template.render(&data)?;
        let text = self.template.render(&ContactMessageTextTemplate(data))?;

        Ok(Email {
            from: (*self.config.sender).clone(),
            recipient: (*self.config.recipient).clone(),
            subject,
            body: EmailBody::Alternative { text, html },
            reply_to: Some(EmailAddressWithName::from(reply_to)),
        })
    }
}

use std::sync::Arc;

use folio_api_rest::RestServerConfig;
use folio_config::Config;
use folio_core_contact_impl::ContactFeatureConfig;
use folio_di::provider;
use folio_email_impl::EmailTransportConfig;
use folio_extern_impl::contact::ContactApiServiceConfig;
use folio_form::ContactFormConfig;
use folio_models::Sensitive;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        rest_server_config: RestServerConfig,
        email_transport_config: EmailTransportConfig,
        contact_api_service_config: ContactApiServiceConfig,
        contact_feature_config: ContactFeatureConfig,
        contact_form_config: ContactFormConfig,
    }
}

impl Provider {
    pub fn from_config(config: &Config) -> Self {
        let fallback_email = Arc::new(config.contact.fallback_email.clone());

        // API
        let rest_server_config = RestServerConfig {
            host: config.http.host,
            port: config.http.port,
            fallback_email: Arc::clone(&fallback_email),
        };

        // Email
        let email_transport_config = EmailTransportConfig {
            host: config.email.smtp_host.as_str().into(),
            port: config.email.smtp_port,
            connection_timeout: config.email.connection_timeout.into(),
            greeting_timeout: config.email.greeting_timeout.into(),
            socket_timeout: config.email.socket_timeout.into(),
        };

        // Extern
        let contact_api_service_config = ContactApiServiceConfig::new(config.form.endpoint.clone());

        // Core
        let contact_feature_config = ContactFeatureConfig {
            sender: config
                .email
                .sender
                .clone()
                .with_name(config.email.sender_name.clone())
                .into(),
            recipient: Arc::new(config.contact.recipient.clone().into()),
            smtp_password: config
                .email
                .password()
                .map(|password| Sensitive(password.to_owned()).into()),
            subject_prefix: config.contact.subject_prefix.as_str().into(),
            verify_timeout: config.contact.verify_timeout.into(),
            send_timeout: config.contact.send_timeout.into(),
        };

        // Form
        let contact_form_config = ContactFormConfig {
            fallback_email,
            mailto_subject: config.form.mailto_subject.as_str().into(),
            mailto_body: config.form.mailto_body.as_str().into(),
        };

        Self::new(
            rest_server_config,
            email_transport_config,
            contact_api_service_config,
            contact_feature_config,
            contact_form_config,
        )
    }
}

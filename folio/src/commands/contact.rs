use anyhow::bail;
use clap::Subcommand;
use folio_config::Config;
use folio_di::Provide;
use folio_form::{ContactField, ContactForm, ContactFormConfig, FormStatus};
use url::Url;

use crate::environment::{types::ContactApi, Provider};

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Submit a message through the contact form
    #[command(aliases(["s"]))]
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
        /// Contact endpoint to use instead of the configured one
        #[arg(long)]
        endpoint: Option<Url>,
    },
    /// Print the link for contacting the site owner directly
    Mailto,
}

impl ContactCommand {
    pub async fn invoke(self, mut config: Config) -> anyhow::Result<()> {
        match self {
            ContactCommand::Send {
                name,
                email,
                subject,
                message,
                endpoint,
            } => {
                if let Some(endpoint) = endpoint {
                    config.form.endpoint = endpoint;
                }

                let mut form = make_form(&config);
                form.update_field(ContactField::Name, name);
                form.update_field(ContactField::Email, email);
                form.update_field(ContactField::Subject, subject);
                form.update_field(ContactField::Message, message);

                match form.submit().await {
                    FormStatus::Success => {
                        println!("Message sent successfully! I'll get back to you soon.")
                    }
                    FormStatus::Error(err) => bail!("{err}"),
                    status => bail!("Unexpected form status: {status:?}"),
                }
            }
            ContactCommand::Mailto => println!("{}", make_form(&config).mailto_url()?),
        }

        Ok(())
    }
}

fn make_form(config: &Config) -> ContactForm<ContactApi> {
    let mut provider = Provider::from_config(config);
    let api: ContactApi = provider.provide();
    let form_config: ContactFormConfig = provider.provide();
    ContactForm::new(api, form_config)
}

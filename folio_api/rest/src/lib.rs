use std::{net::IpAddr, sync::Arc};

use axum::Router;
use folio_core_contact_contracts::ContactFeatureService;
use folio_di::Build;
use folio_models::email_address::EmailAddress;
use tokio::net::TcpListener;

mod errors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Contact> {
    config: RestServerConfig,
    contact: Contact,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Address offered to the user in every failure response.
    pub fallback_email: Arc<EmailAddress>,
}

impl<Contact> RestServer<Contact>
where
    Contact: ContactFeatureService,
{
    pub async fn serve(self) -> anyhow::Result<()> {
        let RestServerConfig { host, port, .. } = self.config;
        let router = self.router();
        let listener = TcpListener::bind((host, port)).await?;
        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let fallback_email = self.config.fallback_email;

        let router = Router::new().merge(routes::contact::router(
            self.contact.into(),
            Arc::clone(&fallback_email),
        ));

        let router = middlewares::panic_handler::add(fallback_email)(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}

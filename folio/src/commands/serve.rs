use folio_config::Config;
use folio_di::Provide;
use tracing::{info, warn};

use crate::environment::{types::RestServer, Provider};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    if config.email.password().is_none() {
        warn!("No smtp password configured, contact messages will be rejected");
    }

    let mut provider = Provider::from_config(&config);
    let server: RestServer = provider.provide();
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve().await
}

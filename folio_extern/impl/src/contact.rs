use std::sync::Arc;

use folio_di::Build;
use folio_extern_contracts::contact::{ContactApiResponse, ContactApiService};
use folio_models::contact::ContactSubmission;
use serde::Deserialize;
use tracing::trace;
use url::Url;

use crate::http::HttpClient;

#[derive(Debug, Clone, Build)]
pub struct ContactApiServiceImpl {
    config: ContactApiServiceConfig,
    #[state]
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ContactApiServiceConfig {
    endpoint: Arc<Url>,
}

impl ContactApiServiceConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl ContactApiService for ContactApiServiceImpl {
    async fn submit(&self, submission: &ContactSubmission) -> anyhow::Result<ContactApiResponse> {
        let response = self
            .client
            .post((*self.config.endpoint).clone())
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        trace!(%status, "contact endpoint responded");

        // An unreadable body is treated like a body without the expected key.
        let body = response.json::<ResponseBody>().await.unwrap_or_default();

        Ok(if status.is_success() {
            ContactApiResponse::Success {
                message: body.message,
            }
        } else {
            ContactApiResponse::Failure {
                status: status.as_u16(),
                error: body.error,
            }
        })
    }
}

#[derive(Default, Deserialize)]
struct ResponseBody {
    message: Option<String>,
    error: Option<String>,
}

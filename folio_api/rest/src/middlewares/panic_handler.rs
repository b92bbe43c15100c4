use std::{panic::AssertUnwindSafe, sync::Arc};

use anyhow::anyhow;
use axum::{
    extract::Request,
    middleware::{from_fn, Next},
    Router,
};
use folio_models::email_address::EmailAddress;
use futures::FutureExt;

use crate::errors::unexpected_error;

pub fn add<S: Clone + Send + Sync + 'static>(
    fallback_email: Arc<EmailAddress>,
) -> impl FnOnce(Router<S>) -> Router<S> {
    |router| {
        router.layer(from_fn(move |request: Request, next: Next| {
            let fallback_email = Arc::clone(&fallback_email);
            async move {
                match AssertUnwindSafe(next.run(request)).catch_unwind().await {
                    Ok(response) => response,
                    Err(_) => unexpected_error(anyhow!("request handler panicked"), &fallback_email),
                }
            }
        }))
    }
}

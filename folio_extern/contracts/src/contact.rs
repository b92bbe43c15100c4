use std::future::Future;

use folio_models::contact::ContactSubmission;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactApiService: Send + Sync + 'static {
    /// Post a submission to the contact endpoint.
    ///
    /// Returns an error only if no response was received at all.
    fn submit(
        &self,
        submission: &ContactSubmission,
    ) -> impl Future<Output = anyhow::Result<ContactApiResponse>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactApiResponse {
    Success {
        message: Option<String>,
    },
    Failure {
        status: u16,
        /// The `error` text of the response body, if it could be read.
        error: Option<String>,
    },
}

#[cfg(feature = "mock")]
impl MockContactApiService {
    pub fn with_submit(
        mut self,
        submission: ContactSubmission,
        result: ContactApiResponse,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_submit_error(
        mut self,
        submission: ContactSubmission,
        error: anyhow::Error,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(Err(error))));
        self
    }
}

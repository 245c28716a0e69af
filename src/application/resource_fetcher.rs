// Fetcher trait for raw series resources
use crate::application::errors::StoreResult;
use async_trait::async_trait;

#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch the raw text behind `locator`.
    ///
    /// Transport errors and non-success responses both surface as
    /// `StoreError::FetchFailure`; implementations do not retry.
    async fn fetch_text(&self, locator: &str) -> StoreResult<String>;
}

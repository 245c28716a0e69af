// Store error types
use crate::domain::resolution::Resolution;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no resource mapped for resolution '{0}'")]
    MissingMapping(Resolution),

    #[error("failed to fetch {locator}: {reason}")]
    FetchFailure { locator: String, reason: String },
}

impl StoreError {
    pub fn fetch(locator: impl Into<String>, reason: impl ToString) -> Self {
        StoreError::FetchFailure {
            locator: locator.into(),
            reason: reason.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

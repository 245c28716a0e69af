// Directory fetcher for series files on local disk
use crate::application::errors::{StoreError, StoreResult};
use crate::application::resource_fetcher::ResourceFetcher;
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ResourceFetcher for DirectoryFetcher {
    async fn fetch_text(&self, locator: &str) -> StoreResult<String> {
        let path = self.root.join(locator);
        tracing::debug!("Reading {}", path.display());

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| StoreError::fetch(path.display().to_string(), e))?;

        // Undecodable bytes become U+FFFD and the parser drops that line
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

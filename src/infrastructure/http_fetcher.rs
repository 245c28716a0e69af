// HTTP fetcher for series resources served as static files
use crate::application::errors::{StoreError, StoreResult};
use crate::application::resource_fetcher::ResourceFetcher;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{header, Client, Url};

#[derive(Debug, Clone)]
pub struct HttpResourceFetcher {
    base: Url,
    client: Client,
}

impl HttpResourceFetcher {
    pub fn new(base: &str) -> anyhow::Result<Self> {
        // Treat the base as a directory so relative locators resolve under it
        let base = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        };
        let base = Url::parse(&base).with_context(|| format!("Invalid base URL: {}", base))?;

        Ok(Self {
            base,
            client: Client::new(),
        })
    }

    pub fn resolve(&self, locator: &str) -> StoreResult<Url> {
        self.base
            .join(locator)
            .map_err(|e| StoreError::fetch(locator, e))
    }
}

#[async_trait]
impl ResourceFetcher for HttpResourceFetcher {
    async fn fetch_text(&self, locator: &str) -> StoreResult<String> {
        let url = self.resolve(locator)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(header::CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| StoreError::fetch(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::fetch(url.as_str(), status));
        }

        response
            .text()
            .await
            .map_err(|e| StoreError::fetch(url.as_str(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_fetch_text_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/data/months.csv")
            .match_header("cache-control", "no-store")
            .with_status(200)
            .with_header("content-type", "text/csv")
            .with_body("170,00:00:00 01/01/17\n")
            .create_async()
            .await;

        let fetcher = HttpResourceFetcher::new(&format!("{}/data", server.url())).unwrap();
        let body = fetcher.fetch_text("months.csv").await.unwrap();

        assert_eq!(body, "170,00:00:00 01/01/17\n");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_text_non_success_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/missing.csv")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = HttpResourceFetcher::new(&server.url()).unwrap();
        let result = fetcher.fetch_text("missing.csv").await;

        match result {
            Err(StoreError::FetchFailure { locator, reason }) => {
                assert!(locator.ends_with("/missing.csv"));
                assert!(reason.contains("404"));
            }
            other => panic!("expected FetchFailure, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_text_connection_error() {
        // Nothing listens on port 9 of localhost in the test environment
        let fetcher = HttpResourceFetcher::new("http://127.0.0.1:9/").unwrap();
        assert!(matches!(
            fetcher.fetch_text("x.csv").await,
            Err(StoreError::FetchFailure { .. })
        ));
    }

    #[test]
    fn test_resolve_relative_and_absolute_locators() {
        let fetcher = HttpResourceFetcher::new("https://example.org/solar").unwrap();
        assert_eq!(
            fetcher.resolve("days.csv").unwrap().as_str(),
            "https://example.org/solar/days.csv"
        );
        assert_eq!(
            fetcher.resolve("/other/weeks.csv").unwrap().as_str(),
            "https://example.org/other/weeks.csv"
        );
        assert_eq!(
            fetcher.resolve("https://cdn.example.org/m.csv").unwrap().as_str(),
            "https://cdn.example.org/m.csv"
        );
    }

    #[test]
    fn test_invalid_base() {
        assert!(HttpResourceFetcher::new("not a url").is_err());
    }
}

// Infrastructure layer - Configuration and resource transports
pub mod config;
pub mod file_fetcher;
pub mod http_fetcher;

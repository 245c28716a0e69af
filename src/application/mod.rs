// Application layer - Series store, parser and dashboard use case
pub mod dashboard_service;
pub mod errors;
pub mod resource_fetcher;
pub mod series_parser;
pub mod series_store;

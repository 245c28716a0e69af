// Presentation layer - HTTP shell over the dashboard service
pub mod app_state;
pub mod handlers;

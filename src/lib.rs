// Solar production dashboard: multi-resolution series store and JSON view model
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

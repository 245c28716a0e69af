// Domain layer - Resolutions, samples and dashboard view types
pub mod dashboard;
pub mod resolution;
pub mod series;

use crate::application::resource_fetcher::ResourceFetcher;
use crate::application::series_parser::DEFAULT_DELIMITER;
use crate::domain::resolution::Resolution;
use crate::infrastructure::file_fetcher::DirectoryFetcher;
use crate::infrastructure::http_fetcher::HttpResourceFetcher;
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    /// URL or directory the source locators are resolved against
    pub base: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Resolution key → resource locator
    #[serde(default)]
    pub sources: HashMap<String, String>,
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl DashboardSettings {
    /// Typed resolution mapping. Unknown keys are a configuration error.
    pub fn resolution_sources(&self) -> anyhow::Result<HashMap<Resolution, String>> {
        self.sources
            .iter()
            .map(|(key, locator)| {
                let resolution = key
                    .parse::<Resolution>()
                    .with_context(|| format!("Invalid key in [dashboard.sources]: {}", key))?;
                Ok::<_, anyhow::Error>((resolution, locator.clone()))
            })
            .collect()
    }

    pub fn is_remote(&self) -> bool {
        self.base.starts_with("http://") || self.base.starts_with("https://")
    }

    pub fn build_fetcher(&self) -> anyhow::Result<Arc<dyn ResourceFetcher>> {
        if self.is_remote() {
            Ok(Arc::new(HttpResourceFetcher::new(&self.base)?))
        } else {
            Ok(Arc::new(DirectoryFetcher::new(&self.base)))
        }
    }
}

pub fn load_dashboard_config(path: &str) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn parse_dashboard_config(toml: &str) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}

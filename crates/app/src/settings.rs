use std::time::Duration;

use client::{ClientConfig, Credential};
use serde::Deserialize;

use crate::{cli::Cli, error::Result};

const DEFAULT_CONFIG_PATH: &str = "config/eventzen.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub budget_api_url: String,
    pub event_api_url: String,
    pub token: Option<String>,
    pub page_size: u32,
    pub cache_ttl_ms: u64,
    pub delete_backoff_ms: u64,
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            budget_api_url: client::DEFAULT_BUDGET_API_URL.to_string(),
            event_api_url: client::DEFAULT_EVENT_API_URL.to_string(),
            token: None,
            page_size: 10,
            cache_ttl_ms: 30_000,
            delete_backoff_ms: 1_000,
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Reads the optional TOML file, then `EVENTZEN_*` variables, then the
    /// command-line overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let mut builder = config::Config::builder();
        builder = builder.add_source(config::File::with_name(config_path).required(false));
        builder = builder.add_source(config::Environment::with_prefix("EVENTZEN"));
        let mut settings: Settings = builder.build()?.try_deserialize()?;

        if let Some(url) = &cli.budget_api_url {
            settings.budget_api_url = url.clone();
        }
        if let Some(url) = &cli.event_api_url {
            settings.event_api_url = url.clone();
        }
        if let Some(token) = &cli.token {
            settings.token = Some(token.clone());
        }
        if let Some(level) = &cli.level {
            settings.level = level.clone();
        }

        Ok(settings)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            budget_api_url: self.budget_api_url.clone(),
            event_api_url: self.event_api_url.clone(),
            cache_ttl: Duration::from_millis(self.cache_ttl_ms),
            delete_backoff: Duration::from_millis(self.delete_backoff_ms),
            ..ClientConfig::default()
        }
    }

    pub fn credential(&self) -> Result<Credential> {
        Ok(Credential::from_token(self.token.as_deref())?)
    }
}

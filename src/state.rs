// src/state.rs

use crate::config::Config;
use reqwest::blocking::Client;
use std::sync::Arc;

/// Shared by every worker. Read-only: nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Pooled client for the completion and geocoding APIs.
    pub http: Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;

        Ok(Self::with_client(config, http))
    }

    pub fn with_client(config: Config, http: Client) -> Self {
        Self {
            config: Arc::new(config),
            http,
        }
    }
}

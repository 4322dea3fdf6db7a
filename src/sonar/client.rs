// client.rs
use crate::config::Config;
use crate::sonar::models::{ChatCompletion, ChatMessage, ChatRequest};
use crate::sonar::SonarError;
use reqwest::blocking::Client;
use std::time::Instant;
use tracing::debug;

/// Anything that can turn one prompt into one generated reply.
pub trait Completion {
    fn complete(&self, prompt: &str) -> Result<String, SonarError>;
}

/// Blocking client for the Perplexity chat-completions endpoint.
/// One call per prompt: no retries, no streaming.
pub struct SonarClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl SonarClient {
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Fails fast when the credential isn't configured.
    pub fn from_config(client: &Client, config: &Config) -> Result<Self, SonarError> {
        let api_key = config
            .perplexity_api_key
            .as_deref()
            .ok_or(SonarError::MissingApiKey)?;

        Ok(Self::new(
            client.clone(),
            api_key,
            config.sonar_base_url.as_str(),
            config.sonar_model.as_str(),
        ))
    }

    pub fn chat(&self, content: &str) -> Result<String, SonarError> {
        let payload = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content,
            }],
        };

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let start = Instant::now();

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .map_err(|e| SonarError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| SonarError::Network(e.to_string()))?;

        debug!(%status, elapsed = ?start.elapsed(), "Completion call finished");

        if !status.is_success() {
            return Err(SonarError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let completion: ChatCompletion =
            serde_json::from_str(&text).map_err(|e| SonarError::Decode(e.to_string()))?;

        Ok(completion.first_content())
    }
}

impl Completion for SonarClient {
    fn complete(&self, prompt: &str) -> Result<String, SonarError> {
        self.chat(prompt)
    }
}

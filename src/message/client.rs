//! HTTP client for the remote text-generation endpoint.

use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GenerationConfig;
use crate::error::GenerationError;

/// Maximum characters of an error response body kept for diagnostics.
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Trait for turning a prompt into generated text.
///
/// This abstraction allows replacing the network call in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` and return the raw generated text.
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    generated_text: String,
}

/// Text generator that POSTs to a Cohere-style `/generate` endpoint.
pub struct HttpTextGenerator {
    client: Client,
    config: GenerationConfig,
    api_key: Option<String>,
}

impl HttpTextGenerator {
    /// Build a client with an explicit credential.
    ///
    /// A `None` credential makes every call fail with
    /// [`GenerationError::MissingCredential`].
    pub fn new(config: GenerationConfig, api_key: Option<String>) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("foldercommit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GenerationError::Request)?;

        Ok(Self {
            client,
            config,
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    /// Build a client reading the credential from `config.api_key_env`.
    pub fn from_env(config: GenerationConfig) -> Result<Self, GenerationError> {
        let api_key = env::var(&config.api_key_env).ok();
        Self::new(config, api_key)
    }

    fn map_request_error(&self, err: reqwest::Error) -> GenerationError {
        if err.is_timeout() {
            GenerationError::Timeout(self.config.request_timeout)
        } else {
            GenerationError::Request(err)
        }
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GenerationError::MissingCredential(self.config.api_key_env.clone()))?;

        let body = GenerateRequest {
            prompt,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Requesting commit message from {}", self.config.endpoint);

        let resp = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| self.map_request_error(e))?;

        if !status.is_success() {
            return Err(GenerationError::HttpStatus {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_LENGTH).collect(),
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        Ok(parsed.generated_text)
    }
}

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;

use crate::config::Config;
use crate::error::CallError;
use crate::web::models::{CompletionRequest, CompletionResponse, Message};

#[cfg(test)]
pub mod fake;

/// One chat-completion round trip against the upstream provider.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn call(
        &self,
        messages: Vec<Message>,
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Result<CompletionResponse, CallError>;
}

/// Client for the Moonshot (Kimi) OpenAI-compatible chat-completion API.
pub struct KimiClient {
    api_key: Option<String>,
    endpoint: String,
    model: String,
    timeout: Duration,
    client: Client,
}

impl KimiClient {
    pub fn new(config: &Config) -> Self {
        let endpoint = format!("{}/chat/completions", config.api_base.trim_end_matches('/'));
        info!("Using chat-completion endpoint: {}", endpoint);

        Self {
            api_key: config.api_key.clone(),
            endpoint,
            model: config.model.clone(),
            timeout: config.upstream_timeout,
            client: Client::new(),
        }
    }

    async fn send(
        &self,
        api_key: &str,
        payload: &CompletionRequest,
    ) -> Result<CompletionResponse, CallError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(CallError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        debug!("Upstream response: {}", String::from_utf8_lossy(&bytes));

        serde_json::from_slice(&bytes).map_err(|e| CallError::Upstream {
            status: status.as_u16(),
            body: format!("unreadable completion payload: {}", e),
        })
    }
}

#[async_trait]
impl ChatCompletion for KimiClient {
    async fn call(
        &self,
        messages: Vec<Message>,
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Result<CompletionResponse, CallError> {
        let api_key = self.api_key.as_deref().ok_or(CallError::Configuration)?;

        let payload = CompletionRequest {
            model: self.model.clone(),
            messages,
            temperature,
            max_tokens,
        };
        debug!(
            "Sending {} messages upstream (temperature: {}, max_tokens: {:?})",
            payload.messages.len(),
            temperature,
            max_tokens
        );

        // Dropping the send future on expiry aborts the in-flight request.
        match tokio::time::timeout(self.timeout, self.send(api_key, &payload)).await {
            Ok(result) => result,
            Err(_) => Err(CallError::Timeout(self.timeout)),
        }
    }
}

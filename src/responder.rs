use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    response: String,
}

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

/// HTTP client for the chat backend. One POST per exchange, no streaming.
#[derive(Clone)]
pub struct ResponderClient {
    client: Client,
    base_url: String,
}

impl ResponderClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one user message and return the assistant reply. A non-success
    /// status or a body without a `response` field is an error; the caller
    /// folds every failure into the same fallback.
    pub async fn send(&self, message: &str) -> Result<String> {
        let url = format!("{}/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { message })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "chat request failed with status: {}",
                response.status()
            ));
        }

        let chat_response: ChatResponse = response.json().await?;
        Ok(chat_response.response)
    }

    /// Liveness probe against the backend's /health endpoint.
    pub async fn health(&self) -> Result<String> {
        let url = format!("{}/health", self.base_url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!("health check failed: {}", response.status()));
        }

        let health: HealthResponse = response.json().await?;
        Ok(health.status)
    }
}

use super::traits::ReplyPolisher;
use super::types::PolishConfig;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

const SYSTEM_PROMPT: &str = "You are a helpful real estate assistant. Rewrite the following property information in a friendly, natural way. Keep all facts accurate and don't add information not present in the original text.";

/// Chat-completion backed polisher
pub struct LlmPolisher {
    client: Client,
    api_key: String,
    config: PolishConfig,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

impl LlmPolisher {
    /// Build a polisher; the client timeout bounds every call
    pub fn new(api_key: String, config: PolishConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    async fn request_rewrite(&self, text: &str) -> Result<String> {
        let body = json!({
            "model": &self.config.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": format!("Please polish this property description: {}", text)}
            ],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to reach rewrite service")?;

        if !response.status().is_success() {
            anyhow::bail!("Rewrite service returned status: {}", response.status());
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .context("Failed to parse rewrite response")?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("Rewrite service returned no content"))
    }
}

#[async_trait]
impl ReplyPolisher for LlmPolisher {
    async fn polish(&self, text: &str) -> String {
        match self.request_rewrite(text).await {
            Ok(rewritten) => {
                debug!("Polished reply ({} -> {} chars)", text.len(), rewritten.len());
                rewritten
            }
            Err(e) => {
                warn!("Keeping original reply: {:#}", e);
                text.to_string()
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "llm"
    }
}

//! HTTP chat provider — any OpenAI-compatible chat-completions endpoint.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::chat::ChatTurn;
use crate::config::ChatConfig;

/// Request body for the chat-completions call.
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Calls `{endpoint}/chat/completions` with bearer auth. The endpoint is
/// treated as an opaque text generator — no provider-specific behavior.
pub struct HttpProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl HttpProvider {
    pub fn new(config: &ChatConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .context("http chat provider requires an API key (set COGITO_CHAT_API_KEY)")?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    pub async fn generate(&self, prompt: &str, history: &[ChatTurn]) -> Result<String> {
        let mut messages: Vec<Message<'_>> = history
            .iter()
            .map(|turn| Message {
                role: turn.role.as_str(),
                content: &turn.content,
            })
            .collect();
        messages.push(Message {
            role: "user",
            content: prompt,
        });

        let request = CompletionRequest {
            model: &self.model,
            messages,
        };

        let url = format!("{}/chat/completions", self.endpoint);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("chat request to {url} failed"))?;

        let status = response.status();
        anyhow::ensure!(
            status.is_success(),
            "chat provider returned HTTP {status}"
        );

        let body: CompletionResponse = response
            .json()
            .await
            .context("failed to parse chat provider response")?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .context("chat provider returned no message content")?;

        Ok(content.trim().to_string())
    }
}

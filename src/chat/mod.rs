//! Chat provider abstraction.
//!
//! A [`ChatProvider`] turns a prompt plus conversation history into a
//! response string. Which text generator sits behind it is opaque to the
//! rest of the system: the variant is chosen once from configuration via
//! [`create_provider`], never by inspecting anything at runtime.

pub mod http;
pub mod mock;
pub mod session;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::ChatConfig;

/// Who produced a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One prior turn of conversation, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// The configured text-generation backend.
pub enum ChatProvider {
    /// Deterministic canned responses, no network. Always available.
    Mock(mock::MockProvider),
    /// OpenAI-compatible chat-completions endpoint over HTTP.
    Http(http::HttpProvider),
}

impl ChatProvider {
    /// Generate a response to `prompt`, given prior `history` (oldest first).
    pub async fn generate(&self, prompt: &str, history: &[ChatTurn]) -> Result<String> {
        match self {
            Self::Mock(provider) => Ok(provider.generate(prompt, history)),
            Self::Http(provider) => provider.generate(prompt, history).await,
        }
    }

    /// Short provider name, used for tagging logged turns.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mock(_) => "mock",
            Self::Http(_) => "http",
        }
    }
}

/// Create a chat provider from config.
///
/// `"mock"` needs nothing; `"http"` requires an endpoint and model and
/// fails fast when the API key is missing.
pub fn create_provider(config: &ChatConfig) -> Result<ChatProvider> {
    match config.provider.as_str() {
        "mock" => Ok(ChatProvider::Mock(mock::MockProvider)),
        "http" => {
            let provider = http::HttpProvider::new(config)?;
            Ok(ChatProvider::Http(provider))
        }
        other => anyhow::bail!("unknown chat provider: {other}. Supported: mock, http"),
    }
}

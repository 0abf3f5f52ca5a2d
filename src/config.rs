use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CogitoConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub analysis: AnalysisConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AnalysisConfig {
    /// How many recent thoughts feed the novelty comparison.
    pub history_window: usize,
    /// When false, the emotion column only records caller-declared labels.
    pub enable_emotions: bool,
    /// When false, importance falls back to `default_importance` unless the
    /// caller supplies an explicit value.
    pub enable_importance_scoring: bool,
    pub default_importance: f64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ChatConfig {
    /// Provider selection: "mock" or "http".
    pub provider: String,
    /// Base URL of an OpenAI-compatible chat-completions endpoint.
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Log each chat turn as a thought.
    pub log_turns: bool,
    /// How many prior turns to send back to the provider as context.
    pub context_turns: usize,
}

impl Default for CogitoConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            analysis: AnalysisConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 7407,
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_cogito_dir()
            .join("thoughts.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            history_window: 10,
            enable_emotions: true,
            enable_importance_scoring: true,
            default_importance: 0.5,
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            provider: "mock".into(),
            endpoint: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            api_key: None,
            log_turns: true,
            context_turns: 8,
        }
    }
}

/// Returns `~/.cogito/`
pub fn default_cogito_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".cogito")
}

/// Returns the default config file path: `~/.cogito/config.toml`
pub fn default_config_path() -> PathBuf {
    default_cogito_dir().join("config.toml")
}

impl CogitoConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            CogitoConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (COGITO_DB, COGITO_LOG_LEVEL,
    /// COGITO_CHAT_API_KEY).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("COGITO_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("COGITO_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("COGITO_CHAT_API_KEY") {
            self.chat.api_key = Some(val);
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .expect("home directory must exist")
            .join(rest)
    } else {
        PathBuf::from(path)
    }
}

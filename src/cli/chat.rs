//! CLI `chat` command — interactive session with the configured provider.

use anyhow::Result;

use crate::analysis::Lexicon;
use crate::chat;
use crate::config::CogitoConfig;

pub async fn chat(
    config: &CogitoConfig,
    provider_override: Option<String>,
    no_log: bool,
    use_history: bool,
) -> Result<()> {
    let mut chat_config = config.chat.clone();
    if let Some(provider) = provider_override {
        chat_config.provider = provider;
    }

    let provider = chat::create_provider(&chat_config)?;
    let lexicon = Lexicon::builtin();

    let mut conn = if no_log || !chat_config.log_turns {
        None
    } else {
        Some(super::open_db(config)?)
    };
    if conn.is_none() {
        println!("(logging disabled — this session will not be stored)");
    }

    chat::session::run_session(
        conn.as_mut(),
        &lexicon,
        &config.analysis,
        &provider,
        chat_config.context_turns,
        use_history,
    )
    .await
}

//! Interactive chat REPL for the CLI.
//!
//! Each turn is sent to the configured provider; both sides of the
//! exchange are logged as thoughts (categories `user-input` and
//! `ai-response`) so they flow through the same annotation pipeline as
//! everything else.

use std::io::{BufRead, Write};

use anyhow::Result;
use rusqlite::Connection;

use crate::analysis::{Category, Lexicon};
use crate::chat::{ChatProvider, ChatTurn};
use crate::config::AnalysisConfig;
use crate::thought::store::create_thought;
use crate::thought::types::NewThought;

/// Words that end the session.
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/quit"];

/// Run the interactive loop until EOF or an exit command.
///
/// `conn = None` disables logging for the session. `use_history` controls
/// whether prior turns are replayed to the provider as context.
pub async fn run_session(
    mut conn: Option<&mut Connection>,
    lexicon: &Lexicon,
    settings: &AnalysisConfig,
    provider: &ChatProvider,
    context_turns: usize,
    use_history: bool,
) -> Result<()> {
    println!("Chat session started (provider: {}).", provider.name());
    println!("Type 'exit' to quit.\n");

    let stdin = std::io::stdin();
    let mut turns: Vec<ChatTurn> = Vec::new();

    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let input = line?.trim().to_string();

        if input.is_empty() {
            continue;
        }
        if EXIT_COMMANDS.contains(&input.to_lowercase().as_str()) {
            break;
        }

        let history = if use_history {
            context_window(&turns, context_turns)
        } else {
            &[]
        };

        let reply = match provider.generate(&input, history).await {
            Ok(reply) => reply,
            Err(e) => {
                eprintln!("provider error: {e:#}");
                continue;
            }
        };

        println!("ai>  {reply}\n");

        if let Some(conn) = conn.as_deref_mut() {
            log_turn(conn, lexicon, settings, provider.name(), Category::UserInput, &input)?;
            log_turn(conn, lexicon, settings, provider.name(), Category::AiResponse, &reply)?;
        }

        turns.push(ChatTurn::user(input));
        turns.push(ChatTurn::assistant(reply));
    }

    println!("Session ended ({} turns).", turns.len() / 2);
    Ok(())
}

/// The trailing `limit` turns, oldest first.
fn context_window(turns: &[ChatTurn], limit: usize) -> &[ChatTurn] {
    &turns[turns.len().saturating_sub(limit)..]
}

fn log_turn(
    conn: &mut Connection,
    lexicon: &Lexicon,
    settings: &AnalysisConfig,
    provider_name: &str,
    category: Category,
    content: &str,
) -> Result<()> {
    let new = NewThought {
        category,
        content: content.to_string(),
        tags: vec!["chat".to_string(), provider_name.to_string()],
        ..Default::default()
    };
    let thought = create_thought(conn, lexicon, settings, &new)?;
    tracing::debug!(id = %thought.id, category = %category, "chat turn logged");
    Ok(())
}

//! Deterministic mock provider for offline use and tests.

use crate::chat::ChatTurn;

/// Responds from a fixed set of templates keyed on prompt content. No
/// network, no state, same reply for the same input every time.
pub struct MockProvider;

impl MockProvider {
    pub fn generate(&self, prompt: &str, history: &[ChatTurn]) -> String {
        let lower = prompt.to_lowercase();

        if lower.contains("hello") || lower.contains("hi ") || lower == "hi" {
            return "Hello! I'm a mock assistant — everything I say is canned, \
                    but I'm listening."
                .to_string();
        }
        if lower.contains('?') {
            let topic = prompt.split('?').next().unwrap_or(prompt).trim();
            return format!(
                "Good question. I can't actually reason about \"{topic}\", \
                 but a real provider would take it from here."
            );
        }
        if !history.is_empty() {
            return format!(
                "Noted — that makes {} turns so far. Tell me more.",
                history.len() + 1
            );
        }

        let preview: String = prompt.chars().take(50).collect();
        let ellipsis = if prompt.chars().count() > 50 { "…" } else { "" };
        format!("I hear you: \"{preview}{ellipsis}\". Go on.")
    }
}

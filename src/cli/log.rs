//! CLI `log` command — store one thought from the command line.

use anyhow::Result;

use crate::analysis::{Category, Emotion, Lexicon};
use crate::config::CogitoConfig;
use crate::thought::store::create_thought;
use crate::thought::types::NewThought;

#[allow(clippy::too_many_arguments)]
pub fn log(
    config: &CogitoConfig,
    content: &str,
    category: Category,
    tags: Vec<String>,
    emotion: Option<Emotion>,
    importance: Option<f64>,
) -> Result<()> {
    let mut conn = super::open_db(config)?;
    let lexicon = Lexicon::builtin();

    let new = NewThought {
        category,
        content: content.to_string(),
        tags,
        emotion,
        importance,
    };
    let thought = create_thought(&mut conn, &lexicon, &config.analysis, &new)?;

    println!("Logged thought {}", thought.id);
    println!("  category:   {}", thought.category);
    println!(
        "  emotion:    {}",
        thought
            .emotion
            .map(|e| e.as_str())
            .unwrap_or("(none)")
    );
    println!("  sentiment:  {:+.2}", thought.sentiment);
    println!("  importance: {:.2}", thought.importance);
    if !thought.keywords.is_empty() {
        println!("  keywords:   {}", thought.keywords.join(", "));
    }
    if !thought.tags.is_empty() {
        println!("  tags:       {}", thought.tags.join(", "));
    }

    Ok(())
}

//! Thought record types shared across the store, search, and API layers.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::analysis::{Category, Emotion};

/// Maximum accepted content length, in characters.
pub const MAX_CONTENT_LEN: usize = 10_000;

/// A stored thought with its annotation, matching the `thoughts` table schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thought {
    /// UUID v7 (time-sortable) primary key.
    pub id: String,
    /// Declared category of the entry.
    pub category: Category,
    /// The full text content.
    pub content: String,
    /// Normalized tags: trimmed, lowercased, deduplicated in input order.
    pub tags: Vec<String>,
    /// Emotional label — caller-declared or classified, `None` for flat text.
    pub emotion: Option<Emotion>,
    /// Polarity balance in `[-1.0, 1.0]`.
    pub sentiment: f64,
    /// Lexical/structural complexity in `[0.0, 1.0]`.
    pub complexity: f64,
    /// Inverse similarity to the preceding history window, in `[0.0, 1.0]`.
    pub novelty: f64,
    /// Aggregate significance in `[0.0, 1.0]`.
    pub importance: f64,
    /// Extracted keywords in first-occurrence order.
    pub keywords: Vec<String>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// RFC 3339 last-modification timestamp.
    pub updated_at: String,
}

/// Fields a caller supplies when creating a thought. Everything else is
/// derived by the annotation pipeline.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewThought {
    #[serde(default)]
    pub category: Category,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Explicit emotional label; wins over the classifier when present.
    #[serde(default)]
    pub emotion: Option<Emotion>,
    /// Explicit importance in `[0.0, 1.0]`; wins over the aggregator.
    #[serde(default)]
    pub importance: Option<f64>,
}

/// Partial update for an existing thought. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThoughtUpdate {
    pub category: Option<Category>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub emotion: Option<Emotion>,
    pub importance: Option<f64>,
}

impl ThoughtUpdate {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.content.is_none()
            && self.tags.is_none()
            && self.emotion.is_none()
            && self.importance.is_none()
    }
}

/// Trim, lowercase, drop empties, and deduplicate tags preserving the order
/// of first occurrence.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for tag in tags {
        let cleaned = tag.trim().to_lowercase();
        if !cleaned.is_empty() && seen.insert(cleaned.clone()) {
            out.push(cleaned);
        }
    }
    out
}

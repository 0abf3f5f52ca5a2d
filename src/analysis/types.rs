//! Core annotation type definitions.
//!
//! Defines [`Category`] (the eleven thought categories), [`Emotion`] (the
//! closed set of classifiable emotional labels), [`ThoughtInput`] (what the
//! pipeline consumes), and [`Annotation`] (what it produces).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The eleven thought categories a caller may declare on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// A message typed by the human side of a chat session.
    UserInput,
    /// A response produced by a chat provider.
    AiResponse,
    /// A logged user/assistant exchange pair.
    Conversation,
    /// Free-form introspection — the default category.
    Reflection,
    /// Raw sensory or environmental input.
    Perception,
    /// A committed choice. Weighted high for importance.
    Decision,
    /// Something noticed and written down.
    Observation,
    /// A new concept or proposal.
    Idea,
    /// An open question to revisit.
    Question,
    /// Periodic system heartbeat. Weighted lowest for importance.
    Tick,
    /// A failure report. Weighted high for importance.
    Error,
}

impl Category {
    /// SQL-compatible string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserInput => "user-input",
            Self::AiResponse => "ai-response",
            Self::Conversation => "conversation",
            Self::Reflection => "reflection",
            Self::Perception => "perception",
            Self::Decision => "decision",
            Self::Observation => "observation",
            Self::Idea => "idea",
            Self::Question => "question",
            Self::Tick => "tick",
            Self::Error => "error",
        }
    }

    /// All categories in declaration order.
    pub fn all() -> &'static [Category] {
        &[
            Self::UserInput,
            Self::AiResponse,
            Self::Conversation,
            Self::Reflection,
            Self::Perception,
            Self::Decision,
            Self::Observation,
            Self::Idea,
            Self::Question,
            Self::Tick,
            Self::Error,
        ]
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Reflection
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user-input" => Ok(Self::UserInput),
            "ai-response" => Ok(Self::AiResponse),
            "conversation" => Ok(Self::Conversation),
            "reflection" => Ok(Self::Reflection),
            "perception" => Ok(Self::Perception),
            "decision" => Ok(Self::Decision),
            "observation" => Ok(Self::Observation),
            "idea" => Ok(Self::Idea),
            "question" => Ok(Self::Question),
            "tick" => Ok(Self::Tick),
            "error" => Ok(Self::Error),
            _ => Err(format!("unknown category: {s}")),
        }
    }
}

/// The closed set of emotional labels the classifier can assign.
///
/// Declaration order doubles as the tie-break priority: when two labels
/// score equally, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Excited,
    Confident,
    Frustrated,
    Confused,
    Anxious,
    Calm,
    Sad,
    Neutral,
}

impl Emotion {
    /// SQL-compatible string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Excited => "excited",
            Self::Confident => "confident",
            Self::Frustrated => "frustrated",
            Self::Confused => "confused",
            Self::Anxious => "anxious",
            Self::Calm => "calm",
            Self::Sad => "sad",
            Self::Neutral => "neutral",
        }
    }

    /// All labels in declaration (tie-break priority) order.
    pub fn all() -> &'static [Emotion] {
        &[
            Self::Happy,
            Self::Excited,
            Self::Confident,
            Self::Frustrated,
            Self::Confused,
            Self::Anxious,
            Self::Calm,
            Self::Sad,
            Self::Neutral,
        ]
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy" => Ok(Self::Happy),
            "excited" => Ok(Self::Excited),
            "confident" => Ok(Self::Confident),
            "frustrated" => Ok(Self::Frustrated),
            "confused" => Ok(Self::Confused),
            "anxious" => Ok(Self::Anxious),
            "calm" => Ok(Self::Calm),
            "sad" => Ok(Self::Sad),
            "neutral" => Ok(Self::Neutral),
            _ => Err(format!("unknown emotion: {s}")),
        }
    }
}

/// Input to a single pipeline invocation. Immutable once constructed.
#[derive(Debug, Clone, Copy)]
pub struct ThoughtInput<'a> {
    /// The raw text to analyze. Must contain at least one non-whitespace char.
    pub content: &'a str,
    /// Declared category, used for the importance base weight.
    pub category: Category,
    /// Caller-supplied importance override. A value in `[0.0, 1.0]` is
    /// returned verbatim in the annotation; anything else is ignored.
    pub importance: Option<f64>,
}

impl<'a> ThoughtInput<'a> {
    /// Convenience constructor with no importance override.
    pub fn new(content: &'a str, category: Category) -> Self {
        Self {
            content,
            category,
            importance: None,
        }
    }
}

/// The derived metadata attached to a piece of text.
///
/// Produced once per analyzed text, immutable, owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Best-scoring emotional label, or `None` if no label scored above zero.
    pub emotion: Option<Emotion>,
    /// Polarity balance in `[-1.0, 1.0]`; 0.0 when no polarity words occur.
    pub sentiment: f64,
    /// Lexical/structural complexity in `[0.0, 1.0]`.
    pub complexity: f64,
    /// Inverse of maximum similarity to supplied history, in `[0.0, 1.0]`.
    pub novelty: f64,
    /// Aggregate significance in `[0.0, 1.0]`.
    pub importance: f64,
    /// Deduplicated keywords in first-occurrence order, capped at
    /// [`MAX_KEYWORDS`](crate::analysis::MAX_KEYWORDS).
    pub keywords: Vec<String>,
}

/// Errors the annotation pipeline can produce.
///
/// Degenerate-but-valid inputs (single word, no polarity words, no history)
/// are never errors — each stage falls back to a documented neutral value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// Content was empty or whitespace-only. The caller must supply real text.
    #[error("content is empty or whitespace-only")]
    EmptyContent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_str() {
        for cat in Category::all() {
            let parsed: Category = cat.as_str().parse().unwrap();
            assert_eq!(parsed, *cat);
        }
    }

    #[test]
    fn emotion_round_trips_through_str() {
        for emotion in Emotion::all() {
            let parsed: Emotion = emotion.as_str().parse().unwrap();
            assert_eq!(parsed, *emotion);
        }
    }

    #[test]
    fn unknown_strings_are_rejected() {
        assert!("bogus".parse::<Category>().is_err());
        assert!("bogus".parse::<Emotion>().is_err());
    }

    #[test]
    fn category_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Category::UserInput).unwrap();
        assert_eq!(json, "\"user-input\"");
        let back: Category = serde_json::from_str("\"ai-response\"").unwrap();
        assert_eq!(back, Category::AiResponse);
    }
}

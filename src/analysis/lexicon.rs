//! Static keyword tables driving emotion and sentiment classification.
//!
//! A [`Lexicon`] is built once at process start and never mutated, so it is
//! safe for unsynchronized concurrent reads. All classification state lives
//! here rather than in scattered string comparisons: adding a tenth emotion
//! label means adding one table row below and one enum variant.

use std::collections::{HashMap, HashSet};

use crate::analysis::types::Emotion;

/// Identifier for the built-in tables, stored in `schema_meta` so tools can
/// detect when stored annotations were produced by an older lexicon.
pub const LEXICON_VERSION: &str = "builtin-1";

/// Keywords of this length or more carry [`SPECIFIC_KEYWORD_WEIGHT`].
const SPECIFIC_KEYWORD_LEN: usize = 8;
/// Weight for long, specific keywords ("frustrated" says more than "mad").
const SPECIFIC_KEYWORD_WEIGHT: f64 = 1.5;
/// Weight for everything else.
const BASE_KEYWORD_WEIGHT: f64 = 1.0;

/// Emotion keyword tables in declaration (tie-break priority) order.
const EMOTION_KEYWORDS: &[(Emotion, &[&str])] = &[
    (
        Emotion::Happy,
        &[
            "happy", "joy", "glad", "grateful", "thankful", "thanks", "wonderful", "fantastic",
            "love", "delighted", "pleased", "enjoyed",
        ],
    ),
    (
        Emotion::Excited,
        &[
            "excited", "exciting", "amazing", "wow", "incredible", "thrilled", "awesome",
            "brilliant", "outstanding", "eager",
        ],
    ),
    (
        Emotion::Confident,
        &[
            "confident", "sure", "certain", "definitely", "absolutely", "determined",
            "motivated", "capable",
        ],
    ),
    (
        Emotion::Frustrated,
        &[
            "frustrated", "frustrating", "annoying", "annoyed", "angry", "mad", "terrible",
            "awful", "hate", "irritated",
        ],
    ),
    (
        Emotion::Confused,
        &[
            "confused", "confusing", "unclear", "uncertain", "unsure", "puzzled", "baffled",
            "lost",
        ],
    ),
    (
        Emotion::Anxious,
        &[
            "anxious", "worried", "nervous", "scared", "afraid", "concerned", "stressed",
            "uneasy",
        ],
    ),
    (
        Emotion::Calm,
        &[
            "calm", "peaceful", "relaxed", "serene", "settled", "composed", "tranquil",
            "steady",
        ],
    ),
    (
        Emotion::Sad,
        &[
            "sad", "unhappy", "depressed", "disappointed", "upset", "miserable", "gloomy",
            "lonely",
        ],
    ),
    (
        Emotion::Neutral,
        &["okay", "fine", "alright", "whatever", "ordinary", "unremarkable"],
    ),
];

/// Positive polarity words for sentiment scoring.
const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "fantastic", "love", "like", "enjoy",
    "happy", "excited", "pleased", "satisfied", "awesome", "brilliant", "perfect", "success",
    "achievement", "win", "best",
];

/// Negative polarity words for sentiment scoring.
const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "hate", "dislike", "sad", "angry", "frustrated",
    "disappointed", "failed", "failure", "wrong", "error", "problem", "broken", "worst",
    "struggle", "mess", "painful",
];

/// Words that flip the polarity of a following polarity word.
const NEGATOR_WORDS: &[&str] = &[
    "not", "no", "never", "nothing", "neither", "nor", "hardly", "barely", "don't", "doesn't",
    "didn't", "isn't", "aren't", "wasn't", "weren't", "won't", "can't", "cannot", "couldn't",
    "shouldn't", "wouldn't",
];

/// Common English stop words, filtered out before keyword/emotion matching.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
    "it", "its", "of", "on", "that", "the", "to", "was", "will", "with", "i", "you", "we",
    "they", "this", "but", "or", "not", "have", "had", "what", "when", "where", "who", "which",
    "why", "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "only", "own", "same", "so", "than", "too", "very", "can", "could", "should",
    "would",
];

/// Immutable keyword/weight tables for the annotation pipeline.
pub struct Lexicon {
    emotions: Vec<(Emotion, HashMap<String, f64>)>,
    positive: HashSet<String>,
    negative: HashSet<String>,
    negators: HashSet<String>,
    stop_words: HashSet<String>,
}

impl Lexicon {
    /// Build the built-in English lexicon.
    pub fn builtin() -> Self {
        Self::from_tables(
            EMOTION_KEYWORDS,
            POSITIVE_WORDS,
            NEGATIVE_WORDS,
            NEGATOR_WORDS,
            STOP_WORDS,
        )
    }

    /// Build a lexicon from explicit tables.
    ///
    /// The order of `emotions` entries fixes the classifier's tie-break
    /// priority. Keyword weights are assigned here and never change.
    pub fn from_tables(
        emotions: &[(Emotion, &[&str])],
        positive: &[&str],
        negative: &[&str],
        negators: &[&str],
        stop_words: &[&str],
    ) -> Self {
        let emotions = emotions
            .iter()
            .map(|(emotion, keywords)| {
                let table = keywords
                    .iter()
                    .map(|kw| (kw.to_lowercase(), keyword_weight(kw)))
                    .collect();
                (*emotion, table)
            })
            .collect();

        Self {
            emotions,
            positive: to_set(positive),
            negative: to_set(negative),
            negators: to_set(negators),
            stop_words: to_set(stop_words),
        }
    }

    /// Emotion tables in tie-break priority order.
    pub fn emotion_tables(&self) -> &[(Emotion, HashMap<String, f64>)] {
        &self.emotions
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn is_negator(&self, word: &str) -> bool {
        self.negators.contains(word)
    }

    /// Polarity of a word: `1` positive, `-1` negative, `0` neither.
    pub fn polarity(&self, word: &str) -> i32 {
        if self.positive.contains(word) {
            1
        } else if self.negative.contains(word) {
            -1
        } else {
            0
        }
    }
}

/// Specificity weight for a keyword, fixed at lexicon-build time.
fn keyword_weight(keyword: &str) -> f64 {
    if keyword.chars().count() >= SPECIFIC_KEYWORD_LEN {
        SPECIFIC_KEYWORD_WEIGHT
    } else {
        BASE_KEYWORD_WEIGHT
    }
}

fn to_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

//! Importance aggregation — one scalar from all upstream signals.

use crate::analysis::types::Category;

/// Blend weights for the computed importance score. Must sum to 1.
pub const WEIGHT_SENTIMENT: f64 = 0.20;
pub const WEIGHT_COMPLEXITY: f64 = 0.25;
pub const WEIGHT_NOVELTY: f64 = 0.35;
pub const WEIGHT_CATEGORY: f64 = 0.20;

/// Base significance of each category, in `[0.0, 1.0]`.
///
/// Decisions and errors are the entries most worth surfacing later; ticks
/// are background noise.
pub fn category_weight(category: Category) -> f64 {
    match category {
        Category::Decision => 0.9,
        Category::Error => 0.9,
        Category::Idea => 0.7,
        Category::Question => 0.65,
        Category::Reflection => 0.6,
        Category::Observation => 0.5,
        Category::UserInput => 0.5,
        Category::Perception => 0.45,
        Category::AiResponse => 0.45,
        Category::Conversation => 0.4,
        Category::Tick => 0.1,
    }
}

/// Combine the upstream scores into a single importance value in `[0.0, 1.0]`.
///
/// A caller override inside `[0.0, 1.0]` wins outright — explicit intent is
/// never blended with computed signal. Out-of-range overrides are ignored.
/// Sentiment contributes by magnitude: strongly negative text is as
/// significant as strongly positive text.
pub fn aggregate(
    category: Category,
    sentiment: f64,
    complexity: f64,
    novelty: f64,
    override_importance: Option<f64>,
) -> f64 {
    if let Some(value) = override_importance {
        if (0.0..=1.0).contains(&value) {
            return value;
        }
    }

    let blended = WEIGHT_SENTIMENT * sentiment.abs()
        + WEIGHT_COMPLEXITY * complexity
        + WEIGHT_NOVELTY * novelty
        + WEIGHT_CATEGORY * category_weight(category);

    blended.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let sum = WEIGHT_SENTIMENT + WEIGHT_COMPLEXITY + WEIGHT_NOVELTY + WEIGHT_CATEGORY;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn override_wins_without_blending() {
        assert_eq!(aggregate(Category::Tick, 1.0, 1.0, 1.0, Some(0.05)), 0.05);
        assert_eq!(aggregate(Category::Decision, 0.0, 0.0, 0.0, Some(1.0)), 1.0);
    }

    #[test]
    fn out_of_range_override_is_ignored() {
        let computed = aggregate(Category::Reflection, 0.5, 0.5, 0.5, None);
        assert_eq!(
            aggregate(Category::Reflection, 0.5, 0.5, 0.5, Some(1.5)),
            computed
        );
        assert_eq!(
            aggregate(Category::Reflection, 0.5, 0.5, 0.5, Some(-0.1)),
            computed
        );
    }

    #[test]
    fn sentiment_contributes_by_magnitude() {
        let negative = aggregate(Category::Reflection, -1.0, 0.2, 0.5, None);
        let positive = aggregate(Category::Reflection, 1.0, 0.2, 0.5, None);
        assert_eq!(negative, positive);
    }

    #[test]
    fn decisions_outweigh_ticks() {
        let decision = aggregate(Category::Decision, 0.0, 0.3, 0.5, None);
        let tick = aggregate(Category::Tick, 0.0, 0.3, 0.5, None);
        assert!(decision > tick);
    }

    #[test]
    fn result_is_always_in_unit_range() {
        for category in Category::all() {
            let v = aggregate(*category, 1.0, 1.0, 1.0, None);
            assert!((0.0..=1.0).contains(&v));
        }
    }
}

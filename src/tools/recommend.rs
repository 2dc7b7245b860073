//! Random picks from a fixed recommendation table.

use crate::tools::random::RandomSource;
use crate::tools::registry::{parse_args, Tool};
use crate::types::{Result, ToolError, ToolOutcome};
use async_trait::async_trait;
use rand::seq::IndexedRandom;
use rand::Rng;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// `(name, description)` candidates per category.
pub const RECOMMENDATIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "movie",
        &[
            (
                "The Shawshank Redemption",
                "A timeless classic about hope and friendship",
            ),
            ("Inception", "Mind-bending sci-fi thriller"),
            ("Parasite", "Award-winning social commentary"),
        ],
    ),
    (
        "restaurant",
        &[
            ("The Italian Corner", "Authentic pasta and cozy atmosphere"),
            ("Sushi Master", "Fresh sushi and modern ambiance"),
            ("Green Leaf", "Healthy vegetarian options"),
        ],
    ),
    (
        "book",
        &[
            ("Project Hail Mary", "Exciting sci-fi adventure"),
            ("Atomic Habits", "Practical guide to building good habits"),
            ("The Midnight Library", "Thought-provoking fiction"),
        ],
    ),
];

/// Candidates for a category. Matching is case-insensitive but exact.
pub fn candidates(category: &str) -> Option<&'static [(&'static str, &'static str)]> {
    let category = category.to_lowercase();
    RECOMMENDATIONS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, entries)| *entries)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub name: &'static str,
    pub description: &'static str,
}

/// Pick one entry uniformly. No memory of earlier picks.
pub fn recommend<R: Rng + ?Sized>(category: &str, rng: &mut R) -> ToolOutcome<Recommendation> {
    candidates(category)
        .and_then(|entries| entries.choose(rng))
        .map(|&(name, description)| Recommendation { name, description })
        .ok_or_else(|| ToolError::UnknownCategory(category.to_string()))
}

/// String boundary for [`recommend`].
pub fn make_recommendation<R: Rng + ?Sized>(
    category: &str,
    preferences: &str,
    rng: &mut R,
) -> String {
    match recommend(category, rng) {
        Ok(pick) => {
            let mut result = format!("I recommend: {}\n{}", pick.name, pick.description);
            if !preferences.is_empty() {
                result.push_str(&format!("\n\nBased on your preferences: {}", preferences));
            }
            result
        }
        Err(e) => e.to_string(),
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RecommendationArgs {
    /// The category: 'movie', 'restaurant' or 'book'
    pub category: String,
    /// Optional user preferences or constraints
    #[serde(default)]
    pub preferences: String,
}

pub struct RecommendationTool {
    random: Arc<RandomSource>,
}

impl RecommendationTool {
    pub fn new(random: Arc<RandomSource>) -> Self {
        Self { random }
    }
}

#[async_trait]
impl Tool for RecommendationTool {
    fn name(&self) -> &str {
        "make_recommendation"
    }

    fn description(&self) -> &str {
        "Recommend a movie, restaurant or book, optionally noting the user's preferences"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(RecommendationArgs)).unwrap_or_default()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: RecommendationArgs = parse_args(self.name(), args)?;
        tracing::debug!(category = %args.category, "Making recommendation");
        let text = self
            .random
            .with_rng(|rng| make_recommendation(&args.category, &args.preferences, rng));
        Ok(Value::String(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    #[rstest]
    #[case("movie")]
    #[case("Restaurant")]
    #[case("BOOK")]
    fn test_pick_comes_from_category(#[case] category: &str) {
        let entries = candidates(category).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let text = make_recommendation(category, "", &mut rng);
            assert!(
                entries
                    .iter()
                    .any(|(name, desc)| text == format!("I recommend: {}\n{}", name, desc)),
                "{text}"
            );
        }
    }

    #[test]
    fn test_all_movies_reachable() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(recommend("movie", &mut rng).unwrap().name);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_preferences_are_echoed() {
        let text = make_recommendation("book", "short and funny", &mut StdRng::seed_from_u64(1));
        assert!(text.ends_with("\n\nBased on your preferences: short and funny"));
    }

    #[rstest]
    #[case("unknown")]
    #[case("movies")]
    #[case("mov")]
    #[case("")]
    fn test_unknown_category(#[case] category: &str) {
        let text = make_recommendation(category, "cheap", &mut StdRng::seed_from_u64(1));
        assert_eq!(
            text,
            format!(
                "Sorry, I don't have recommendations for '{}'. Try 'movie', 'restaurant', or 'book'.",
                category
            )
        );
        assert!(!text.contains("I recommend"));
        assert!(!text.contains('$'));
    }
}

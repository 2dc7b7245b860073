//! Basic text statistics.

use crate::tools::registry::{parse_args, Tool};
use crate::types::Result;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStats {
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub words: usize,
    /// Count of `.`, `!` and `?` characters, not a real sentence split.
    pub sentences: usize,
    pub average_word_length: f64,
}

impl TextStats {
    pub fn compute(text: &str) -> Self {
        let characters = text.chars().count();
        let characters_no_spaces = text.chars().filter(|c| *c != ' ').count();
        let words = text.split_whitespace().count();
        let sentences = text.chars().filter(|c| matches!(c, '.' | '!' | '?')).count();

        let average_word_length = if words == 0 {
            0.0
        } else {
            characters_no_spaces as f64 / words as f64
        };

        Self {
            characters,
            characters_no_spaces,
            words,
            sentences,
            average_word_length,
        }
    }
}

impl fmt::Display for TextStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Text Analysis:")?;
        writeln!(f, "- Characters: {} (including spaces)", self.characters)?;
        writeln!(f, "- Characters: {} (excluding spaces)", self.characters_no_spaces)?;
        writeln!(f, "- Words: {}", self.words)?;
        writeln!(f, "- Sentences: {}", self.sentences)?;
        write!(
            f,
            "- Average word length: {:.1} characters",
            self.average_word_length
        )
    }
}

/// String boundary for [`TextStats::compute`].
pub fn analyze_text(text: &str) -> String {
    TextStats::compute(text).to_string()
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AnalyzeTextArgs {
    /// The text to analyze
    pub text: String,
}

pub struct TextAnalyzer;

#[async_trait]
impl Tool for TextAnalyzer {
    fn name(&self) -> &str {
        "analyze_text"
    }

    fn description(&self) -> &str {
        "Count characters, words and sentences in a text and report the average word length"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(AnalyzeTextArgs)).unwrap_or_default()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: AnalyzeTextArgs = parse_args(self.name(), args)?;
        Ok(Value::String(analyze_text(&args.text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let stats = TextStats::compute("");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.sentences, 0);
        assert_eq!(stats.average_word_length, 0.0);

        let report = analyze_text("");
        assert!(report.contains("- Words: 0"));
        assert!(report.contains("- Sentences: 0"));
        assert!(report.contains("0.0 characters"));
    }

    #[test]
    fn test_multi_sentence_text() {
        let stats = TextStats::compute("First sentence. Second sentence! Third sentence?");
        assert_eq!(stats.sentences, 3);
        assert_eq!(stats.words, 6);
        assert_eq!(stats.characters, 48);
        assert_eq!(stats.characters_no_spaces, 43);
    }

    #[test]
    fn test_report_template() {
        assert_eq!(
            analyze_text("Hello world."),
            "Text Analysis:\n\
             - Characters: 12 (including spaces)\n\
             - Characters: 11 (excluding spaces)\n\
             - Words: 2\n\
             - Sentences: 1\n\
             - Average word length: 5.5 characters"
        );
    }

    #[test]
    fn test_repeated_punctuation_overcounts() {
        assert_eq!(TextStats::compute("Wait... what?!").sentences, 5);
    }

    #[test]
    fn test_only_spaces_are_excluded() {
        let stats = TextStats::compute("a\tb\nc");
        assert_eq!(stats.words, 3);
        assert_eq!(stats.characters_no_spaces, 5);
    }

    #[test]
    fn test_characters_count_unicode_scalars() {
        let stats = TextStats::compute("café ü");
        assert_eq!(stats.characters, 6);
        assert_eq!(stats.characters_no_spaces, 5);
    }
}

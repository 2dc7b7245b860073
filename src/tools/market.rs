//! Simulated market data: stock quotes and news headlines.

use crate::tools::random::RandomSource;
use crate::tools::registry::{parse_args, whole_number, Tool};
use crate::types::{Result, ToolError, ToolOutcome};
use async_trait::async_trait;
use rand::seq::index;
use rand::Rng;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Base prices for the supported tickers.
pub const STOCK_PRICES: &[(&str, f64)] = &[
    ("AAPL", 178.50),
    ("GOOGL", 142.30),
    ("MSFT", 380.20),
    ("TSLA", 245.60),
];

/// Maximum absolute jitter applied to a base price.
pub const PRICE_JITTER: f64 = 5.0;

/// Headline categories, searched in this order.
pub const HEADLINES: &[(&str, &[&str])] = &[
    (
        "technology",
        &[
            "New AI breakthrough announced by major tech company",
            "Smartphone sales reach record high in Q4",
            "Cybersecurity experts warn of new threat",
            "Tech giant launches revolutionary product",
        ],
    ),
    (
        "sports",
        &[
            "Local team wins championship in dramatic finish",
            "Star player signs record-breaking contract",
            "Olympic games preparations underway",
            "Underdog team pulls off major upset",
        ],
    ),
    (
        "business",
        &[
            "Stock market reaches new all-time high",
            "Major merger announced between industry leaders",
            "Startup raises $100M in Series B funding",
            "Economic indicators show strong growth",
        ],
    ),
];

/// Category used when no headline category matches the topic.
pub const DEFAULT_NEWS_CATEGORY: &str = "technology";

pub const DEFAULT_NUM_HEADLINES: i64 = 3;

/// Base price for a ticker, matched case-insensitively.
pub fn base_price(symbol: &str) -> Option<f64> {
    let symbol = symbol.to_uppercase();
    STOCK_PRICES
        .iter()
        .find(|(ticker, _)| *ticker == symbol)
        .map(|(_, price)| *price)
}

/// A simulated quote.
#[derive(Debug, Clone, PartialEq)]
pub struct StockQuote {
    pub symbol: String,
    pub price: f64,
}

pub fn quote<R: Rng + ?Sized>(symbol: &str, rng: &mut R) -> ToolOutcome<StockQuote> {
    let base = base_price(symbol).ok_or_else(|| ToolError::UnknownSymbol(symbol.to_string()))?;
    let jitter = rng.random_range(-PRICE_JITTER..=PRICE_JITTER);
    Ok(StockQuote {
        symbol: symbol.to_uppercase(),
        price: base + jitter,
    })
}

/// String boundary for [`quote`].
pub fn get_stock_price<R: Rng + ?Sized>(symbol: &str, rng: &mut R) -> String {
    quote(symbol, rng).map_or_else(
        |e| e.to_string(),
        |q| format!("The current price of {} is ${:.2}", q.symbol, q.price),
    )
}

/// Resolve a free-text topic to a headline category.
///
/// A topic matches when it is a substring of the category name or the other
/// way round (after lowercasing). Falls back to [`DEFAULT_NEWS_CATEGORY`].
pub fn match_news_category(topic: &str) -> (&'static str, &'static [&'static str]) {
    let topic = topic.to_lowercase();
    HEADLINES
        .iter()
        .find(|(category, _)| category.contains(topic.as_str()) || topic.contains(category))
        .or_else(|| {
            HEADLINES
                .iter()
                .find(|(category, _)| *category == DEFAULT_NEWS_CATEGORY)
        })
        .map(|(category, headlines)| (*category, *headlines))
        .unwrap_or(("", &[]))
}

/// Pick up to `count` distinct headlines for `topic`, in random order.
pub fn sample_headlines<R: Rng + ?Sized>(
    topic: &str,
    count: usize,
    rng: &mut R,
) -> Vec<&'static str> {
    let (_, headlines) = match_news_category(topic);
    let amount = count.min(headlines.len());
    index::sample(rng, headlines.len(), amount)
        .into_iter()
        .map(|i| headlines[i])
        .collect()
}

/// String boundary for [`sample_headlines`].
pub fn get_news_headlines<R: Rng + ?Sized>(topic: &str, num_headlines: usize, rng: &mut R) -> String {
    let selected = sample_headlines(topic, num_headlines, rng);
    let mut result = format!("Top {} headlines for '{}':\n", selected.len(), topic);
    for (i, headline) in selected.iter().enumerate() {
        result.push_str(&format!("{}. {}\n", i + 1, headline));
    }
    result
}

// ============= Tool Wrappers =============

#[derive(Debug, Deserialize, JsonSchema)]
pub struct StockPriceArgs {
    /// The stock ticker symbol (e.g. 'AAPL', 'GOOGL')
    pub symbol: String,
}

pub struct StockPriceTool {
    random: Arc<RandomSource>,
}

impl StockPriceTool {
    pub fn new(random: Arc<RandomSource>) -> Self {
        Self { random }
    }
}

#[async_trait]
impl Tool for StockPriceTool {
    fn name(&self) -> &str {
        "get_stock_price"
    }

    fn description(&self) -> &str {
        "Get a simulated current stock price for a ticker symbol (AAPL, GOOGL, MSFT, TSLA)"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(StockPriceArgs)).unwrap_or_default()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: StockPriceArgs = parse_args(self.name(), args)?;
        tracing::debug!(symbol = %args.symbol, "Looking up stock price");
        let text = self
            .random
            .with_rng(|rng| get_stock_price(&args.symbol, rng));
        Ok(Value::String(text))
    }
}

fn default_num_headlines() -> i64 {
    DEFAULT_NUM_HEADLINES
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct NewsHeadlinesArgs {
    /// The news topic to search for
    pub topic: String,
    /// Number of headlines to return
    #[serde(default = "default_num_headlines", deserialize_with = "whole_number")]
    #[schemars(with = "i64")]
    pub num_headlines: i64,
}

pub struct NewsHeadlinesTool {
    random: Arc<RandomSource>,
}

impl NewsHeadlinesTool {
    pub fn new(random: Arc<RandomSource>) -> Self {
        Self { random }
    }
}

#[async_trait]
impl Tool for NewsHeadlinesTool {
    fn name(&self) -> &str {
        "get_news_headlines"
    }

    fn description(&self) -> &str {
        "Get simulated news headlines for a topic (technology, sports, business)"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(NewsHeadlinesArgs)).unwrap_or_default()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: NewsHeadlinesArgs = parse_args(self.name(), args)?;
        let count = usize::try_from(args.num_headlines.max(0)).unwrap_or(usize::MAX);
        tracing::debug!(topic = %args.topic, count, "Fetching headlines");
        let text = self
            .random
            .with_rng(|rng| get_news_headlines(&args.topic, count, rng));
        Ok(Value::String(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn parse_price(text: &str) -> f64 {
        let amount = text.rsplit('$').next().unwrap();
        amount.parse().unwrap()
    }

    #[rstest]
    #[case("AAPL", 178.50)]
    #[case("GOOGL", 142.30)]
    #[case("MSFT", 380.20)]
    #[case("TSLA", 245.60)]
    #[case("tsla", 245.60)]
    fn test_known_symbol_within_jitter(#[case] symbol: &str, #[case] base: f64) {
        let mut rng = rng();
        for _ in 0..50 {
            let text = get_stock_price(symbol, &mut rng);
            assert!(text.contains(&symbol.to_uppercase()));
            let price = parse_price(&text);
            assert!((price - base).abs() <= PRICE_JITTER + 0.005, "{price} vs {base}");
        }
    }

    #[test]
    fn test_price_has_two_decimals() {
        let text = get_stock_price("MSFT", &mut rng());
        let cents = text.rsplit('.').next().unwrap();
        assert_eq!(cents.len(), 2);
    }

    #[rstest]
    #[case("UNKNOWN")]
    #[case("INVALID")]
    #[case("")]
    fn test_unknown_symbol(#[case] symbol: &str) {
        let text = get_stock_price(symbol, &mut rng());
        assert!(text.starts_with("Sorry, I don't have price information for"));
        assert!(text.contains("AAPL, GOOGL, MSFT, or TSLA"));
        assert!(!text.contains('$'));
    }

    #[test]
    fn test_lowercase_symbol_is_uppercased() {
        let quote = quote("googl", &mut rng()).unwrap();
        assert_eq!(quote.symbol, "GOOGL");
    }

    #[rstest]
    #[case("sports", "sports")]
    #[case("SPORTS", "sports")]
    #[case("tech", "technology")]
    #[case("business news", "business")]
    #[case("", "technology")]
    #[case("weather", "technology")]
    fn test_category_matching(#[case] topic: &str, #[case] expected: &str) {
        assert_eq!(match_news_category(topic).0, expected);
    }

    #[test]
    fn test_headline_count_clamped() {
        let mut rng = rng();
        assert_eq!(sample_headlines("sports", 2, &mut rng).len(), 2);
        assert_eq!(sample_headlines("sports", 10, &mut rng).len(), 4);
        assert!(sample_headlines("sports", 0, &mut rng).is_empty());
    }

    #[test]
    fn test_headlines_are_distinct_and_from_category() {
        let (_, business) = match_news_category("business");
        let picked = sample_headlines("business", 4, &mut rng());
        let mut sorted = picked.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 4);
        assert!(picked.iter().all(|h| business.contains(h)));
    }

    #[test]
    fn test_headline_output_format() {
        let text = get_news_headlines("Sports", 2, &mut rng());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Top 2 headlines for 'Sports':");
        assert!(lines[1].starts_with("1. "));
        assert!(lines[2].starts_with("2. "));
        assert_eq!(lines.len(), 3);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_unmatched_topic_uses_fallback_but_echoes_topic() {
        let text = get_news_headlines("gardening", 10, &mut rng());
        assert!(text.starts_with("Top 4 headlines for 'gardening':"));
        let (_, tech) = match_news_category("technology");
        for line in text.lines().skip(1) {
            let headline = line.split_once(". ").unwrap().1;
            assert!(tech.contains(&headline));
        }
    }

    #[tokio::test]
    async fn test_negative_count_returns_no_headlines() {
        let tool = NewsHeadlinesTool::new(Arc::new(RandomSource::seeded(1)));
        let value = tool
            .execute(serde_json::json!({"topic": "sports", "num_headlines": -2}))
            .await
            .unwrap();
        assert_eq!(value.as_str().unwrap(), "Top 0 headlines for 'sports':\n");
    }

    #[tokio::test]
    async fn test_default_headline_count() {
        let tool = NewsHeadlinesTool::new(Arc::new(RandomSource::seeded(1)));
        let value = tool
            .execute(serde_json::json!({"topic": "business"}))
            .await
            .unwrap();
        assert!(value.as_str().unwrap().starts_with("Top 3 headlines"));
    }
}

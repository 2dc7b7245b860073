//! Built-in Tools for Agent Capabilities
//!
//! Every tool here is a small, synchronous function that takes primitive
//! arguments and produces a human-readable string. The orchestration layer
//! calls them by name through the [`registry`](crate::tools::registry) and
//! embeds the returned text verbatim into the conversation.
//!
//! # Module Structure
//!
//! - [`market`](crate::tools::market) - Simulated stock quotes and news headlines
//! - [`calculator`](crate::tools::calculator) - Tip calculation and temperature conversion
//! - [`text`](crate::tools::text) - Character, word and sentence statistics
//! - [`recommend`](crate::tools::recommend) - Movie, restaurant and book picks
//! - [`shopping`](crate::tools::shopping) - Shopping list confirmation
//! - [`random`](crate::tools::random) - Injectable random source
//! - [`registry`](crate::tools::registry) - Tool registration and dispatch
//!
//! # Error Channel
//!
//! Validation failures (a negative bill, an unknown ticker) are not Rust
//! errors at the boundary: the tool still succeeds and returns text such as
//! `"Error: Bill amount cannot be negative."`. Internally each tool has a typed
//! function returning [`ToolOutcome`](crate::types::ToolOutcome), and the
//! string form is rendered from it. Only registry failures (unknown tool,
//! malformed arguments) surface as [`AppError`](crate::types::AppError).
//!
//! ```ignore
//! let registry = ToolRegistry::with_default_tools();
//! let tools = registry.get_tool_definitions();  // JSON schemas for function calling
//! let text = registry
//!     .execute("calculate_tip", json!({"bill_amount": 50, "tip_percentage": 20}))
//!     .await?;
//! ```

/// Tip calculator and temperature converter.
pub mod calculator;
/// Stock price and news headline simulation.
pub mod market;
/// Random source shared by the randomized tools.
pub mod random;
/// Recommendation picker.
pub mod recommend;
/// Tool registry for managing available tools.
pub mod registry;
/// Shopping list tool.
pub mod shopping;
/// Text statistics.
pub mod text;

pub use calculator::{calculate_tip, convert_temperature, TemperatureUnit};
pub use market::{get_news_headlines, get_stock_price};
pub use random::RandomSource;
pub use recommend::make_recommendation;
pub use registry::{Tool, ToolRegistry};
pub use shopping::add_to_shopping_list;
pub use text::analyze_text;

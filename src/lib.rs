//! # toolsmith
//!
//! Deterministic tool functions for LLM agents, a JSON function-calling
//! registry around them, and a catalog of agent trees that use them.
//!
//! ## Overview
//!
//! Every tool is a plain Rust function returning a typed result. The
//! [`ToolRegistry`] adapts those functions to the JSON boundary an agent
//! framework expects: arguments arrive as a JSON object and the result is a
//! single human-readable string. Invalid input never raises past the
//! boundary; it comes back as an error sentence the model can read.
//!
//! ## Quick Start
//!
//! ```rust
//! use toolsmith::tools::{calculate_tip, convert_temperature};
//!
//! let tip = calculate_tip(50.0, 20.0);
//! assert_eq!(tip, "Bill Amount: $50.00\nTip (20.0%): $10.00\nTotal: $60.00");
//!
//! let reading = convert_temperature(100.0, "C", "F");
//! assert_eq!(reading, "100.0°C = 212.00°F");
//! ```
//!
//! ### Through the registry
//!
//! ```rust,ignore
//! use serde_json::json;
//! use toolsmith::ToolRegistry;
//!
//! let registry = ToolRegistry::with_default_tools();
//! let text = registry
//!     .execute("analyze_text", json!({"text": "Hello world."}))
//!     .await?;
//! ```
//!
//! ## Modules
//!
//! - [`tools`] - Tool functions, randomness and the registry
//! - [`agents`] - Agent specifications and the built-in trees
//! - [`cli`] - Command-line parsing and terminal output
//! - [`types`] - Tool wire types and error handling
//! - [`utils`] - TOML configuration

#![warn(rustdoc::missing_crate_level_docs)]

/// Agent specifications and the built-in agent trees.
pub mod agents;
/// Command-line interface for the `toolsmith` binary.
pub mod cli;
/// Built-in tools and the tool registry.
pub mod tools;
/// Core types (tool calls, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use agents::{AgentSpec, Architecture};
pub use tools::registry::ToolRegistry;
pub use tools::RandomSource;
pub use types::{AppError, Result, ToolError};
pub use utils::config::ToolkitConfig;

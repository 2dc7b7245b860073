use serde::{Deserialize, Serialize};

// ============= Tool Types =============

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

/// Outcome of a single [`ToolCall`], as handed back to the orchestration layer.
///
/// `result` holds the tool's text on success. Registry-level failures (unknown
/// tool, malformed arguments) land in `error` instead.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub result: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success(tool_call_id: impl Into<String>, result: serde_json::Value) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            result,
            error: None,
        }
    }

    pub fn failure(tool_call_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            result: serde_json::Value::Null,
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

// ============= Tool-Level Errors =============

/// Validation and lookup failures reported by the built-in tools.
///
/// The `Display` text of each variant is exactly what the string boundary
/// returns to the caller, so these never escape as Rust errors from a tool.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ToolError {
    #[error("Error: Bill amount cannot be negative.")]
    NegativeBill,

    #[error("Error: Tip percentage must be between 0 and 100.")]
    TipPercentageOutOfRange(f64),

    #[error("Error: Unknown temperature unit '{0}'. Use C, F, or K.")]
    UnknownTemperatureUnit(String),

    #[error(
        "Sorry, I don't have price information for {0}. Try AAPL, GOOGL, MSFT, or TSLA."
    )]
    UnknownSymbol(String),

    #[error(
        "Sorry, I don't have recommendations for '{0}'. Try 'movie', 'restaurant', or 'book'."
    )]
    UnknownCategory(String),

    #[error("Error: Quantity must be at least 1.")]
    InvalidQuantity(i64),

    #[error("Error: Item name cannot be empty.")]
    EmptyItem,
}

/// Result type for the typed (non-string) tool functions.
pub type ToolOutcome<T> = std::result::Result<T, ToolError>;

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

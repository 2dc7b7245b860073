use crate::tools::calculator::{TemperatureConverter, TipCalculator};
use crate::tools::market::{NewsHeadlinesTool, StockPriceTool};
use crate::tools::random::RandomSource;
use crate::tools::recommend::RecommendationTool;
use crate::tools::shopping::ShoppingListTool;
use crate::tools::text::TextAnalyzer;
use crate::types::{AppError, Result, ToolCall, ToolDefinition, ToolResult};
use crate::utils::config::ToolkitConfig;
use async_trait::async_trait;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Names of every tool shipped with the crate.
pub const BUILTIN_TOOL_NAMES: &[&str] = &[
    "add_to_shopping_list",
    "analyze_text",
    "calculate_tip",
    "convert_temperature",
    "get_news_headlines",
    "get_stock_price",
    "make_recommendation",
];

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters_schema(&self) -> Value;
    async fn execute(&self, args: Value) -> Result<Value>;
}

/// Deserialize tool arguments, mapping failures to [`AppError::InvalidInput`].
pub fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T> {
    serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments for {}: {}", tool, e)))
}

/// Read an integer argument that may arrive as a whole float such as `2.0`.
pub fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = number.as_i64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        _ => Err(D::Error::custom(format!("expected a whole number, got {}", number))),
    }
}

/// Instantiate every built-in tool, sharing one random source.
pub fn builtin_tools(random: Arc<RandomSource>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(StockPriceTool::new(random.clone())),
        Arc::new(NewsHeadlinesTool::new(random.clone())),
        Arc::new(TipCalculator),
        Arc::new(TemperatureConverter),
        Arc::new(TextAnalyzer),
        Arc::new(RecommendationTool::new(random)),
        Arc::new(ShoppingListTool),
    ]
}

pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    descriptions: HashMap<String, String>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            descriptions: HashMap::new(),
        }
    }

    /// Create a new registry with every built-in tool, using fresh entropy per call
    pub fn with_default_tools() -> Self {
        Self::with_random_source(RandomSource::Entropy)
    }

    /// Create a registry with every built-in tool drawing from `random`
    pub fn with_random_source(random: RandomSource) -> Self {
        let mut registry = Self::new();
        for tool in builtin_tools(Arc::new(random)) {
            registry.register(tool);
        }
        registry
    }

    /// Create a registry from configuration: only enabled tools, seeded when
    /// `[random] seed` is set, descriptions overridden where configured.
    pub fn with_config(config: &ToolkitConfig) -> Self {
        let random = Arc::new(RandomSource::from_seed(config.random.seed));
        let mut registry = Self::new();

        for tool in builtin_tools(random) {
            let name = tool.name().to_string();
            let settings = config.tools.get(&name);

            if settings.is_some_and(|s| !s.enabled) {
                tracing::debug!(tool = %name, "Tool disabled by configuration");
                continue;
            }
            if let Some(description) = settings.and_then(|s| s.description.clone()) {
                registry.descriptions.insert(name, description);
            }
            registry.register(tool);
        }

        tracing::debug!(
            tools = registry.tools.len(),
            seeded = config.random.seed.is_some(),
            "Tool registry initialized"
        );
        registry
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Tool definitions for function calling, sorted by name
    pub fn get_tool_definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: self
                    .descriptions
                    .get(tool.name())
                    .cloned()
                    .unwrap_or_else(|| tool.description().to_string()),
                parameters: tool.parameters_schema(),
            })
            .collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    pub async fn execute(&self, name: &str, args: Value) -> Result<Value> {
        if let Some(tool) = self.tools.get(name) {
            tracing::debug!(tool = name, "Executing tool");
            tool.execute(args).await
        } else {
            tracing::warn!(tool = name, "Requested tool is not registered");
            Err(AppError::NotFound(format!("Tool not found: {}", name)))
        }
    }

    /// Execute a call and wrap the outcome for the orchestration layer
    pub async fn execute_call(&self, call: &ToolCall) -> ToolResult {
        match self.execute(&call.name, call.arguments.clone()).await {
            Ok(value) => ToolResult::success(&call.id, value),
            Err(e) => ToolResult::failure(&call.id, e.to_string()),
        }
    }

    /// Execute independent calls concurrently; results keep the order of `calls`
    pub async fn execute_batch(&self, calls: &[ToolCall]) -> Vec<ToolResult> {
        futures::future::join_all(calls.iter().map(|call| self.execute_call(call))).await
    }

    /// Get a sorted list of all registered tool names
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a tool is registered
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }
}

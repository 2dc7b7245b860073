//! TOML-based configuration for toolsmith
//!
//! Declares logging, the language-model backend the agents are meant to run
//! on, the random seed, per-tool switches and the default agent architecture
//! via a TOML file (`toolsmith.toml`). Every section is optional; a missing
//! file yields the built-in defaults.

use crate::agents::catalog::Architecture;
use crate::tools::registry::BUILTIN_TOOL_NAMES;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "toolsmith.toml";

/// Root configuration structure loaded from toolsmith.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolkitConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub random: RandomConfig,

    /// Per-tool settings keyed by tool name
    #[serde(default)]
    pub tools: HashMap<String, ToolConfig>,

    #[serde(default)]
    pub agents: AgentsConfig,
}

// ============= Logging Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable logs
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ============= Model Configuration =============

/// Backend the agent definitions target. Values are read from the
/// environment (after `.env` is loaded) so secrets stay out of the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Environment variable holding the model name
    #[serde(default = "default_model_env")]
    pub model_env: String,

    /// Model used when `model_env` is unset
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Environment variable holding the API base URL
    #[serde(default = "default_base_url_env")]
    pub base_url_env: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_provider() -> String {
    "ollama".to_string()
}

fn default_model_env() -> String {
    "OLLAMA_MODEL".to_string()
}

fn default_model() -> String {
    "llama3.2".to_string()
}

fn default_base_url_env() -> String {
    "OLLAMA_API_BASE".to_string()
}

fn default_api_key_env() -> String {
    "OLLAMA_API_KEY".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model_env: default_model_env(),
            default_model: default_model(),
            base_url_env: default_base_url_env(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Model settings after environment lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    /// Fully qualified model id, e.g. `ollama_chat/llama3.2`
    pub model: String,
    pub api_base: Option<String>,
    pub api_key_set: bool,
}

impl ModelConfig {
    pub fn resolve(&self) -> ResolvedModel {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve using an arbitrary lookup instead of the process environment
    pub fn resolve_with(&self, lookup: impl Fn(&str) -> Option<String>) -> ResolvedModel {
        let name = lookup(&self.model_env)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.default_model.clone());
        let prefix = if self.provider == "ollama" {
            "ollama_chat"
        } else {
            self.provider.as_str()
        };

        ResolvedModel {
            model: format!("{}/{}", prefix, name),
            api_base: lookup(&self.base_url_env),
            api_key_set: lookup(&self.api_key_env).is_some(),
        }
    }
}

// ============= Random Configuration =============

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RandomConfig {
    /// Seed for reproducible stock jitter, headline and recommendation picks
    #[serde(default)]
    pub seed: Option<u64>,
}

// ============= Tool Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Replaces the built-in description in tool definitions
    #[serde(default)]
    pub description: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            description: None,
        }
    }
}

// ============= Agent Configuration =============

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentsConfig {
    /// Architecture shown when none is given on the command line
    #[serde(default)]
    pub root: Architecture,
}

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Tool '{0}' in [tools] is not a known tool")]
    UnknownTool(String),
}

impl ToolkitConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(&path) {
            Err(ConfigError::FileNotFound(path)) => {
                debug!(path = %path.display(), "No configuration file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ToolkitConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        LevelFilter::from_str(&self.logging.level).map_err(|_| {
            ConfigError::ValidationError(format!(
                "Unknown log level '{}' (expected trace, debug, info, warn, error or off)",
                self.logging.level
            ))
        })?;

        for name in self.tools.keys() {
            if !BUILTIN_TOOL_NAMES.contains(&name.as_str()) {
                return Err(ConfigError::UnknownTool(name.clone()));
            }
        }

        if self.model.default_model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "model.default_model must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Get tool config by name
    pub fn get_tool(&self, name: &str) -> Option<&ToolConfig> {
        self.tools.get(name)
    }

    /// Names of the built-in tools this configuration leaves enabled
    pub fn enabled_tools(&self) -> Vec<&'static str> {
        BUILTIN_TOOL_NAMES
            .iter()
            .copied()
            .filter(|name| self.get_tool(name).map(|t| t.enabled).unwrap_or(true))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> String {
        r#"
[logging]
level = "debug"
json = true

[model]
provider = "ollama"
default_model = "granite4:tiny-h"

[random]
seed = 42

[tools.get_stock_price]
enabled = false

[tools.analyze_text]
description = "Text statistics"

[agents]
root = "parallel"
"#
        .to_string()
    }

    #[test]
    fn test_parse_config() {
        let config = ToolkitConfig::from_toml(&create_test_config()).expect("Failed to parse config");

        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.random.seed, Some(42));
        assert_eq!(config.agents.root, Architecture::Parallel);
        assert!(!config.get_tool("get_stock_price").unwrap().enabled);
        assert!(config.get_tool("analyze_text").unwrap().enabled);
        assert!(!config.enabled_tools().contains(&"get_stock_price"));
        assert_eq!(config.enabled_tools().len(), BUILTIN_TOOL_NAMES.len() - 1);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ToolkitConfig::from_toml("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.random.seed, None);
        assert_eq!(config.agents.root, Architecture::Hierarchical);
        assert_eq!(config.model.model_env, "OLLAMA_MODEL");
    }

    #[test]
    fn test_unknown_tool_rejected() {
        let err = ToolkitConfig::from_toml("[tools.web_search]\nenabled = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTool(name) if name == "web_search"));
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let err = ToolkitConfig::from_toml("[logging]\nlevel = \"loud\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_unknown_architecture_is_parse_error() {
        let err = ToolkitConfig::from_toml("[agents]\nroot = \"mesh\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(matches!(
            ToolkitConfig::load(&path),
            Err(ConfigError::FileNotFound(_))
        ));
        assert!(ToolkitConfig::load_or_default(&path).is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, create_test_config()).unwrap();

        let config = ToolkitConfig::load(&path).unwrap();
        assert_eq!(config.random.seed, Some(42));
    }

    #[test]
    fn test_resolve_model() {
        let model = ModelConfig::default();

        let resolved = model.resolve_with(|name| match name {
            "OLLAMA_MODEL" => Some("qwen3".to_string()),
            "OLLAMA_API_BASE" => Some("http://localhost:11434".to_string()),
            _ => None,
        });
        assert_eq!(resolved.model, "ollama_chat/qwen3");
        assert_eq!(resolved.api_base.as_deref(), Some("http://localhost:11434"));
        assert!(!resolved.api_key_set);

        let fallback = model.resolve_with(|_| None);
        assert_eq!(fallback.model, "ollama_chat/llama3.2");
        assert_eq!(fallback.api_base, None);
    }
}

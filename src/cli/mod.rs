//! CLI module for toolsmith
//!
//! Provides command-line interface parsing for the toolsmith binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;

use crate::agents::Architecture;
use crate::utils::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// toolsmith - tools for LLM agents
///
/// Inspect and invoke the built-in agent tools, and browse the static agent
/// trees that use them.
#[derive(Parser, Debug)]
#[command(
    name = "toolsmith",
    version,
    about = "toolsmith - deterministic tools for LLM agents",
    long_about = "Inspect and invoke the built-in agent tools (stock prices, headlines, tips,\n\
                  temperature conversion, text statistics, recommendations) and browse the\n\
                  hierarchical, sequential and parallel agent trees that use them.",
    after_help = "EXAMPLES:\n    \
                  toolsmith tools list\n    \
                  toolsmith tools call calculate_tip --args '{\"bill_amount\": 50}'\n    \
                  toolsmith agents show parallel\n    \
                  toolsmith --seed 7 tools call get_stock_price --args '{\"symbol\": \"AAPL\"}'"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Seed for the random tools (overrides [random] seed)
    #[arg(long, global = true, env = "TOOLSMITH_SEED")]
    pub seed: Option<u64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect and invoke tools
    #[command(subcommand)]
    Tools(ToolCommands),

    /// Browse the built-in agent trees
    #[command(subcommand)]
    Agents(AgentCommands),

    /// Show configuration information
    Config {
        /// Only validate the configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// Tool subcommands
#[derive(Subcommand, Debug)]
pub enum ToolCommands {
    /// List all enabled tools
    List,

    /// Print the JSON parameter schema of a tool
    Schema {
        /// Name of the tool
        name: String,
    },

    /// Call a tool and print its output
    Call {
        /// Name of the tool
        name: String,

        /// Arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
}

/// Agent subcommands
#[derive(Subcommand, Debug)]
pub enum AgentCommands {
    /// List the available architectures
    List,

    /// Show the agent tree of an architecture
    Show {
        /// Architecture to show (defaults to [agents] root)
        #[arg(value_enum)]
        architecture: Option<Architecture>,

        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate every architecture against the enabled tools
    Validate,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tool_call() {
        let cli = Cli::try_parse_from([
            "toolsmith",
            "--seed",
            "3",
            "tools",
            "call",
            "analyze_text",
            "--args",
            r#"{"text": "hi"}"#,
        ])
        .unwrap();

        assert_eq!(cli.seed, Some(3));
        match cli.command {
            Commands::Tools(ToolCommands::Call { name, args }) => {
                assert_eq!(name, "analyze_text");
                assert_eq!(args, r#"{"text": "hi"}"#);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_agents_show() {
        let cli = Cli::try_parse_from(["toolsmith", "agents", "show", "sequential"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Agents(AgentCommands::Show {
                architecture: Some(Architecture::Sequential),
                json: false
            })
        ));
    }

    #[test]
    fn test_unknown_architecture_rejected() {
        assert!(Cli::try_parse_from(["toolsmith", "agents", "show", "mesh"]).is_err());
    }
}

//! toolsmith CLI entry point
//!
//! - `toolsmith tools list|schema|call` - inspect and invoke tools
//! - `toolsmith agents list|show|validate` - browse the built-in agent trees
//! - `toolsmith config` - show or validate configuration

use anyhow::{anyhow, bail, Context, Result};
use serde_json::Value;
use std::path::Path;
use toolsmith::agents::catalog::{root_agent, Architecture};
use toolsmith::cli::output::Output;
use toolsmith::cli::{AgentCommands, Cli, Commands, ToolCommands};
use toolsmith::tools::registry::BUILTIN_TOOL_NAMES;
use toolsmith::utils::config::{LoggingConfig, ToolkitConfig};
use toolsmith::ToolRegistry;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    if let Err(e) = run(cli, &output).await {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    dotenvy::dotenv().ok();

    let path = cli.config.clone();
    let mut config = ToolkitConfig::load_or_default(&path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    if let Some(seed) = cli.seed {
        config.random.seed = Some(seed);
    }

    init_logging(&config.logging, cli.verbose);
    tracing::debug!(config = %path.display(), "Starting toolsmith");

    match cli.command {
        Commands::Tools(command) => handle_tools(command, &config, output).await,
        Commands::Agents(command) => handle_agents(command, &config, output),
        Commands::Config { validate } => handle_config(&path, &config, validate, output),
    }
}

/// Logs go to stderr so tool output on stdout stays clean. `RUST_LOG` wins
/// over the configured level.
fn init_logging(config: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("toolsmith={}", level)));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

async fn handle_tools(command: ToolCommands, config: &ToolkitConfig, output: &Output) -> Result<()> {
    let registry = ToolRegistry::with_config(config);

    match command {
        ToolCommands::List => {
            output.header("Tools");
            output.table_header(&["Name", "Description"]);
            for def in registry.get_tool_definitions() {
                output.table_row(&[def.name.as_str(), def.description.as_str()]);
            }
            for name in BUILTIN_TOOL_NAMES.iter().filter(|n| !registry.has_tool(n)) {
                output.info(&format!("{} is disabled by configuration", name));
            }
            output.hint("Run 'toolsmith tools schema <name>' to see a tool's parameters");
        }
        ToolCommands::Schema { name } => {
            let def = registry
                .get_tool_definitions()
                .into_iter()
                .find(|d| d.name == name)
                .ok_or_else(|| anyhow!("Tool not found: {}", name))?;
            output.raw(&serde_json::to_string_pretty(&def.parameters)?);
        }
        ToolCommands::Call { name, args } => {
            let args: Value = serde_json::from_str(&args)
                .with_context(|| format!("Arguments for {} are not valid JSON", name))?;
            if !args.is_object() {
                bail!("Arguments for {} must be a JSON object", name);
            }

            let value = registry.execute(&name, args).await?;
            match value {
                Value::String(text) => output.raw(&text),
                other => output.raw(&serde_json::to_string_pretty(&other)?),
            }
        }
    }
    Ok(())
}

fn handle_agents(command: AgentCommands, config: &ToolkitConfig, output: &Output) -> Result<()> {
    match command {
        AgentCommands::List => {
            output.header("Architectures");
            for arch in Architecture::ALL {
                let label = if arch == config.agents.root {
                    format!("{} (default)", arch)
                } else {
                    arch.to_string()
                };
                output.kv(&label, arch.summary());
            }
        }
        AgentCommands::Show { architecture, json } => {
            let architecture = architecture.unwrap_or(config.agents.root);
            let root = root_agent(architecture);

            if json {
                output.raw(&serde_json::to_string_pretty(&root)?);
                return Ok(());
            }

            output.header(&format!("{} architecture", architecture));
            output.block(&root.render_tree());

            let model = config.model.resolve();
            output.kv("Model", &model.model);
            output.kv("Agents", &root.agent_count().to_string());
            let keys = root.output_keys();
            if !keys.is_empty() {
                output.kv("State keys", &keys.join(", "));
            }
        }
        AgentCommands::Validate => {
            let registry = ToolRegistry::with_config(config);
            let mut failures = 0;

            for arch in Architecture::ALL {
                match root_agent(arch).validate(&registry) {
                    Ok(()) => output.success(&format!("{} is valid", arch)),
                    Err(e) => {
                        failures += 1;
                        output.error(&format!("{}: {}", arch, e));
                    }
                }
            }

            if failures > 0 {
                bail!("{} architecture(s) failed validation", failures);
            }
        }
    }
    Ok(())
}

fn handle_config(
    path: &Path,
    config: &ToolkitConfig,
    validate: bool,
    output: &Output,
) -> Result<()> {
    if validate {
        if !path.exists() {
            bail!("Configuration file not found: {}", path.display());
        }
        output.success(&format!("{} is valid", path.display()));
        return Ok(());
    }

    output.header("Configuration");
    if !path.exists() {
        output.warning(&format!("{} not found, using defaults", path.display()));
    }
    output.kv("File", &path.display().to_string());
    output.kv("Log level", &config.logging.level);

    let model = config.model.resolve();
    output.kv("Model", &model.model);
    output.kv(
        "API base",
        model.api_base.as_deref().unwrap_or("(provider default)"),
    );
    output.kv("API key", if model.api_key_set { "set" } else { "not set" });

    let seed = config
        .random
        .seed
        .map(|s| s.to_string())
        .unwrap_or_else(|| "none (entropy)".to_string());
    output.kv("Random seed", &seed);
    output.kv("Root architecture", config.agents.root.as_str());

    output.header("Enabled tools");
    for name in config.enabled_tools() {
        output.list_item(name);
    }
    Ok(())
}

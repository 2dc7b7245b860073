//! Static agent definitions
//!
//! The tools in this crate are meant to be driven by an external agent
//! framework. This module describes the agent trees that framework is given
//! (names, instructions, tool lists, sub-agents and the session-state keys
//! they write) as plain data, and checks that a tree is well formed before it
//! is handed over. Nothing here talks to a model.
//!
//! Three composition styles are covered:
//!
//! - [`AgentKind::Llm`] agents delegate to their sub-agents at the model's
//!   discretion (hierarchical routing).
//! - [`AgentKind::Sequential`] agents run their sub-agents in order; later
//!   steps read earlier outputs through `{key}` placeholders.
//! - [`AgentKind::Parallel`] agents run their sub-agents side by side, so no
//!   child may depend on a sibling's output.

pub mod catalog;

pub use catalog::Architecture;

use crate::tools::registry::ToolRegistry;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Llm,
    Sequential,
    Parallel,
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Llm => "llm",
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSpec {
    pub name: String,
    pub kind: AgentKind,
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub instruction: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
    /// Session-state key the agent's final answer is stored under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_key: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_agents: Vec<AgentSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Agent name '{0}' is used more than once")]
    DuplicateName(String),

    #[error("Output key '{0}' is written by more than one agent")]
    DuplicateOutputKey(String),

    #[error("LLM agent '{0}' has no instruction")]
    MissingInstruction(String),

    #[error("Workflow agent '{0}' has no sub-agents")]
    EmptyWorkflow(String),

    #[error("Workflow agent '{0}' cannot own tools")]
    WorkflowWithTools(String),

    #[error("Tool '{0}' referenced by agent '{1}' does not exist")]
    MissingTool(String, String),

    #[error("Agent '{1}' reads '{{{0}}}' but no agent writes that key")]
    UnknownStateKey(String, String),

    #[error("Agent '{1}' reads its own output key '{0}'")]
    SelfReference(String, String),

    #[error("Agent '{1}' reads '{0}' before pipeline '{2}' has produced it")]
    OrderViolation(String, String, String),

    #[error("Agent '{1}' reads '{0}' from a sibling in parallel agent '{2}'")]
    ParallelDependency(String, String, String),
}

impl AgentSpec {
    /// An LLM agent with an instruction
    pub fn llm(name: &str, description: &str, instruction: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: AgentKind::Llm,
            description: description.to_string(),
            instruction: instruction.trim().to_string(),
            tools: Vec::new(),
            output_key: None,
            sub_agents: Vec::new(),
        }
    }

    /// A workflow agent running `sub_agents` in order
    pub fn sequential(name: &str, description: &str, sub_agents: Vec<AgentSpec>) -> Self {
        Self::workflow(AgentKind::Sequential, name, description, sub_agents)
    }

    /// A workflow agent running `sub_agents` concurrently
    pub fn parallel(name: &str, description: &str, sub_agents: Vec<AgentSpec>) -> Self {
        Self::workflow(AgentKind::Parallel, name, description, sub_agents)
    }

    fn workflow(kind: AgentKind, name: &str, description: &str, sub_agents: Vec<AgentSpec>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: description.to_string(),
            instruction: String::new(),
            tools: Vec::new(),
            output_key: None,
            sub_agents,
        }
    }

    pub fn with_tools(mut self, tools: &[&str]) -> Self {
        self.tools = tools.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_output_key(mut self, key: &str) -> Self {
        self.output_key = Some(key.to_string());
        self
    }

    pub fn with_sub_agents(mut self, sub_agents: Vec<AgentSpec>) -> Self {
        self.sub_agents = sub_agents;
        self
    }

    /// Depth-first iterator over this agent and all descendants
    pub fn iter(&self) -> impl Iterator<Item = &AgentSpec> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.sub_agents.iter().rev());
            Some(next)
        })
    }

    pub fn agent_count(&self) -> usize {
        self.iter().count()
    }

    pub fn find(&self, name: &str) -> Option<&AgentSpec> {
        self.iter().find(|agent| agent.name == name)
    }

    /// All session-state keys written in this tree, in depth-first order
    pub fn output_keys(&self) -> Vec<&str> {
        self.iter()
            .filter_map(|agent| agent.output_key.as_deref())
            .collect()
    }

    /// `{key}` placeholders referenced by this agent's instruction
    pub fn state_reads(&self) -> Vec<&str> {
        placeholders(&self.instruction)
    }

    /// Check the tree is well formed and every tool it names is registered
    pub fn validate(&self, registry: &ToolRegistry) -> Result<(), CatalogError> {
        let mut names = HashSet::new();
        let mut keys = HashSet::new();

        for agent in self.iter() {
            if !names.insert(agent.name.as_str()) {
                return Err(CatalogError::DuplicateName(agent.name.clone()));
            }
            if let Some(key) = agent.output_key.as_deref() {
                if !keys.insert(key) {
                    return Err(CatalogError::DuplicateOutputKey(key.to_string()));
                }
            }

            match agent.kind {
                AgentKind::Llm if agent.instruction.is_empty() => {
                    return Err(CatalogError::MissingInstruction(agent.name.clone()));
                }
                AgentKind::Sequential | AgentKind::Parallel => {
                    if agent.sub_agents.is_empty() {
                        return Err(CatalogError::EmptyWorkflow(agent.name.clone()));
                    }
                    if !agent.tools.is_empty() {
                        return Err(CatalogError::WorkflowWithTools(agent.name.clone()));
                    }
                }
                AgentKind::Llm => {}
            }

            if let Some(tool) = agent.tools.iter().find(|t| !registry.has_tool(t)) {
                return Err(CatalogError::MissingTool(tool.clone(), agent.name.clone()));
            }
        }

        for agent in self.iter() {
            for key in agent.state_reads() {
                if !keys.contains(key) {
                    return Err(CatalogError::UnknownStateKey(
                        key.to_string(),
                        agent.name.clone(),
                    ));
                }
                if agent.output_key.as_deref() == Some(key) {
                    return Err(CatalogError::SelfReference(key.to_string(), agent.name.clone()));
                }
            }
        }

        for agent in self.iter() {
            agent.check_data_flow()?;
        }

        Ok(())
    }

    /// Workflow children may only read keys their position allows
    fn check_data_flow(&self) -> Result<(), CatalogError> {
        let produced: Vec<HashSet<&str>> = self
            .sub_agents
            .iter()
            .map(|child| child.output_keys().into_iter().collect())
            .collect();

        for (i, child) in self.sub_agents.iter().enumerate() {
            for reader in child.iter() {
                for key in reader.state_reads() {
                    let conflict = match self.kind {
                        AgentKind::Sequential => produced[i + 1..].iter().any(|p| p.contains(key)),
                        AgentKind::Parallel => produced
                            .iter()
                            .enumerate()
                            .any(|(j, p)| j != i && p.contains(key)),
                        AgentKind::Llm => false,
                    };
                    if !conflict {
                        continue;
                    }
                    let (key, reader, owner) =
                        (key.to_string(), reader.name.clone(), self.name.clone());
                    return Err(match self.kind {
                        AgentKind::Parallel => CatalogError::ParallelDependency(key, reader, owner),
                        _ => CatalogError::OrderViolation(key, reader, owner),
                    });
                }
            }
        }
        Ok(())
    }

    /// ASCII rendering of the tree, one agent per line
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, "", "");
        out
    }

    fn render_into(&self, out: &mut String, lead: &str, child_lead: &str) {
        out.push_str(lead);
        out.push_str(&self.summary_line());
        out.push('\n');

        let last = self.sub_agents.len().saturating_sub(1);
        for (i, child) in self.sub_agents.iter().enumerate() {
            let (branch, rest) = if i == last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            child.render_into(
                out,
                &format!("{}{}", child_lead, branch),
                &format!("{}{}", child_lead, rest),
            );
        }
    }

    fn summary_line(&self) -> String {
        let mut line = format!("{} [{}]", self.name, self.kind);
        if !self.tools.is_empty() {
            line.push_str(&format!(" tools: {}", self.tools.join(", ")));
        }
        if let Some(key) = &self.output_key {
            line.push_str(&format!(" => {}", key));
        }
        line
    }
}

/// Extract `{identifier}` placeholders, in order of appearance, without duplicates
pub fn placeholders(text: &str) -> Vec<&str> {
    let mut found: Vec<&str> = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        let candidate = &after[..end];
        let is_identifier = candidate
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && candidate
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');

        if is_identifier {
            if !found.contains(&candidate) {
                found.push(candidate);
            }
            rest = &after[end + 1..];
        } else {
            rest = after;
        }
    }
    found
}

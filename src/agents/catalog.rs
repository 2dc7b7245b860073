//! Built-in agent trees
//!
//! One tree per composition style. Each is the configuration an agent
//! framework would be given; the tool names refer to the built-in tools.

use super::AgentSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    /// Root coordinator, three departments, two specialists each
    #[default]
    Hierarchical,
    /// Research, draft and polish stages run in order
    Sequential,
    /// Two experts run side by side, then a synthesizer merges them
    Parallel,
}

impl Architecture {
    pub const ALL: [Architecture; 3] = [Self::Hierarchical, Self::Sequential, Self::Parallel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hierarchical => "hierarchical",
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Self::Hierarchical => "Enterprise assistant routing to finance, customer service and research departments",
            Self::Sequential => "Content pipeline: research, then draft, then polish",
            Self::Parallel => "Technology and business experts in parallel, merged by a synthesizer",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root agent for an architecture
pub fn root_agent(architecture: Architecture) -> AgentSpec {
    match architecture {
        Architecture::Hierarchical => hierarchical(),
        Architecture::Sequential => sequential(),
        Architecture::Parallel => parallel(),
    }
}

// ============= Hierarchical =============

fn hierarchical() -> AgentSpec {
    let stock_analyst = AgentSpec::llm(
        "stock_analyst",
        "Analyzes stock prices and market trends",
        "You analyze equities and market trends. Look up current prices with the stock \
         price tool and explain what the numbers mean rather than just listing them.",
    )
    .with_tools(&["get_stock_price", "get_news_headlines"]);

    let financial_news_analyst = AgentSpec::llm(
        "financial_news_analyst",
        "Analyzes financial and business news",
        "You track business news and explain how events affect markets and companies. \
         Turn headlines into actionable insights.",
    )
    .with_tools(&["get_news_headlines"]);

    let recommendation_specialist = AgentSpec::llm(
        "recommendation_specialist",
        "Provides personalized recommendations",
        "You help users decide. Ask clarifying questions when needed, then use the \
         recommendation tool and explain your reasoning.",
    )
    .with_tools(&["make_recommendation"]);

    let calculation_assistant = AgentSpec::llm(
        "calculation_assistant",
        "Performs calculations and conversions",
        "You help with everyday math: tips and temperature conversions. Show your work \
         and explain the result.",
    )
    .with_tools(&["calculate_tip", "convert_temperature"]);

    let content_analyst = AgentSpec::llm(
        "content_analyst",
        "Analyzes text content and provides insights",
        "You examine text. Use the text analysis tool for statistics and suggest \
         improvements where useful.",
    )
    .with_tools(&["analyze_text"]);

    let news_researcher = AgentSpec::llm(
        "news_researcher",
        "Researches current news and information",
        "You research current events and present organized, well-sourced summaries.",
    )
    .with_tools(&["get_news_headlines"]);

    let finance = AgentSpec::llm(
        "finance_department",
        "Coordinates financial analysis and business intelligence",
        "You coordinate stock_analyst (prices, market analysis) and financial_news_analyst \
         (business news). Pick the specialist(s) a question needs, delegate, and combine \
         their answers. Topics: stocks, markets, financial news, business trends.",
    )
    .with_sub_agents(vec![stock_analyst, financial_news_analyst]);

    let customer_service = AgentSpec::llm(
        "customer_service_department",
        "Coordinates customer assistance and practical help",
        "You coordinate recommendation_specialist (decisions) and calculation_assistant \
         (tips, conversions). Work out what the user needs, delegate, and keep the reply \
         friendly. Topics: recommendations, calculations, tips, conversions.",
    )
    .with_sub_agents(vec![recommendation_specialist, calculation_assistant]);

    let research = AgentSpec::llm(
        "research_department",
        "Coordinates research and information gathering",
        "You coordinate content_analyst (text evaluation) and news_researcher (current \
         information). Decide what research is needed, delegate, and present the findings \
         clearly. Topics: general news, content analysis, research.",
    )
    .with_sub_agents(vec![content_analyst, news_researcher]);

    AgentSpec::llm(
        "enterprise_assistant",
        "Enterprise-level assistant coordinating multiple specialized departments",
        "You are an enterprise assistant in front of three departments. Route \
         stock, market and financial questions to finance_department; recommendations, \
         calculations and tips to customer_service_department; general research, news \
         and text analysis to research_department. Ask for clarification when a request \
         is ambiguous and consult several departments for compound requests.",
    )
    .with_sub_agents(vec![finance, customer_service, research])
}

// ============= Sequential =============

fn sequential() -> AgentSpec {
    let collector = AgentSpec::llm(
        "research_collector",
        "Collects research information on a given topic",
        "Identify the topic of the request, gather recent headlines with \
         get_news_headlines and summarize the key findings as a short bulleted list \
         under a 'Research Topic' heading.",
    )
    .with_tools(&["get_news_headlines"])
    .with_output_key("research_findings");

    let drafter = AgentSpec::llm(
        "content_drafter",
        "Drafts content based on research findings",
        "Write a three to four paragraph draft with an introduction, supporting points \
         and a conclusion, based on these findings:\n{research_findings}",
    )
    .with_output_key("draft_content");

    let polisher = AgentSpec::llm(
        "content_polisher",
        "Polishes and refines draft content",
        "Edit the draft below for flow, clarity, tone and grammar, add a title, and \
         return the publication-ready version:\n{draft_content}",
    )
    .with_tools(&["analyze_text"])
    .with_output_key("final_content");

    let pipeline = AgentSpec::sequential(
        "content_creation_pipeline",
        "Sequential pipeline for research, drafting, and polishing content",
        vec![collector, drafter, polisher],
    );

    AgentSpec::llm(
        "content_creator",
        "Manages content creation through a sequential pipeline",
        "Acknowledge the request, hand it to content_creation_pipeline (research, draft, \
         polish) and present the final content.",
    )
    .with_sub_agents(vec![pipeline])
}

// ============= Parallel =============

fn parallel() -> AgentSpec {
    let tech_expert = AgentSpec::llm(
        "tech_expert",
        "Technology industry expert specializing in tech trends and companies",
        "Answer from a technology perspective: trends, companies, products and \
         disruptions. Use the tools for current information.",
    )
    .with_tools(&["get_news_headlines", "get_stock_price"])
    .with_output_key("tech_analysis");

    let business_expert = AgentSpec::llm(
        "business_expert",
        "Business and finance expert specializing in markets and strategy",
        "Answer from a business and finance perspective: markets, performance, strategy \
         and economic impact. Use the tools for current information.",
    )
    .with_tools(&["get_news_headlines", "get_stock_price"])
    .with_output_key("business_analysis");

    let team = AgentSpec::parallel(
        "parallel_research_team",
        "Runs technology and business experts in parallel for comprehensive analysis",
        vec![tech_expert, business_expert],
    );

    let synthesizer = AgentSpec::llm(
        "synthesizer",
        "Synthesizes multiple expert analyses into a comprehensive report",
        "Combine the two analyses into one report with sections Key Insights, Common \
         Themes, Different Perspectives and Comprehensive Summary.\n\
         Technology: {tech_analysis}\n\
         Business: {business_analysis}",
    );

    AgentSpec::llm(
        "multi_perspective_analyst",
        "Coordinates parallel expert consultation for comprehensive analysis",
        "Delegate to parallel_research_team for both perspectives, then to synthesizer \
         to merge them, and present the synthesized analysis.",
    )
    .with_sub_agents(vec![team, synthesizer])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::AgentKind;
    use crate::tools::registry::ToolRegistry;
    use rstest::rstest;

    #[rstest]
    #[case(Architecture::Hierarchical)]
    #[case(Architecture::Sequential)]
    #[case(Architecture::Parallel)]
    fn test_builtin_trees_validate(#[case] architecture: Architecture) {
        let registry = ToolRegistry::with_default_tools();
        assert_eq!(root_agent(architecture).validate(&registry), Ok(()));
    }

    #[test]
    fn test_hierarchical_shape() {
        let root = root_agent(Architecture::Hierarchical);
        assert_eq!(root.name, "enterprise_assistant");
        assert_eq!(root.sub_agents.len(), 3);
        assert!(root.sub_agents.iter().all(|d| d.sub_agents.len() == 2));
        assert_eq!(root.agent_count(), 10);
    }

    #[test]
    fn test_sequential_state_flow() {
        let root = root_agent(Architecture::Sequential);
        let pipeline = root.find("content_creation_pipeline").unwrap();
        assert_eq!(pipeline.kind, AgentKind::Sequential);
        assert_eq!(
            root.output_keys(),
            vec!["research_findings", "draft_content", "final_content"]
        );
        assert_eq!(
            root.find("content_polisher").unwrap().state_reads(),
            vec!["draft_content"]
        );
    }

    #[test]
    fn test_parallel_state_flow() {
        let root = root_agent(Architecture::Parallel);
        assert_eq!(
            root.find("parallel_research_team").unwrap().kind,
            AgentKind::Parallel
        );
        assert_eq!(
            root.find("synthesizer").unwrap().state_reads(),
            vec!["tech_analysis", "business_analysis"]
        );
    }

    #[test]
    fn test_disabled_tool_fails_validation() {
        let mut config = crate::utils::config::ToolkitConfig::default();
        config.tools.insert(
            "analyze_text".to_string(),
            crate::utils::config::ToolConfig {
                enabled: false,
                description: None,
            },
        );
        let registry = ToolRegistry::with_config(&config);
        assert!(root_agent(Architecture::Sequential)
            .validate(&registry)
            .is_err());
        assert!(root_agent(Architecture::Parallel)
            .validate(&registry)
            .is_ok());
    }

    #[test]
    fn test_architecture_names() {
        for arch in Architecture::ALL {
            let parsed: Architecture =
                serde_json::from_value(serde_json::json!(arch.as_str())).unwrap();
            assert_eq!(parsed, arch);
            assert!(!arch.summary().is_empty());
        }
    }
}

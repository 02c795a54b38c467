use clap::{Parser, ValueEnum};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Which agent the terminal session talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AgentKind {
    /// IT-office assistant with ecommerce tools
    Office,
    /// YouTube Shorts script, visuals and formatting pipeline
    Shorts,
}

/// Command line options; every flag can also come from the environment (or `.env`).
#[derive(Parser, Debug, Clone)]
#[command(name = "shop-agents", version, about = "Gemini agents for ecommerce operations and YouTube Shorts")]
pub struct Config {
    /// Agent to run
    #[arg(long, env = "AGENT", value_enum, default_value_t = AgentKind::Office)]
    pub agent: AgentKind,

    /// Model used by every agent
    #[arg(long, env = "ADK_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Tool calls executed concurrently within one model turn
    #[arg(long, env = "TOOL_CONCURRENCY", default_value_t = 3)]
    pub tool_concurrency: usize,

    /// Consecutive tool rounds allowed before a turn is aborted
    #[arg(long, env = "MAX_TOOL_ROUNDS", default_value_t = 8)]
    pub max_tool_rounds: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agent: AgentKind::Office,
            model: DEFAULT_MODEL.to_string(),
            tool_concurrency: 3,
            max_tool_rounds: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "shop-agents",
            "--agent",
            "shorts",
            "--model",
            "gemini-1.5-pro",
            "--max-tool-rounds",
            "2",
        ])
        .unwrap();
        assert_eq!(config.agent, AgentKind::Shorts);
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.max_tool_rounds, 2);
    }

    #[test]
    fn rejects_unknown_agent() {
        assert!(Config::try_parse_from(["shop-agents", "--agent", "weather"]).is_err());
    }

    #[test]
    fn command_is_well_formed() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}

//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;
use crate::application::messaging::dispatcher::DEFAULT_SYSTEM_PROMPT;
use crate::infrastructure::llm::LLMConfig;

/// Service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub server: ServerConfig,
    pub slack: SlackConfig,
    #[serde(default)]
    pub llm: LLMConfig,
    #[serde(default)]
    pub tickets: Option<TicketConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    /// System prompt sent with every `ai` command
    pub assistant_prompt: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Maximum number of events routed concurrently
    pub max_workers: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SlackConfig {
    pub bot_token: Option<String>,
    pub api_base: String,
    pub timeout_secs: u64,
}

/// Jira-compatible tracker settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TicketConfig {
    pub base_url: String,
    pub project_key: String,
    pub issue_type: String,
    pub email: String,
    pub api_token: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "chatops-bot".to_string(),
                assistant_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            },
            server: ServerConfig {
                bind: "0.0.0.0".to_string(),
                port: 8080,
                max_workers: 16,
            },
            slack: SlackConfig {
                bot_token: None,
                api_base: "https://slack.com/api".to_string(),
                timeout_secs: 10,
            },
            llm: LLMConfig::default(),
            tickets: None,
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.apply_prompt_override();
        config.validate()?;
        Ok(config)
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = Config::default();
        config.llm = LLMConfig::from_env();

        if let Ok(token) = std::env::var("SLACK_BOT_TOKEN") {
            config.slack.bot_token = Some(token);
        }

        if let Ok(bind) = std::env::var("SERVER_BIND") {
            config.server.bind = bind;
        }

        if let Ok(port) = std::env::var("SERVER_PORT") {
            match port.parse() {
                Ok(p) => config.server.port = p,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid SERVER_PORT"),
            }
        }

        config.apply_prompt_override();
        config.tickets = TicketConfig::from_env();
        config
    }

    /// `llm.system-prompt` wins over `bot.assistant-prompt`
    fn apply_prompt_override(&mut self) {
        if let Some(prompt) = self.llm.system_prompt.clone() {
            self.bot.assistant_prompt = prompt;
        }
    }

    /// Socket address string for the HTTP server
    pub fn bind_addr(&self) -> String {
        if self.server.bind.contains(':') {
            format!("[{}]:{}", self.server.bind, self.server.port)
        } else {
            format!("{}:{}", self.server.bind, self.server.port)
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.max_workers == 0 {
            return Err(ConfigError::InvalidValue("server.max-workers must be at least 1".to_string()));
        }
        if let Some(tickets) = &self.tickets {
            if tickets.base_url.is_empty() {
                return Err(ConfigError::MissingField("tickets.base-url".to_string()));
            }
            if tickets.project_key.is_empty() {
                return Err(ConfigError::MissingField("tickets.project-key".to_string()));
            }
        }
        Ok(())
    }
}

impl TicketConfig {
    /// Build from `JIRA_*` variables; `None` unless base URL and project are set
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("JIRA_BASE_URL").ok()?;
        let project_key = std::env::var("JIRA_PROJECT_KEY").ok()?;

        Some(Self {
            base_url,
            project_key,
            issue_type: std::env::var("JIRA_ISSUE_TYPE").unwrap_or_else(|_| "Task".to_string()),
            email: std::env::var("JIRA_EMAIL").unwrap_or_default(),
            api_token: std::env::var("JIRA_API_TOKEN").unwrap_or_default(),
            timeout_secs: 10,
        })
    }
}

//! LLM Configuration

use serde::{Deserialize, Serialize};

/// LLM Provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LLMProvider {
    #[default]
    Groq,
    Claude,
}

impl LLMProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LLMProvider::Groq => "groq",
            LLMProvider::Claude => "claude",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "groq" => Some(Self::Groq),
            "claude" | "anthropic" => Some(Self::Claude),
            _ => None,
        }
    }
}

/// LLM Configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LLMConfig {
    /// Default provider
    pub provider: LLMProvider,

    /// Provider-specific API keys
    pub claude_api_key: Option<String>,
    pub groq_api_key: Option<String>,

    /// Default model for each provider
    pub claude_model: Option<String>,
    pub groq_model: Option<String>,

    pub temperature: f32,
    pub max_tokens: Option<u32>,
    /// Overrides `bot.assistant-prompt` when set
    pub system_prompt: Option<String>,
    pub timeout_secs: u64,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::Groq,
            claude_api_key: None,
            groq_api_key: None,
            claude_model: Some("claude-3-haiku-20240307".to_string()),
            groq_model: Some("llama-3.1-8b-instant".to_string()),
            temperature: 0.7,
            max_tokens: Some(1024),
            system_prompt: None,
            timeout_secs: 60,
        }
    }
}

impl LLMConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(provider) = std::env::var("LLM_PROVIDER") {
            match LLMProvider::parse(&provider) {
                Some(p) => config.provider = p,
                None => tracing::warn!(value = %provider, "Unknown LLM_PROVIDER, keeping default"),
            }
        }
        if let Ok(key) = std::env::var("CLAUDE_API_KEY") {
            config.claude_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            config.groq_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            // Also check OPENAI_API_KEY for Groq compatibility
            if config.groq_api_key.is_none() {
                config.groq_api_key = Some(key);
            }
        }

        if let Ok(prompt) = std::env::var("LLM_SYSTEM_PROMPT") {
            config.system_prompt = Some(prompt);
        }

        if let Ok(temp) = std::env::var("LLM_TEMPERATURE") {
            if let Ok(t) = temp.parse() {
                config.temperature = t;
            }
        }

        config
    }

    /// Get API key for a provider
    pub fn api_key(&self, provider: LLMProvider) -> Option<&str> {
        match provider {
            LLMProvider::Claude => self.claude_api_key.as_deref(),
            LLMProvider::Groq => self.groq_api_key.as_deref(),
        }
    }

    /// Get model for a provider
    pub fn model(&self, provider: LLMProvider) -> &str {
        match provider {
            LLMProvider::Claude => self.claude_model.as_deref().unwrap_or("claude-3-haiku-20240307"),
            LLMProvider::Groq => self.groq_model.as_deref().unwrap_or("llama-3.1-8b-instant"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_config_from_env() {
        std::env::set_var("GROQ_API_KEY", "test-key-123");
        std::env::set_var("LLM_PROVIDER", "Anthropic");

        let config = LLMConfig::from_env();

        assert_eq!(config.api_key(LLMProvider::Groq), Some("test-key-123"));
        assert_eq!(config.provider, LLMProvider::Claude);

        std::env::remove_var("GROQ_API_KEY");
        std::env::remove_var("LLM_PROVIDER");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: LLMConfig = serde_yaml::from_str("provider: claude\nclaude-api-key: k\n").unwrap();
        assert_eq!(config.provider, LLMProvider::Claude);
        assert_eq!(config.model(LLMProvider::Claude), "claude-3-haiku-20240307");
        assert_eq!(config.timeout_secs, 60);
    }
}

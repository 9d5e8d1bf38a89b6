//! LLM integration - AI capability backed by chat-completion providers

pub mod assistant;
pub mod config;
pub mod providers;
pub mod traits;

pub use assistant::LlmAssistant;
pub use config::{LLMConfig, LLMProvider};
pub use providers::{build_provider, ClaudeProvider, GroqProvider};
pub use traits::{LLMMessage, LLMResponse, LLMUsage, LLM};

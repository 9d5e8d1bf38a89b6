use async_trait::async_trait;
use std::fmt;
use crate::application::errors::CapabilityResult;

/// Output of an AI generation call
#[derive(Debug, Clone, PartialEq)]
pub enum Generation {
    Text(String),
    /// Reply parsed against a caller-supplied JSON schema
    Structured(serde_json::Value),
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generation::Text(text) => f.write_str(text),
            Generation::Structured(value) => {
                let pretty = serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?;
                f.write_str(&pretty)
            }
        }
    }
}

/// AI capability - text generation
#[async_trait]
pub trait AiCapability: Send + Sync {
    async fn generate(
        &self,
        user_input: &str,
        system_prompt: &str,
        response_schema: Option<&serde_json::Value>,
    ) -> CapabilityResult<Generation>;
}

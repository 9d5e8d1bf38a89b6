use async_trait::async_trait;
use crate::application::errors::CapabilityResult;

/// Chat capability - abstraction over the messaging platform
#[async_trait]
pub trait ChatCapability: Send + Sync {
    /// Post a message to a channel
    async fn send(&self, channel_id: &str, text: &str) -> CapabilityResult<bool>;

    /// List member identifiers of a channel
    async fn get_channel_members(&self, channel_id: &str) -> CapabilityResult<Vec<String>>;

    /// Delete a message by its timestamp/id
    async fn delete_message(&self, channel_id: &str, message_id: &str) -> CapabilityResult<bool>;

    /// Adapter name, used in logs
    fn name(&self) -> &str;
}

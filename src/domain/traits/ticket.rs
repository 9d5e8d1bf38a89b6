use async_trait::async_trait;
use crate::application::errors::CapabilityResult;
use crate::domain::entities::Ticket;

/// Ticket capability - abstraction over the issue tracker
#[async_trait]
pub trait TicketCapability: Send + Sync {
    async fn create(&self, title: &str, description: &str) -> CapabilityResult<Ticket>;

    /// `Ok(None)` when the tracker has no ticket with this key
    async fn get(&self, key: &str) -> CapabilityResult<Option<Ticket>>;

    async fn search(&self, query: &str, limit: usize) -> CapabilityResult<Vec<Ticket>>;
}

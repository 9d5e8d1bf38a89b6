//! Domain traits - Capabilities the router calls without knowing the backend

pub mod ai;
pub mod chat;
pub mod ticket;

pub use ai::{AiCapability, Generation};
pub use chat::ChatCapability;
pub use ticket::TicketCapability;

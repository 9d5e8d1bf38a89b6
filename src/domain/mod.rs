//! Domain layer - Core business types with no infrastructure dependencies
//! 
//! This layer contains:
//! - Entities: Commands, inbound chat events, tickets
//! - Traits: Capability abstractions (chat, AI, tickets)

pub mod entities;
pub mod traits;

//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Errors: Capability, config and runtime errors
//! - Messaging: Command parsing, routing, error classification
//! - Services: Inbound event handling

pub mod errors;
pub mod messaging;
pub mod services;

//! Application services - Inbound event handling

pub mod event_service;

pub use event_service::{EventOutcome, EventService};

//! Typed clients for the intelligence backend.

pub mod intelligence;
pub mod subscriptions;

pub use intelligence::{HttpIntelligenceSource, IntelligenceSource};
pub use subscriptions::{HttpSubscriptionApi, SubscriptionApi};

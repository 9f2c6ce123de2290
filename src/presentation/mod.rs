//! Leptos views. Every component reads shared state from `global_state`
//! and reaches services through `context::use_services`.

pub mod accessibility_panel;
pub mod context;
pub mod dashboard;
pub mod dialog;
pub mod insights;
pub mod reports;
pub mod subscriptions;

pub use context::{AppServices, use_services};

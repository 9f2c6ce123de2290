//! Use cases orchestrating the domain over the browser adapters.

pub mod accessibility;
pub mod config;
pub mod overview;
pub mod refresh;
pub mod retry_controller;
pub mod subscriptions;

pub use accessibility::AccessibilityStore;
pub use config::AppConfig;
pub use overview::OverviewLoader;
pub use refresh::{CycleGate, CycleGuard, RefreshLoop};
pub use retry_controller::RetryController;
pub use subscriptions::{Notice, SubscriptionService};

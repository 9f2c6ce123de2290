pub mod accessibility;
pub mod cancellation;
pub mod errors;
pub mod expiring_queue;
pub mod intelligence;
pub mod logging;
pub mod navigation;
pub mod notifications;
pub mod retry;
pub mod state;
pub mod subscription;

/// Millisecond wall clock, injected wherever expiry or timestamps are computed.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

use strum::{AsRefStr, Display};

use crate::domain::expiring_queue::ExpiringQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastKind {
    /// Auto-dismiss delay for this kind of toast.
    pub fn lifetime_ms(&self) -> u64 {
        match self {
            ToastKind::Info => 4_000,
            ToastKind::Success => 5_000,
            ToastKind::Warning | ToastKind::Error => 6_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

/// Transient success/info messages shown in the corner of the screen.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    queue: ExpiringQueue<(String, ToastKind)>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind, now_ms: u64) -> u64 {
        self.queue.push((message.into(), kind), now_ms, Some(kind.lifetime_ms()))
    }

    pub fn expire(&mut self, now_ms: u64) -> usize {
        self.queue.expire(now_ms)
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        self.queue.dismiss(id).is_some()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.queue
            .iter()
            .map(|e| Toast { id: e.id, message: e.item.0.clone(), kind: e.item.1 })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifetimes_by_kind() {
        let mut toasts = ToastQueue::new();
        toasts.push("Report sent", ToastKind::Success, 0);
        toasts.push("Refreshing", ToastKind::Info, 0);
        toasts.expire(4_000);
        let left = toasts.toasts();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].kind, ToastKind::Success);
        toasts.expire(5_000);
        assert!(toasts.toasts().is_empty());
    }
}

use strum::{AsRefStr, Display};

use crate::domain::expiring_queue::ExpiringQueue;

/// How long an announcement stays in the live region.
pub const ANNOUNCEMENT_TTL_MS: u64 = 3_000;

/// `aria-live` politeness of an announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum AnnouncementPriority {
    #[default]
    Polite,
    Assertive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementEvent {
    pub id: u64,
    pub message: String,
    pub priority: AnnouncementPriority,
}

/// Messages waiting to be read by assistive technology.
#[derive(Debug, Clone)]
pub struct AnnouncementQueue {
    queue: ExpiringQueue<(String, AnnouncementPriority)>,
    ttl_ms: u64,
}

impl Default for AnnouncementQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnouncementQueue {
    pub fn new() -> Self {
        Self::with_ttl(ANNOUNCEMENT_TTL_MS)
    }

    pub fn with_ttl(ttl_ms: u64) -> Self {
        Self { queue: ExpiringQueue::new(), ttl_ms }
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    pub fn push(&mut self, message: &str, priority: AnnouncementPriority, now_ms: u64) -> u64 {
        self.queue.push((message.to_string(), priority), now_ms, Some(self.ttl_ms))
    }

    pub fn expire(&mut self, now_ms: u64) -> usize {
        self.queue.expire(now_ms)
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        self.queue.dismiss(id).is_some()
    }

    pub fn events(&self) -> Vec<AnnouncementEvent> {
        self.queue
            .iter()
            .map(|e| AnnouncementEvent { id: e.id, message: e.item.0.clone(), priority: e.item.1 })
            .collect()
    }

    /// Messages for the live region of the given politeness, oldest first.
    pub fn messages(&self, priority: AnnouncementPriority) -> Vec<String> {
        self.queue
            .iter()
            .filter(|e| e.item.1 == priority)
            .map(|e| e.item.0.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_by_priority() {
        let mut q = AnnouncementQueue::new();
        q.push("Dark mode enabled", AnnouncementPriority::Polite, 0);
        q.push("Session expired", AnnouncementPriority::Assertive, 0);
        assert_eq!(q.messages(AnnouncementPriority::Polite), vec!["Dark mode enabled"]);
        assert_eq!(q.messages(AnnouncementPriority::Assertive), vec!["Session expired"]);
    }

    #[test]
    fn gone_after_three_seconds() {
        let mut q = AnnouncementQueue::new();
        q.push("X", AnnouncementPriority::Polite, 10_000);
        q.expire(12_999);
        assert_eq!(q.events().len(), 1);
        q.expire(13_000);
        assert!(q.is_empty());
    }

    #[test]
    fn priority_renders_as_aria_value() {
        assert_eq!(AnnouncementPriority::Assertive.as_ref(), "assertive");
        assert_eq!(AnnouncementPriority::Polite.to_string(), "polite");
    }
}

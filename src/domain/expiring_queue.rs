/// FIFO of items that each carry their own expiry time.
///
/// Time is passed in by the caller (milliseconds), so the queue itself never
/// touches a clock.
#[derive(Debug, Clone)]
pub struct ExpiringQueue<T> {
    next_id: u64,
    items: Vec<Expiring<T>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expiring<T> {
    pub id: u64,
    pub expires_at_ms: Option<u64>,
    pub item: T,
}

impl<T> Default for ExpiringQueue<T> {
    fn default() -> Self {
        Self { next_id: 1, items: Vec::new() }
    }
}

impl<T> ExpiringQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an item living for `ttl_ms` from `now_ms`; `None` keeps it until dismissed.
    pub fn push(&mut self, item: T, now_ms: u64, ttl_ms: Option<u64>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let expires_at_ms = ttl_ms.map(|ttl| now_ms.saturating_add(ttl));
        self.items.push(Expiring { id, expires_at_ms, item });
        id
    }

    /// Remove everything whose expiry is at or before `now_ms`. Returns the count removed.
    pub fn expire(&mut self, now_ms: u64) -> usize {
        let before = self.items.len();
        self.items.retain(|e| e.expires_at_ms.is_none_or(|at| at > now_ms));
        before - self.items.len()
    }

    pub fn dismiss(&mut self, id: u64) -> Option<T> {
        let pos = self.items.iter().position(|e| e.id == id)?;
        Some(self.items.remove(pos).item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expiring<T>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_at_deadline() {
        let mut q = ExpiringQueue::new();
        q.push("a", 1_000, Some(3_000));
        q.push("b", 2_000, Some(3_000));
        assert_eq!(q.expire(3_999), 0);
        assert_eq!(q.expire(4_000), 1);
        assert_eq!(q.iter().map(|e| e.item).collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn sticky_items_survive() {
        let mut q = ExpiringQueue::new();
        let id = q.push("banner", 0, None);
        q.expire(u64::MAX);
        assert_eq!(q.len(), 1);
        assert_eq!(q.dismiss(id), Some("banner"));
        assert!(q.is_empty());
    }

    #[test]
    fn ids_are_unique_even_at_same_instant() {
        let mut q = ExpiringQueue::new();
        let a = q.push(1, 5, Some(1));
        let b = q.push(2, 5, Some(1));
        assert_ne!(a, b);
    }
}

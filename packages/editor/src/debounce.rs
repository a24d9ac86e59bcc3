//! # Debounced Property Writes
//!
//! Rapid edits to the same (node, prop) collapse into one delayed write:
//! each new value replaces the pending one and restarts its window. Time is
//! read through [`Clock`] so hosts drive it from their event loop and tests
//! advance it by hand.

use sitecraft_common::{NodeId, PropValue};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source, measured from an arbitrary origin
pub trait Clock {
    fn now(&self) -> Duration;
}

#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    elapsed: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.elapsed.get()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct WriteKey {
    pub node: NodeId,
    pub prop: String,
}

impl WriteKey {
    pub fn new(node: NodeId, prop: impl Into<String>) -> Self {
        Self {
            node,
            prop: prop.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct PendingWrite {
    value: PropValue,
    due: Duration,
}

/// Pending debounced writes, at most one per key
pub struct Debouncer {
    clock: Box<dyn Clock>,
    pending: BTreeMap<WriteKey, PendingWrite>,
}

impl Debouncer {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            pending: BTreeMap::new(),
        }
    }

    /// Replace any pending value for `key` and restart its window
    pub fn schedule(&mut self, key: WriteKey, value: PropValue, window: Duration) {
        let due = self.clock.now() + window;
        tracing::debug!(node = %key.node, prop = %key.prop, ?window, "Debounced write scheduled");
        self.pending.insert(key, PendingWrite { value, due });
    }

    pub fn cancel(&mut self, key: &WriteKey) -> Option<PropValue> {
        let cancelled = self.pending.remove(key).map(|p| p.value);
        if cancelled.is_some() {
            tracing::debug!(node = %key.node, prop = %key.prop, "Debounced write cancelled");
        }
        cancelled
    }

    /// Drop every pending write aimed at `node`
    pub fn cancel_node(&mut self, node: &NodeId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|key, _| &key.node != node);
        before - self.pending.len()
    }

    /// Remove and return one pending write regardless of its deadline
    pub fn take(&mut self, key: &WriteKey) -> Option<PropValue> {
        self.pending.remove(key).map(|p| p.value)
    }

    /// Remove and return the writes whose window has elapsed, in key order
    pub fn take_due(&mut self) -> Vec<(WriteKey, PropValue)> {
        let now = self.clock.now();
        let due: Vec<WriteKey> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due <= now)
            .map(|(k, _)| k.clone())
            .collect();

        due.into_iter()
            .filter_map(|key| self.pending.remove(&key).map(|p| (key, p.value)))
            .collect()
    }

    pub fn take_all(&mut self) -> Vec<(WriteKey, PropValue)> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|(k, p)| (k, p.value))
            .collect()
    }

    pub fn pending_value(&self, key: &WriteKey) -> Option<&PropValue> {
        self.pending.get(key).map(|p| &p.value)
    }

    /// Time until the earliest pending write falls due
    pub fn next_deadline(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.pending
            .values()
            .map(|p| p.due.saturating_sub(now))
            .min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("now", &self.clock.now())
            .field("pending", &self.pending)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(node: &str, prop: &str) -> WriteKey {
        WriteKey::new(NodeId::from(node), prop)
    }

    #[test]
    fn test_last_value_wins_and_window_restarts() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::new(Box::new(clock.clone()));
        let window = Duration::from_millis(300);

        debouncer.schedule(key("n", "text"), PropValue::text("a"), window);
        clock.advance_ms(200);
        debouncer.schedule(key("n", "text"), PropValue::text("ab"), window);
        clock.advance_ms(200);

        assert!(debouncer.take_due().is_empty());

        clock.advance_ms(100);
        assert_eq!(
            debouncer.take_due(),
            vec![(key("n", "text"), PropValue::text("ab"))]
        );
        assert!(debouncer.is_empty());
    }

    #[test]
    fn test_keys_are_independent() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::new(Box::new(clock.clone()));

        debouncer.schedule(key("n", "text"), PropValue::text("x"), Duration::from_millis(500));
        debouncer.schedule(key("n", "color"), PropValue::text("#fff"), Duration::from_millis(300));
        assert_eq!(debouncer.next_deadline(), Some(Duration::from_millis(300)));

        clock.advance_ms(300);
        let due = debouncer.take_due();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].0.prop, "color");
        assert_eq!(debouncer.len(), 1);
    }

    #[test]
    fn test_cancel_node() {
        let mut debouncer = Debouncer::new(Box::new(ManualClock::new()));
        let window = Duration::from_millis(300);

        debouncer.schedule(key("a", "text"), PropValue::text("1"), window);
        debouncer.schedule(key("a", "color"), PropValue::text("2"), window);
        debouncer.schedule(key("b", "text"), PropValue::text("3"), window);

        assert_eq!(debouncer.cancel_node(&NodeId::from("a")), 2);
        assert_eq!(debouncer.len(), 1);
        assert_eq!(debouncer.pending_value(&key("b", "text")), Some(&PropValue::text("3")));
    }
}

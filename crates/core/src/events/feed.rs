//! Bounded in-memory feed of realtime events.
//!
//! Consumers that keep a local list of incoming rows (notification drawers,
//! "new listing" banners) append to a `RealtimeFeed`. Events are kept in
//! arrival order with no deduplication; once the capacity is reached the
//! oldest entry is evicted.

use std::collections::VecDeque;

use super::DomainEvent;

/// Default number of events retained by a feed.
pub const DEFAULT_FEED_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub struct RealtimeFeed<T> {
    capacity: usize,
    items: VecDeque<T>,
}

impl<T> RealtimeFeed<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends an item, evicting the oldest one when full. Returns the
    /// evicted item, if any.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    /// Items in arrival order, oldest first.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T> Default for RealtimeFeed<T> {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_CAPACITY)
    }
}

impl RealtimeFeed<DomainEvent> {
    /// Events for `table` that satisfy the optional `column == value`
    /// filter, oldest first.
    pub fn matching(&self, table: &str, filter: Option<(&str, &str)>) -> Vec<DomainEvent> {
        self.items
            .iter()
            .filter(|event| event.matches(table, filter))
            .cloned()
            .collect()
    }
}

//! FIFO Queue Module
//!
//! Tracks key insertion order for first-in-first-out eviction.

use std::collections::VecDeque;

// == FIFO Queue ==
/// Tracks insertion order of keys.
///
/// Keys are stored in a VecDeque where:
/// - Front = Oldest insertion (next eviction candidate)
/// - Back = Newest insertion
///
/// Reads never reorder keys; this is not an access-recency tracker.
#[derive(Debug, Default)]
pub struct FifoQueue {
    /// Keys in insertion order
    order: VecDeque<String>,
}

impl FifoQueue {
    // == Constructor ==
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Push ==
    /// Appends a newly inserted key at the back.
    ///
    /// Callers must only push keys that are not already tracked.
    pub fn push(&mut self, key: String) {
        self.order.push_back(key);
    }

    // == Pop Oldest ==
    /// Returns and removes the earliest inserted key.
    ///
    /// Returns None if the queue is empty.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    // == Peek Oldest ==
    /// Returns the earliest inserted key without removing it.
    pub fn peek_oldest(&self) -> Option<&String> {
        self.order.front()
    }

    // == Retain ==
    /// Keeps only the keys for which `keep` returns true, preserving order.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.order.retain(|k| keep(k));
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }
}

//! Insertion-ordered set of strings.
//!
//! Keeps first-seen order like a `Vec`, with `HashSet` membership checks so
//! collecting `n` names costs O(n) instead of O(n²).

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct OrderedSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` unless already present. Returns whether it was added.
    pub fn insert(&mut self, value: &str) -> bool {
        if self.seen.contains(value) {
            return false;
        }
        self.seen.insert(value.to_string());
        self.items.push(value.to_string());
        true
    }

    #[cfg(test)]
    fn contains(&self, value: &str) -> bool {
        self.seen.contains(value)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Join the values in insertion order.
    pub fn join(&self, sep: &str) -> String {
        self.items.join(sep)
    }
}

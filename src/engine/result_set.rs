// Copyright © 2024 Pathway

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Key;

/// Real activation dates by key, filled concurrently by the workers.
///
/// A key's date is written once and never replaced afterwards.
#[derive(Debug, Default)]
pub struct ResultSet {
    entries: Mutex<HashMap<Key, String>>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<Key, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores the date for `key`. Returns `false` and keeps the stored date
    /// if the key already has one.
    pub fn insert(&self, key: Key, real_activation_date: String) -> bool {
        match self.entries().entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(real_activation_date);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// All entries ordered by key.
    pub fn sorted_entries(&self) -> Vec<(Key, String)> {
        let mut entries: Vec<(Key, String)> = self
            .entries()
            .iter()
            .map(|(key, date)| (key.clone(), date.clone()))
            .collect();
        entries.sort_unstable_by(|(left, _), (right, _)| left.cmp(right));
        entries
    }
}

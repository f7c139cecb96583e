//! Key-value preferences storage used to persist settings.

use anyhow::Result;
use std::collections::HashMap;

/// A stored preference value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefValue {
    Bool(bool),
    Text(String),
}

/// Named string/bool fields read at startup and written on every change.
pub trait Preferences: Send {
    fn get(&self, key: &str) -> Option<PrefValue>;

    fn set(&mut self, key: &str, value: PrefValue) -> Result<()>;

    fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(PrefValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(PrefValue::Bool(value)) => Some(value),
            _ => None,
        }
    }
}

/// Preferences held only in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, PrefValue>,
    writes: usize,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls received so far.
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl Preferences for MemoryPreferences {
    fn get(&self, key: &str) -> Option<PrefValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: PrefValue) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }
}

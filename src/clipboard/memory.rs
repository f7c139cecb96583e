use anyhow::{Result, anyhow};
use std::sync::Mutex;

use super::ClipboardStore;

#[derive(Debug, Default)]
struct State {
    change_count: u64,
    text: Option<String>,
    writes: Vec<String>,
}

/// An in-process clipboard, used headless and in tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    state: Mutex<State>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        let clipboard = Self::new();
        clipboard.copy(text);
        clipboard
    }

    /// Simulates a copy made by another application.
    pub fn copy(&self, text: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.text = Some(text.to_string());
            state.change_count += 1;
        }
    }

    /// Current value without going through the store interface.
    pub fn text(&self) -> Option<String> {
        self.state.lock().ok().and_then(|state| state.text.clone())
    }

    /// Every value written through [`ClipboardStore::write_text`], oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|state| state.writes.clone())
            .unwrap_or_default()
    }
}

impl ClipboardStore for MemoryClipboard {
    fn change_count(&self) -> Result<u64> {
        let state = self.state.lock().map_err(|_| anyhow!("lock poisoned"))?;
        Ok(state.change_count)
    }

    fn read_text(&self) -> Result<Option<String>> {
        let state = self.state.lock().map_err(|_| anyhow!("lock poisoned"))?;
        Ok(state.text.clone())
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let mut state = self.state.lock().map_err(|_| anyhow!("lock poisoned"))?;
        state.text = Some(text.to_string());
        state.change_count += 1;
        state.writes.push(text.to_string());
        Ok(())
    }
}

use anyhow::{Context, Result, anyhow};
use std::sync::{Mutex, MutexGuard};

use super::ClipboardStore;

struct State {
    clipboard: arboard::Clipboard,
    last_seen: Option<String>,
    change_count: u64,
}

/// The OS clipboard, via `arboard`.
///
/// `arboard` exposes no change counter, so one is derived: it advances when
/// the observed text differs from the previous observation and on every write
/// made through this store.
pub struct SystemClipboard {
    state: Mutex<State>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let mut clipboard = arboard::Clipboard::new().context("Failed to open the clipboard")?;
        let last_seen = read(&mut clipboard)?;

        Ok(Self {
            state: Mutex::new(State {
                clipboard,
                last_seen,
                change_count: 0,
            }),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| anyhow!("Clipboard state lock poisoned"))
    }
}

fn read(clipboard: &mut arboard::Clipboard) -> Result<Option<String>> {
    match clipboard.get_text() {
        Ok(text) => Ok(Some(text)),
        Err(arboard::Error::ContentNotAvailable) => Ok(None),
        Err(err) => Err(err).context("Failed to read the clipboard"),
    }
}

impl ClipboardStore for SystemClipboard {
    fn change_count(&self) -> Result<u64> {
        let mut state = self.lock()?;
        let current = read(&mut state.clipboard)?;
        if current != state.last_seen {
            state.last_seen = current;
            state.change_count += 1;
        }
        Ok(state.change_count)
    }

    fn read_text(&self) -> Result<Option<String>> {
        let mut state = self.lock()?;
        read(&mut state.clipboard)
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let mut state = self.lock()?;
        state
            .clipboard
            .set_text(text.to_string())
            .context("Failed to write the clipboard")?;
        state.last_seen = Some(text.to_string());
        state.change_count += 1;
        Ok(())
    }
}

use std::sync::Arc;
use std::time::Duration;

use super::ClipboardStore;

/// How often the clipboard is polled.
pub const POLL_INTERVAL: Duration = Duration::from_millis(450);

/// Turns clipboard polls into "new text" events.
///
/// Only genuinely new, non-empty text is reported. The value most recently
/// announced through [`mark_self_written`](Self::mark_self_written) is
/// swallowed once, so the engine does not react to its own writes.
pub struct ChangeDetector {
    clipboard: Arc<dyn ClipboardStore>,
    last_change_count: Option<u64>,
    last_self_written: Option<String>,
}

impl ChangeDetector {
    /// Creates a detector seeded with the current counter, so text already on
    /// the clipboard is not reported.
    pub fn new(clipboard: Arc<dyn ClipboardStore>) -> Self {
        let last_change_count = clipboard.change_count().ok();
        Self {
            clipboard,
            last_change_count,
            last_self_written: None,
        }
    }

    /// Records the exact string about to be written by the engine.
    pub fn mark_self_written(&mut self, text: impl Into<String>) {
        self.last_self_written = Some(text.into());
    }

    /// Forgets the pending self-write, e.g. after the write itself failed.
    pub fn clear_self_written(&mut self) {
        self.last_self_written = None;
    }

    /// Checks the clipboard once. Read failures count as "no change".
    pub fn poll(&mut self) -> Option<String> {
        let change_count = match self.clipboard.change_count() {
            Ok(count) => count,
            Err(err) => {
                tracing::debug!("clipboard change count unavailable: {err:#}");
                return None;
            }
        };

        if self.last_change_count == Some(change_count) {
            return None;
        }

        // The counter is only consumed once the read succeeds, so a failed
        // read is retried on the next tick.
        let text = match self.clipboard.read_text() {
            Ok(text) => {
                self.last_change_count = Some(change_count);
                text?
            }
            Err(err) => {
                tracing::debug!("clipboard read failed: {err:#}");
                return None;
            }
        };

        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if self.last_self_written.as_deref() == Some(text) {
            self.last_self_written = None;
            tracing::debug!("ignoring echo of our own clipboard write");
            return None;
        }

        Some(text.to_string())
    }
}

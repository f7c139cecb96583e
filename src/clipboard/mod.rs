//! Access to the shared clipboard, detection of new text on it, and paste injection.

mod detector;
mod memory;
mod paste;
mod system;

pub use detector::{ChangeDetector, POLL_INTERVAL};
pub use memory::MemoryClipboard;
pub use paste::{KeystrokePaste, NoopPaste, PasteInjector};
pub use system::SystemClipboard;

use anyhow::Result;

/// The shared clipboard: a change counter plus a text value.
pub trait ClipboardStore: Send + Sync {
    /// Opaque counter that moves whenever the clipboard content changes.
    fn change_count(&self) -> Result<u64>;

    /// Current text value, or `None` when the clipboard holds no text.
    fn read_text(&self) -> Result<Option<String>>;

    fn write_text(&self, text: &str) -> Result<()>;
}

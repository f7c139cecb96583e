use anyhow::{Context, Result};
use enigo::{Direction, Enigo, Key, Keyboard, Settings};

/// Pastes the clipboard into whatever application has focus.
pub trait PasteInjector: Send + Sync {
    fn paste_into_foreground(&self) -> Result<()>;
}

/// Sends the platform paste shortcut as synthetic key events.
///
/// On macOS this needs the accessibility permission; without it the input
/// connection cannot be opened and the paste fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeystrokePaste;

#[cfg(target_os = "macos")]
const PASTE_MODIFIER: Key = Key::Meta;
#[cfg(not(target_os = "macos"))]
const PASTE_MODIFIER: Key = Key::Control;

impl PasteInjector for KeystrokePaste {
    fn paste_into_foreground(&self) -> Result<()> {
        let mut enigo = Enigo::new(&Settings::default())
            .context("Cannot synthesize input (is the accessibility permission granted?)")?;

        enigo
            .key(PASTE_MODIFIER, Direction::Press)
            .context("Failed to press the paste modifier")?;
        let pressed = enigo
            .key(Key::Unicode('v'), Direction::Click)
            .context("Failed to send the paste key");
        enigo
            .key(PASTE_MODIFIER, Direction::Release)
            .context("Failed to release the paste modifier")?;

        pressed
    }
}

/// Does nothing; used when auto-paste must never touch the foreground app.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPaste;

impl PasteInjector for NoopPaste {
    fn paste_into_foreground(&self) -> Result<()> {
        tracing::debug!("paste injection disabled");
        Ok(())
    }
}

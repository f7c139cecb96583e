//! Translation settings and their persistence.

mod manager;
mod preferences;
mod settings;

pub use manager::TomlPreferences;
pub use preferences::{MemoryPreferences, PrefValue, Preferences};
pub use settings::{Setting, TranslationConfig, keys, mask_secret};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

use super::preferences::{PrefValue, Preferences};
use crate::fs::atomic_write;
use crate::paths;

/// Preferences persisted as a flat TOML table.
///
/// Corresponds to `~/.config/pluggo/config.toml`. Every `set` rewrites the
/// whole file.
#[derive(Debug)]
pub struct TomlPreferences {
    config_path: PathBuf,
    table: Table,
}

impl TomlPreferences {
    /// Opens the preferences file in the default configuration directory.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/pluggo/config.toml`
    /// or `~/.config/pluggo/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn open_default() -> Result<Self> {
        Self::open(paths::config_dir()?.join("config.toml"))
    }

    /// Opens the preferences file at `config_path`; a missing file is an empty table.
    pub fn open(config_path: impl Into<PathBuf>) -> Result<Self> {
        let config_path = config_path.into();

        if !config_path.exists() {
            return Ok(Self {
                config_path,
                table: Table::new(),
            });
        }

        let contents = fs::read_to_string(&config_path).with_context(|| {
            format!("Failed to read config file: {}", config_path.display())
        })?;

        let table: Table = toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", config_path.display())
        })?;

        Ok(Self { config_path, table })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    fn save(&self) -> Result<()> {
        let contents = toml::to_string_pretty(&self.table).context("Failed to serialize config")?;

        atomic_write(&self.config_path, &contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })
    }
}

impl Preferences for TomlPreferences {
    fn get(&self, key: &str) -> Option<PrefValue> {
        match self.table.get(key)? {
            Value::Boolean(value) => Some(PrefValue::Bool(*value)),
            Value::String(text) => Some(PrefValue::Text(text.clone())),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, value: PrefValue) -> Result<()> {
        let value = match value {
            PrefValue::Bool(value) => Value::Boolean(value),
            PrefValue::Text(text) => Value::String(text),
        };
        self.table.insert(key.to_string(), value);
        self.save()
    }
}

//! Wiring shared by the commands that run the engine.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::cli::OverrideArgs;
use crate::clipboard::{ClipboardStore, KeystrokePaste, NoopPaste, PasteInjector, SystemClipboard};
use crate::config::{Setting, TomlPreferences};
use crate::engine::{Completion, Dependencies, Orchestrator};
use crate::translation::{Language, Provider, SourceLanguage, TranslationService};

impl OverrideArgs {
    /// Parses the overrides into settings, in `--from`, `--to`, `--provider` order.
    pub fn to_settings(&self) -> Result<Vec<Setting>> {
        let mut settings = Vec::new();
        if let Some(code) = &self.from {
            settings.push(Setting::SourceLanguage(code.parse::<SourceLanguage>()?));
        }
        if let Some(code) = &self.to {
            settings.push(Setting::TargetLanguage(code.parse::<Language>()?));
        }
        if let Some(id) = &self.provider {
            settings.push(Setting::Provider(id.parse::<Provider>()?));
        }
        Ok(settings)
    }
}

/// Builds an orchestrator over the system clipboard and the stored preferences.
///
/// Overrides are applied for this session only.
pub fn build_orchestrator(
    overrides: &OverrideArgs,
    paste_enabled: bool,
) -> Result<(Orchestrator, mpsc::UnboundedReceiver<Completion>)> {
    let settings = overrides.to_settings()?;

    let preferences = TomlPreferences::open_default()?;
    let clipboard: Arc<dyn ClipboardStore> = Arc::new(SystemClipboard::new()?);
    let paste: Arc<dyn PasteInjector> = if paste_enabled {
        Arc::new(KeystrokePaste)
    } else {
        Arc::new(NoopPaste)
    };

    let (mut orchestrator, completions) = Orchestrator::new(Dependencies {
        clipboard,
        translator: Arc::new(TranslationService::new()),
        paste,
        preferences: Box::new(preferences),
    });

    for setting in settings {
        tracing::debug!(key = setting.key(), "session override");
        orchestrator.apply_override(setting);
    }

    Ok((orchestrator, completions))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overrides() {
        assert!(OverrideArgs::default().to_settings().unwrap().is_empty());
    }

    #[test]
    fn test_overrides_parse_in_order() {
        let overrides = OverrideArgs {
            from: Some("auto".to_string()),
            to: Some("de".to_string()),
            provider: Some("OpenAI".to_string()),
        };

        let settings = overrides.to_settings().unwrap();
        assert_eq!(
            settings,
            vec![
                Setting::SourceLanguage(SourceLanguage::Auto),
                Setting::TargetLanguage(Language::German),
                Setting::Provider(Provider::OpenAi),
            ]
        );
    }

    #[test]
    fn test_auto_is_not_a_target() {
        let overrides = OverrideArgs {
            to: Some("auto".to_string()),
            ..Default::default()
        };
        assert!(overrides.to_settings().is_err());
    }

    #[test]
    fn test_unknown_provider() {
        let overrides = OverrideArgs {
            provider: Some("deepl".to_string()),
            ..Default::default()
        };
        let err = overrides.to_settings().unwrap_err();
        assert!(err.to_string().contains("deepl"));
    }
}

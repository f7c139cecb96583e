//! Configure and set command handlers for editing stored settings.

use anyhow::{Result, bail};
use inquire::{Confirm, Password, Select, Text};

use crate::config::{Setting, TomlPreferences, TranslationConfig, keys, mask_secret};
use crate::translation::{Language, Provider, SourceLanguage};
use crate::ui::{Style, prompt_answer};

/// Persists one `key value` pair.
pub fn run_set(key: &str, value: &str) -> Result<()> {
    let mut preferences = TomlPreferences::open_default()?;
    let setting = Setting::parse(key, value)?;
    let is_secret = key.ends_with("_api_key");

    let mut config = TranslationConfig::load(&preferences);
    config.set_field(setting, &mut preferences)?;

    let shown = if is_secret {
        mask_secret(value)
    } else {
        value.trim().to_string()
    };
    println!(
        "{} {} = {}",
        Style::success("✓"),
        Style::label(key),
        Style::value(shown)
    );
    Ok(())
}

/// Prints the stored settings with API keys masked.
pub fn print_config() -> Result<()> {
    let preferences = TomlPreferences::open_default()?;
    let config = TranslationConfig::load(&preferences);

    println!("{}", Style::header("Current settings"));
    for (key, value) in display_rows(&config) {
        println!("  {:24} {}", Style::label(key), Style::value(value));
    }
    println!();
    println!(
        "{}",
        Style::secondary(format!("Stored in {}", preferences.config_path().display()))
    );
    Ok(())
}

fn display_rows(config: &TranslationConfig) -> Vec<(&'static str, String)> {
    let on_off = |v: bool| String::from(if v { "on" } else { "off" });
    vec![
        (keys::AUTO_TRANSLATE, on_off(config.auto_translate)),
        (keys::AUTO_PASTE, on_off(config.auto_paste)),
        (keys::SOURCE_LANGUAGE, config.source_language.code().to_string()),
        (keys::TARGET_LANGUAGE, config.target_language.code().to_string()),
        (keys::PROVIDER, config.provider.id().to_string()),
        (keys::OPENAI_API_KEY, masked_key(config, Provider::OpenAi)),
        (keys::OPENAI_MODEL, config.openai_model.clone()),
        (keys::GROQ_API_KEY, masked_key(config, Provider::Groq)),
        (keys::GROQ_MODEL, config.groq_model.clone()),
        (
            keys::LIBRETRANSLATE_BASE_URL,
            config.libretranslate_base_url.clone(),
        ),
        (
            keys::LIBRETRANSLATE_API_KEY,
            masked_key(config, Provider::LibreTranslate),
        ),
    ]
}

fn masked_key(config: &TranslationConfig, provider: Provider) -> String {
    let stored = config.stored_api_key(provider);
    if stored.trim().is_empty() && config.api_key(provider).is_some() {
        return format!("(from {})", provider.api_key_env());
    }
    mask_secret(stored)
}

/// Walks through the main settings interactively and saves them.
///
/// Cancelling any prompt leaves the file untouched.
pub fn run_configure() -> Result<()> {
    let mut preferences = TomlPreferences::open_default()?;
    let current = TranslationConfig::load(&preferences);

    let Some(settings) = prompt_settings(&current)? else {
        return Ok(());
    };

    let mut config = current;
    for setting in settings {
        config.set_field(setting, &mut preferences)?;
    }

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(preferences.config_path().display())
    );
    Ok(())
}

fn prompt_settings(current: &TranslationConfig) -> Result<Option<Vec<Setting>>> {
    let mut settings = Vec::new();

    let Some(provider) = prompt_answer(select_provider(current.provider))? else {
        return Ok(None);
    };
    settings.push(Setting::Provider(provider));

    match provider {
        Provider::OpenAi | Provider::Groq => {
            let Some(key) = prompt_answer(ask_api_key(current, provider))? else {
                return Ok(None);
            };
            if let Some(key) = key {
                settings.push(match provider {
                    Provider::OpenAi => Setting::OpenAiApiKey(key),
                    _ => Setting::GroqApiKey(key),
                });
            }

            let current_model = match provider {
                Provider::OpenAi => &current.openai_model,
                _ => &current.groq_model,
            };
            let Some(model) = prompt_answer(
                Text::new("Model:")
                    .with_default(current_model)
                    .prompt(),
            )?
            else {
                return Ok(None);
            };
            let model = model.trim().to_string();
            if model.is_empty() {
                bail!("Model name cannot be empty");
            }
            settings.push(match provider {
                Provider::OpenAi => Setting::OpenAiModel(model),
                _ => Setting::GroqModel(model),
            });
        }
        Provider::LibreTranslate => {
            let Some(base_url) = prompt_answer(
                Text::new("Server URL:")
                    .with_default(&current.libretranslate_base_url)
                    .prompt(),
            )?
            else {
                return Ok(None);
            };
            settings.push(Setting::LibreTranslateBaseUrl(base_url.trim().to_string()));

            let Some(key) = prompt_answer(ask_api_key(current, provider))? else {
                return Ok(None);
            };
            if let Some(key) = key {
                settings.push(Setting::LibreTranslateApiKey(key));
            }
        }
    }

    let Some(source) = prompt_answer(select_source_language(current.source_language))? else {
        return Ok(None);
    };
    settings.push(Setting::SourceLanguage(source));

    let Some(target) = prompt_answer(select_target_language(current.target_language))? else {
        return Ok(None);
    };
    settings.push(Setting::TargetLanguage(target));

    let Some(auto_translate) = prompt_answer(
        Confirm::new("Translate new clipboard text automatically?")
            .with_default(current.auto_translate)
            .prompt(),
    )?
    else {
        return Ok(None);
    };
    settings.push(Setting::AutoTranslate(auto_translate));

    let Some(auto_paste) = prompt_answer(
        Confirm::new("Paste translations into the focused app?")
            .with_default(current.auto_paste)
            .with_help_message("Sends Ctrl+V (Cmd+V on macOS); may need accessibility permission")
            .prompt(),
    )?
    else {
        return Ok(None);
    };
    settings.push(Setting::AutoPaste(auto_paste));

    Ok(Some(settings))
}

fn select_provider(current: Provider) -> inquire::error::InquireResult<Provider> {
    let options: Vec<String> = Provider::ALL.iter().map(|p| p.label().to_string()).collect();
    let cursor = Provider::ALL.iter().position(|p| *p == current).unwrap_or(0);

    let selection = Select::new("Provider:", options)
        .with_starting_cursor(cursor)
        .raw_prompt()?;
    Ok(Provider::ALL[selection.index])
}

/// `Ok(None)` keeps the stored key.
fn ask_api_key(
    current: &TranslationConfig,
    provider: Provider,
) -> inquire::error::InquireResult<Option<String>> {
    let stored = current.stored_api_key(provider);
    let help = if stored.trim().is_empty() {
        format!("Leave empty to use {}", provider.api_key_env())
    } else {
        format!("Leave empty to keep {}", mask_secret(stored))
    };

    let key = Password::new(&format!("{} API key:", provider.label()))
        .without_confirmation()
        .with_help_message(&help)
        .prompt()?;
    let key = key.trim();
    Ok((!key.is_empty()).then(|| key.to_string()))
}

fn select_source_language(current: SourceLanguage) -> inquire::error::InquireResult<SourceLanguage> {
    let choices: Vec<SourceLanguage> = std::iter::once(SourceLanguage::Auto)
        .chain(Language::ALL.into_iter().map(SourceLanguage::Fixed))
        .collect();
    let options: Vec<String> = choices.iter().map(|s| s.label().to_string()).collect();
    let cursor = choices.iter().position(|s| *s == current).unwrap_or(0);

    let selection = Select::new("Source language:", options)
        .with_starting_cursor(cursor)
        .raw_prompt()?;
    Ok(choices[selection.index])
}

fn select_target_language(current: Language) -> inquire::error::InquireResult<Language> {
    let options: Vec<String> = Language::ALL.iter().map(|l| l.label().to_string()).collect();
    let cursor = Language::ALL.iter().position(|l| *l == current).unwrap_or(0);

    let selection = Select::new("Target language:", options)
        .with_starting_cursor(cursor)
        .raw_prompt()?;
    Ok(Language::ALL[selection.index])
}

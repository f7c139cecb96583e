//! Provider listing command handler.

use anyhow::Result;

use crate::config::{TomlPreferences, TranslationConfig};
use crate::translation::{GROQ_ENDPOINT, OPENAI_ENDPOINT, Provider, translate_endpoint};
use crate::ui::Style;

/// Prints the available providers with their endpoint, model, and key status.
pub fn print_providers() -> Result<()> {
    let preferences = TomlPreferences::open_default()?;
    let config = TranslationConfig::load(&preferences);

    println!("{}", Style::header("Translation providers"));
    for provider in Provider::ALL {
        let marker = if provider == config.provider {
            format!(" {}", Style::active_marker())
        } else {
            String::new()
        };
        println!(
            "  {} {}{marker}",
            Style::value(provider.id()),
            Style::secondary(format!("({})", provider.label()))
        );
        println!("    {} {}", Style::label("endpoint:"), endpoint(&config, provider));
        if let Some(model) = model(&config, provider) {
            println!("    {} {model}", Style::label("model:   "));
        }
        println!("    {} {}", Style::label("api key: "), key_status(&config, provider));
    }
    println!();
    println!("{}", Style::hint("Switch with: pluggo set provider <id>"));
    Ok(())
}

fn endpoint(config: &TranslationConfig, provider: Provider) -> String {
    match provider {
        Provider::OpenAi => OPENAI_ENDPOINT.to_string(),
        Provider::Groq => GROQ_ENDPOINT.to_string(),
        Provider::LibreTranslate => translate_endpoint(&config.libretranslate_base_url)
            .map_or_else(|err| err.to_string(), |url| url.to_string()),
    }
}

fn model(config: &TranslationConfig, provider: Provider) -> Option<&str> {
    match provider {
        Provider::OpenAi => Some(&config.openai_model),
        Provider::Groq => Some(&config.groq_model),
        Provider::LibreTranslate => None,
    }
}

fn key_status(config: &TranslationConfig, provider: Provider) -> String {
    let stored = !config.stored_api_key(provider).trim().is_empty();
    match (stored, config.api_key(provider).is_some()) {
        (true, _) => Style::success("(set)"),
        (false, true) => Style::success(format!("(from {})", provider.api_key_env())),
        (false, false) if provider.requires_api_key() => Style::warning("(not set)"),
        (false, false) => Style::secondary("(optional)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_libretranslate_endpoint_follows_base_url() {
        let config = TranslationConfig {
            libretranslate_base_url: "http://localhost:5000/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            endpoint(&config, Provider::LibreTranslate),
            "http://localhost:5000/translate"
        );
    }

    #[test]
    fn test_libretranslate_has_no_model() {
        assert!(model(&TranslationConfig::default(), Provider::LibreTranslate).is_none());
        assert_eq!(
            model(&TranslationConfig::default(), Provider::Groq),
            Some("llama-3.1-8b-instant")
        );
    }
}

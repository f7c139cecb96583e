use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

use super::language::{Language, SourceLanguage};
use super::provider::Provider;
use crate::config::TranslationConfig;

/// Longest input accepted for translation, in characters.
pub const MAX_TEXT_CHARS: usize = 6000;

/// Length of `text` as a reader counts it: extended grapheme clusters.
pub fn char_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Input rejected before any request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Text is too long ({chars} characters, limit {MAX_TEXT_CHARS}).")]
pub struct TextTooLong {
    pub chars: usize,
}

/// Where a request goes, with only that backend's credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderTarget {
    OpenAi {
        api_key: String,
        model: String,
    },
    Groq {
        api_key: String,
        model: String,
    },
    LibreTranslate {
        base_url: String,
        api_key: Option<String>,
    },
}

impl ProviderTarget {
    pub const fn provider(&self) -> Provider {
        match self {
            Self::OpenAi { .. } => Provider::OpenAi,
            Self::Groq { .. } => Provider::Groq,
            Self::LibreTranslate { .. } => Provider::LibreTranslate,
        }
    }

    fn from_config(config: &TranslationConfig) -> Self {
        let api_key = config.api_key(config.provider);
        match config.provider {
            Provider::OpenAi => Self::OpenAi {
                api_key: api_key.unwrap_or_default(),
                model: config.openai_model.trim().to_string(),
            },
            Provider::Groq => Self::Groq {
                api_key: api_key.unwrap_or_default(),
                model: config.groq_model.trim().to_string(),
            },
            Provider::LibreTranslate => Self::LibreTranslate {
                base_url: config.libretranslate_base_url.trim().to_string(),
                api_key,
            },
        }
    }
}

/// An immutable translation job, captured from the config at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source: SourceLanguage,
    pub target: Language,
    pub target_provider: ProviderTarget,
}

impl TranslationRequest {
    /// Builds a request, rejecting text over [`MAX_TEXT_CHARS`].
    pub fn new(
        text: String,
        source: SourceLanguage,
        target: Language,
        target_provider: ProviderTarget,
    ) -> Result<Self, TextTooLong> {
        let chars = char_count(&text);
        if chars > MAX_TEXT_CHARS {
            return Err(TextTooLong { chars });
        }

        Ok(Self {
            text,
            source,
            target,
            target_provider,
        })
    }

    pub fn from_config(config: &TranslationConfig, text: String) -> Result<Self, TextTooLong> {
        Self::new(
            text,
            config.source_language,
            config.target_language,
            ProviderTarget::from_config(config),
        )
    }

    pub const fn provider(&self) -> Provider {
        self.target_provider.provider()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_at_limit_is_accepted() {
        let text = "a".repeat(MAX_TEXT_CHARS);
        let config = TranslationConfig::default();
        assert!(TranslationRequest::from_config(&config, text).is_ok());
    }

    #[test]
    fn test_request_over_limit_is_rejected() {
        let text = "a".repeat(MAX_TEXT_CHARS + 1);
        let config = TranslationConfig::default();
        let err = TranslationRequest::from_config(&config, text).unwrap_err();
        assert_eq!(err.chars, MAX_TEXT_CHARS + 1);
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        // 6000 two-byte characters is 12000 bytes but still within the limit
        let text = "ğ".repeat(MAX_TEXT_CHARS);
        let config = TranslationConfig::default();
        assert!(TranslationRequest::from_config(&config, text).is_ok());
    }

    #[test]
    fn test_limit_counts_grapheme_clusters() {
        // "e" plus a combining acute accent renders as one character
        let config = TranslationConfig::default();

        let at_limit = "e\u{301}".repeat(MAX_TEXT_CHARS);
        assert!(TranslationRequest::from_config(&config, at_limit).is_ok());

        let over_limit = "e\u{301}".repeat(MAX_TEXT_CHARS + 1);
        let err = TranslationRequest::from_config(&config, over_limit).unwrap_err();
        assert_eq!(err.chars, MAX_TEXT_CHARS + 1);
    }

    #[test]
    fn test_char_count_keeps_emoji_sequences_whole() {
        assert_eq!(char_count("👍🏽"), 1);
        assert_eq!(char_count("👩‍👩‍👧"), 1);
        assert_eq!(char_count("e\u{301}a"), 2);
        assert_eq!(char_count(""), 0);
    }

    #[test]
    fn test_target_carries_selected_provider_only() {
        let mut config = TranslationConfig::default();
        config.provider = Provider::OpenAi;
        config.openai_api_key = "sk-test".to_string();
        config.groq_api_key = "gsk-other".to_string();

        let request = TranslationRequest::from_config(&config, "Hello".to_string()).unwrap();
        assert_eq!(request.provider(), Provider::OpenAi);
        assert_eq!(
            request.target_provider,
            ProviderTarget::OpenAi {
                api_key: "sk-test".to_string(),
                model: "gpt-4o-mini".to_string(),
            }
        );
    }

    #[test]
    fn test_libretranslate_target_uses_base_url() {
        let mut config = TranslationConfig::default();
        config.provider = Provider::LibreTranslate;
        config.libretranslate_base_url = " https://translate.example.org ".to_string();
        config.libretranslate_api_key = "libre-key".to_string();

        let request = TranslationRequest::from_config(&config, "Hello".to_string()).unwrap();
        assert_eq!(
            request.target_provider,
            ProviderTarget::LibreTranslate {
                base_url: "https://translate.example.org".to_string(),
                api_key: Some("libre-key".to_string()),
            }
        );
    }
}

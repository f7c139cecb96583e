//! Supported languages and language code validation.

use anyhow::Result;
use std::fmt;
use std::str::FromStr;

use crate::ui::Style;

/// Language code used for automatic source detection.
pub const AUTO_CODE: &str = "auto";

/// A language that can be translated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Turkish,
    English,
    German,
    French,
    Spanish,
    Italian,
    Arabic,
    Russian,
}

impl Language {
    pub const ALL: [Self; 8] = [
        Self::Turkish,
        Self::English,
        Self::German,
        Self::French,
        Self::Spanish,
        Self::Italian,
        Self::Arabic,
        Self::Russian,
    ];

    /// ISO 639-1 code, as sent to LibreTranslate and stored in preferences.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Turkish => "tr",
            Self::English => "en",
            Self::German => "de",
            Self::French => "fr",
            Self::Spanish => "es",
            Self::Italian => "it",
            Self::Arabic => "ar",
            Self::Russian => "ru",
        }
    }

    /// Human-readable label, as used in chat prompts.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Turkish => "Turkish (TR)",
            Self::English => "English (EN)",
            Self::German => "German (DE)",
            Self::French => "French (FR)",
            Self::Spanish => "Spanish (ES)",
            Self::Italian => "Italian (IT)",
            Self::Arabic => "Arabic (AR)",
            Self::Russian => "Russian (RU)",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s).ok_or_else(|| invalid_language(s))
    }
}

/// The language of the copied text: either fixed or detected by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceLanguage {
    #[default]
    Auto,
    Fixed(Language),
}

impl SourceLanguage {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Auto => AUTO_CODE,
            Self::Fixed(lang) => lang.code(),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Auto => "Auto Detect",
            Self::Fixed(lang) => lang.label(),
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        if code == AUTO_CODE {
            Some(Self::Auto)
        } else {
            Language::from_code(code).map(Self::Fixed)
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SourceLanguage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s).ok_or_else(|| invalid_language(s))
    }
}

fn invalid_language(code: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Invalid language code: '{code}'\n\n\
         Valid language codes (ISO 639-1): tr, en, de, fr, es, it, ar, ru\n\
         Run 'pluggo languages' to see all supported codes."
    )
}

/// Prints all supported language codes to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported language codes (ISO 639-1)"));
    println!(
        "  {:5} {}",
        Style::code(AUTO_CODE),
        Style::secondary("Auto Detect (source only)")
    );
    for lang in Language::ALL {
        println!(
            "  {:5} {}",
            Style::code(lang.code()),
            Style::secondary(lang.label())
        );
    }
}

/// Validates that the given code names a supported source language.
///
/// # Errors
///
/// Returns an error if the language code is not in the supported list.
pub fn validate_language(code: &str) -> Result<()> {
    code.parse::<SourceLanguage>().map(|_| ())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_language_valid() {
        assert!(validate_language("tr").is_ok());
        assert!(validate_language("en").is_ok());
        assert!(validate_language("auto").is_ok());
    }

    #[test]
    fn test_validate_language_invalid() {
        assert!(validate_language("invalid").is_err());
        assert!(validate_language("").is_err());
        assert!(validate_language("TR").is_err()); // Case sensitive
    }

    #[test]
    fn test_target_language_rejects_auto() {
        assert!("auto".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_code_and_label() {
        let lang: Language = "ru".parse().unwrap();
        assert_eq!(lang, Language::Russian);
        assert_eq!(lang.label(), "Russian (RU)");
    }

    #[test]
    fn test_source_language_from_code() {
        assert_eq!(SourceLanguage::from_code("auto"), Some(SourceLanguage::Auto));
        assert_eq!(
            SourceLanguage::from_code("de"),
            Some(SourceLanguage::Fixed(Language::German))
        );
        assert_eq!(SourceLanguage::Auto.label(), "Auto Detect");
    }
}

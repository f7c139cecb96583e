//! Translation backends selectable in the configuration.

use anyhow::Result;
use std::fmt;
use std::str::FromStr;

pub const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const LIBRETRANSLATE_DEFAULT_BASE_URL: &str = "https://libretranslate.com";

pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const GROQ_DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provider {
    OpenAi,
    #[default]
    Groq,
    LibreTranslate,
}

impl Provider {
    pub const ALL: [Self; 3] = [Self::OpenAi, Self::Groq, Self::LibreTranslate];

    /// Stable identifier used in preferences and on the command line.
    pub const fn id(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Groq => "groq",
            Self::LibreTranslate => "libretranslate",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Groq => "Groq",
            Self::LibreTranslate => "LibreTranslate",
        }
    }

    /// Environment variable consulted when no key is stored.
    pub const fn api_key_env(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Groq => "GROQ_API_KEY",
            Self::LibreTranslate => "LIBRETRANSLATE_API_KEY",
        }
    }

    pub const fn requires_api_key(self) -> bool {
        !matches!(self, Self::LibreTranslate)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Provider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown provider: '{s}'\n\n\
                     Available providers: openai, groq, libretranslate"
                )
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("groq".parse::<Provider>().unwrap(), Provider::Groq);
        assert_eq!("OpenAI".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert_eq!(
            "libretranslate".parse::<Provider>().unwrap(),
            Provider::LibreTranslate
        );
        assert!("deepl".parse::<Provider>().is_err());
    }

    #[test]
    fn test_provider_id_round_trips() {
        for provider in Provider::ALL {
            assert_eq!(provider.id().parse::<Provider>().unwrap(), provider);
        }
    }

    #[test]
    fn test_libretranslate_key_is_optional() {
        assert!(Provider::OpenAi.requires_api_key());
        assert!(Provider::Groq.requires_api_key());
        assert!(!Provider::LibreTranslate.requires_api_key());
    }
}

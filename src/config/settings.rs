use anyhow::{Context, Result, bail};

use super::preferences::{PrefValue, Preferences};
use crate::translation::{
    GROQ_DEFAULT_MODEL, LIBRETRANSLATE_DEFAULT_BASE_URL, Language, OPENAI_DEFAULT_MODEL, Provider,
    SourceLanguage,
};

/// Preference keys, one per configurable field.
pub mod keys {
    pub const AUTO_TRANSLATE: &str = "auto_translate";
    pub const AUTO_PASTE: &str = "auto_paste";
    pub const SOURCE_LANGUAGE: &str = "source_language";
    pub const TARGET_LANGUAGE: &str = "target_language";
    pub const PROVIDER: &str = "provider";
    pub const OPENAI_API_KEY: &str = "openai_api_key";
    pub const OPENAI_MODEL: &str = "openai_model";
    pub const GROQ_API_KEY: &str = "groq_api_key";
    pub const GROQ_MODEL: &str = "groq_model";
    pub const LIBRETRANSLATE_BASE_URL: &str = "libretranslate_base_url";
    pub const LIBRETRANSLATE_API_KEY: &str = "libretranslate_api_key";

    pub const ALL: &[&str] = &[
        AUTO_TRANSLATE,
        AUTO_PASTE,
        SOURCE_LANGUAGE,
        TARGET_LANGUAGE,
        PROVIDER,
        OPENAI_API_KEY,
        OPENAI_MODEL,
        GROQ_API_KEY,
        GROQ_MODEL,
        LIBRETRANSLATE_BASE_URL,
        LIBRETRANSLATE_API_KEY,
    ];
}

/// The live translation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationConfig {
    pub auto_translate: bool,
    pub auto_paste: bool,
    pub source_language: SourceLanguage,
    pub target_language: Language,
    pub provider: Provider,
    pub openai_api_key: String,
    pub openai_model: String,
    pub groq_api_key: String,
    pub groq_model: String,
    pub libretranslate_base_url: String,
    pub libretranslate_api_key: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            auto_translate: true,
            auto_paste: false,
            source_language: SourceLanguage::Auto,
            target_language: Language::Turkish,
            provider: Provider::Groq,
            openai_api_key: String::new(),
            openai_model: OPENAI_DEFAULT_MODEL.to_string(),
            groq_api_key: String::new(),
            groq_model: GROQ_DEFAULT_MODEL.to_string(),
            libretranslate_base_url: LIBRETRANSLATE_DEFAULT_BASE_URL.to_string(),
            libretranslate_api_key: String::new(),
        }
    }
}

impl TranslationConfig {
    /// Reads every field from preferences, keeping defaults for missing or malformed values.
    pub fn load(prefs: &dyn Preferences) -> Self {
        let defaults = Self::default();
        let text = |key: &str, fallback: String| prefs.get_string(key).unwrap_or(fallback);

        Self {
            auto_translate: prefs
                .get_bool(keys::AUTO_TRANSLATE)
                .unwrap_or(defaults.auto_translate),
            auto_paste: prefs
                .get_bool(keys::AUTO_PASTE)
                .unwrap_or(defaults.auto_paste),
            source_language: prefs
                .get_string(keys::SOURCE_LANGUAGE)
                .and_then(|code| SourceLanguage::from_code(&code))
                .unwrap_or(defaults.source_language),
            target_language: prefs
                .get_string(keys::TARGET_LANGUAGE)
                .and_then(|code| Language::from_code(&code))
                .unwrap_or(defaults.target_language),
            provider: prefs
                .get_string(keys::PROVIDER)
                .and_then(|id| id.parse().ok())
                .unwrap_or(defaults.provider),
            openai_api_key: text(keys::OPENAI_API_KEY, defaults.openai_api_key),
            openai_model: text(keys::OPENAI_MODEL, defaults.openai_model),
            groq_api_key: text(keys::GROQ_API_KEY, defaults.groq_api_key),
            groq_model: text(keys::GROQ_MODEL, defaults.groq_model),
            libretranslate_base_url: text(
                keys::LIBRETRANSLATE_BASE_URL,
                defaults.libretranslate_base_url,
            ),
            libretranslate_api_key: text(
                keys::LIBRETRANSLATE_API_KEY,
                defaults.libretranslate_api_key,
            ),
        }
    }

    /// Mutates one field and persists it.
    ///
    /// The in-memory change is kept even when persisting fails.
    pub fn set_field(&mut self, setting: Setting, prefs: &mut dyn Preferences) -> Result<()> {
        let key = setting.key();
        let value = setting.pref_value();
        self.apply(setting);
        prefs
            .set(key, value)
            .with_context(|| format!("Failed to persist setting '{key}'"))
    }

    /// Mutates one field without persisting it.
    pub fn apply(&mut self, setting: Setting) {
        match setting {
            Setting::AutoTranslate(v) => self.auto_translate = v,
            Setting::AutoPaste(v) => self.auto_paste = v,
            Setting::SourceLanguage(v) => self.source_language = v,
            Setting::TargetLanguage(v) => self.target_language = v,
            Setting::Provider(v) => self.provider = v,
            Setting::OpenAiApiKey(v) => self.openai_api_key = v,
            Setting::OpenAiModel(v) => self.openai_model = v,
            Setting::GroqApiKey(v) => self.groq_api_key = v,
            Setting::GroqModel(v) => self.groq_model = v,
            Setting::LibreTranslateBaseUrl(v) => self.libretranslate_base_url = v,
            Setting::LibreTranslateApiKey(v) => self.libretranslate_api_key = v,
        }
    }

    /// The key stored for the given provider, which may be blank.
    pub fn stored_api_key(&self, provider: Provider) -> &str {
        match provider {
            Provider::OpenAi => &self.openai_api_key,
            Provider::Groq => &self.groq_api_key,
            Provider::LibreTranslate => &self.libretranslate_api_key,
        }
    }

    /// The stored key, falling back to the provider's environment variable.
    pub fn api_key(&self, provider: Provider) -> Option<String> {
        let stored = self.stored_api_key(provider).trim();
        if !stored.is_empty() {
            return Some(stored.to_string());
        }
        std::env::var(provider.api_key_env())
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

/// A single field change, as issued by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    AutoTranslate(bool),
    AutoPaste(bool),
    SourceLanguage(SourceLanguage),
    TargetLanguage(Language),
    Provider(Provider),
    OpenAiApiKey(String),
    OpenAiModel(String),
    GroqApiKey(String),
    GroqModel(String),
    LibreTranslateBaseUrl(String),
    LibreTranslateApiKey(String),
}

impl Setting {
    pub const fn key(&self) -> &'static str {
        match self {
            Self::AutoTranslate(_) => keys::AUTO_TRANSLATE,
            Self::AutoPaste(_) => keys::AUTO_PASTE,
            Self::SourceLanguage(_) => keys::SOURCE_LANGUAGE,
            Self::TargetLanguage(_) => keys::TARGET_LANGUAGE,
            Self::Provider(_) => keys::PROVIDER,
            Self::OpenAiApiKey(_) => keys::OPENAI_API_KEY,
            Self::OpenAiModel(_) => keys::OPENAI_MODEL,
            Self::GroqApiKey(_) => keys::GROQ_API_KEY,
            Self::GroqModel(_) => keys::GROQ_MODEL,
            Self::LibreTranslateBaseUrl(_) => keys::LIBRETRANSLATE_BASE_URL,
            Self::LibreTranslateApiKey(_) => keys::LIBRETRANSLATE_API_KEY,
        }
    }

    fn pref_value(&self) -> PrefValue {
        match self {
            Self::AutoTranslate(v) | Self::AutoPaste(v) => PrefValue::Bool(*v),
            Self::SourceLanguage(v) => PrefValue::Text(v.code().to_string()),
            Self::TargetLanguage(v) => PrefValue::Text(v.code().to_string()),
            Self::Provider(v) => PrefValue::Text(v.id().to_string()),
            Self::OpenAiApiKey(v)
            | Self::OpenAiModel(v)
            | Self::GroqApiKey(v)
            | Self::GroqModel(v)
            | Self::LibreTranslateBaseUrl(v)
            | Self::LibreTranslateApiKey(v) => PrefValue::Text(v.clone()),
        }
    }

    /// Parses a `key value` pair as typed on the command line.
    pub fn parse(key: &str, value: &str) -> Result<Self> {
        let value = value.trim();
        let setting = match key {
            keys::AUTO_TRANSLATE => Self::AutoTranslate(parse_bool(value)?),
            keys::AUTO_PASTE => Self::AutoPaste(parse_bool(value)?),
            keys::SOURCE_LANGUAGE => Self::SourceLanguage(value.parse()?),
            keys::TARGET_LANGUAGE => Self::TargetLanguage(value.parse()?),
            keys::PROVIDER => Self::Provider(value.parse()?),
            keys::OPENAI_API_KEY => Self::OpenAiApiKey(value.to_string()),
            keys::OPENAI_MODEL => Self::OpenAiModel(value.to_string()),
            keys::GROQ_API_KEY => Self::GroqApiKey(value.to_string()),
            keys::GROQ_MODEL => Self::GroqModel(value.to_string()),
            keys::LIBRETRANSLATE_BASE_URL => Self::LibreTranslateBaseUrl(value.to_string()),
            keys::LIBRETRANSLATE_API_KEY => Self::LibreTranslateApiKey(value.to_string()),
            _ => bail!(
                "Unknown setting: '{key}'\n\n\
                 Available settings:\n  - {}",
                keys::ALL.join("\n  - ")
            ),
        };
        Ok(setting)
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => bail!("Expected a boolean (true/false, on/off), got '{value}'"),
    }
}

/// Masks a secret for display, keeping only its last four characters.
pub fn mask_secret(secret: &str) -> String {
    let secret = secret.trim();
    if secret.is_empty() {
        return "(not set)".to_string();
    }
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

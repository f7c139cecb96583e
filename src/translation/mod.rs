mod chat;
mod error;
mod language;
mod libre;
mod prompt;
mod provider;
mod request;
mod service;

pub use chat::ChatCompletionClient;
pub use error::{QUOTA_MESSAGE, TranslationError, extract_provider_error};
pub use language::{AUTO_CODE, Language, SourceLanguage, print_languages, validate_language};
pub use libre::{LibreTranslateClient, translate_endpoint};
pub use prompt::build_system_prompt;
pub use provider::{
    GROQ_DEFAULT_MODEL, GROQ_ENDPOINT, LIBRETRANSLATE_DEFAULT_BASE_URL, OPENAI_DEFAULT_MODEL,
    OPENAI_ENDPOINT, Provider,
};
pub use request::{MAX_TEXT_CHARS, ProviderTarget, TextTooLong, TranslationRequest, char_count};
pub use service::{TranslationService, Translator};

use async_trait::async_trait;
use reqwest::Client;

use super::chat::ChatCompletionClient;
use super::error::TranslationError;
use super::libre::LibreTranslateClient;
use super::provider::{GROQ_DEFAULT_MODEL, GROQ_ENDPOINT, OPENAI_DEFAULT_MODEL, OPENAI_ENDPOINT};
use super::request::{ProviderTarget, TranslationRequest};

/// Anything that can turn a request into translated text.
///
/// Implementations make a single attempt: no retries, no caching.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslationError>;
}

/// Routes requests to the provider client named in the request.
#[derive(Debug, Clone)]
pub struct TranslationService {
    openai: ChatCompletionClient,
    groq: ChatCompletionClient,
    libre: LibreTranslateClient,
}

impl TranslationService {
    pub fn new() -> Self {
        Self::with_chat_endpoints(OPENAI_ENDPOINT, GROQ_ENDPOINT)
    }

    /// Builds a service whose chat providers point at custom URLs.
    pub fn with_chat_endpoints(openai: &str, groq: &str) -> Self {
        let client = Client::new();
        Self {
            openai: ChatCompletionClient::new(client.clone(), openai),
            groq: ChatCompletionClient::new(client.clone(), groq),
            libre: LibreTranslateClient::new(client),
        }
    }
}

impl Default for TranslationService {
    fn default() -> Self {
        Self::new()
    }
}

fn model_or_default<'a>(model: &'a str, default: &'a str) -> &'a str {
    if model.trim().is_empty() {
        default
    } else {
        model
    }
}

#[async_trait]
impl Translator for TranslationService {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslationError> {
        match &request.target_provider {
            ProviderTarget::OpenAi { api_key, model } => {
                self.openai
                    .translate(request, api_key, model_or_default(model, OPENAI_DEFAULT_MODEL))
                    .await
            }
            ProviderTarget::Groq { api_key, model } => {
                self.groq
                    .translate(request, api_key, model_or_default(model, GROQ_DEFAULT_MODEL))
                    .await
            }
            ProviderTarget::LibreTranslate { base_url, api_key } => {
                self.libre
                    .translate(request, base_url, api_key.as_deref())
                    .await
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::translation::{Language, SourceLanguage};
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[test]
    fn test_default_endpoints() {
        let service = TranslationService::new();
        assert_eq!(
            service.openai.endpoint(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            service.groq.endpoint(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_model_or_default() {
        assert_eq!(model_or_default("", "gpt-4o-mini"), "gpt-4o-mini");
        assert_eq!(model_or_default("  ", "gpt-4o-mini"), "gpt-4o-mini");
        assert_eq!(model_or_default("gpt-4o", "gpt-4o-mini"), "gpt-4o");
    }

    #[tokio::test]
    async fn test_blank_model_uses_provider_default() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/openai")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(json!({ "model": "gpt-4o-mini" })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"Hallo"}}]}"#)
            .create_async()
            .await;

        let service = TranslationService::with_chat_endpoints(
            &format!("{}/openai", server.url()),
            &format!("{}/groq", server.url()),
        );
        let request = TranslationRequest::new(
            "Hello".to_string(),
            SourceLanguage::Auto,
            Language::German,
            ProviderTarget::OpenAi {
                api_key: "sk-test".to_string(),
                model: String::new(),
            },
        )
        .unwrap();

        assert_eq!(service.translate(&request).await.unwrap(), "Hallo");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_routes_groq_to_groq_endpoint() {
        let mut server = Server::new_async().await;
        let groq = server
            .mock("POST", "/groq")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"Merhaba"}}]}"#)
            .create_async()
            .await;
        let openai = server
            .mock("POST", "/openai")
            .expect(0)
            .create_async()
            .await;

        let service = TranslationService::with_chat_endpoints(
            &format!("{}/openai", server.url()),
            &format!("{}/groq", server.url()),
        );
        let request = TranslationRequest::new(
            "Hello".to_string(),
            SourceLanguage::Auto,
            Language::Turkish,
            ProviderTarget::Groq {
                api_key: "gsk-test".to_string(),
                model: "llama-3.1-8b-instant".to_string(),
            },
        )
        .unwrap();

        assert_eq!(service.translate(&request).await.unwrap(), "Merhaba");
        groq.assert_async().await;
        openai.assert_async().await;
    }
}

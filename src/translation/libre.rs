//! Client for LibreTranslate servers.

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use super::error::{TranslationError, extract_provider_error};
use super::provider::LIBRETRANSLATE_DEFAULT_BASE_URL;
use super::request::TranslationRequest;

#[derive(Debug, Serialize)]
struct LibreTranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct LibreTranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

/// Resolves `<base>/translate`, falling back to the public instance for a blank base.
pub fn translate_endpoint(base_url: &str) -> Result<Url, TranslationError> {
    let base = base_url.trim();
    let base = if base.is_empty() {
        LIBRETRANSLATE_DEFAULT_BASE_URL
    } else {
        base
    };

    Url::parse(&format!("{}/translate", base.trim_end_matches('/')))
        .map_err(|_| TranslationError::InvalidEndpoint)
}

#[derive(Debug, Clone)]
pub struct LibreTranslateClient {
    client: Client,
}

impl LibreTranslateClient {
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn translate(
        &self,
        request: &TranslationRequest,
        base_url: &str,
        api_key: Option<&str>,
    ) -> Result<String, TranslationError> {
        let url = translate_endpoint(base_url)?;

        let body = LibreTranslateRequest {
            q: &request.text,
            source: request.source.code(),
            target: request.target.code(),
            format: "text",
            api_key: api_key.map(str::trim).filter(|key| !key.is_empty()),
        };

        let response = self.client.post(url).json(&body).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(TranslationError::ProviderRejected(extract_provider_error(
                &text, status,
            )));
        }

        let decoded: LibreTranslateResponse =
            serde_json::from_str(&text).map_err(|_| TranslationError::UnparsableResponse)?;

        decoded
            .translated_text
            .map(|translated| translated.trim().to_string())
            .filter(|translated| !translated.is_empty())
            .ok_or(TranslationError::UnparsableResponse)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::translation::{Language, ProviderTarget, SourceLanguage};
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn request(text: &str) -> TranslationRequest {
        TranslationRequest::new(
            text.to_string(),
            SourceLanguage::Fixed(Language::English),
            Language::French,
            ProviderTarget::LibreTranslate {
                base_url: String::new(),
                api_key: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_translate_endpoint() {
        assert_eq!(
            translate_endpoint("").unwrap().as_str(),
            "https://libretranslate.com/translate"
        );
        assert_eq!(
            translate_endpoint("http://localhost:5000/").unwrap().as_str(),
            "http://localhost:5000/translate"
        );
        assert_eq!(
            translate_endpoint("not a url").unwrap_err(),
            TranslationError::InvalidEndpoint
        );
    }

    #[tokio::test]
    async fn test_translate_sends_exact_payload() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/translate")
            .match_body(Matcher::Json(json!({
                "q": "Good morning",
                "source": "en",
                "target": "fr",
                "format": "text"
            })))
            .with_status(200)
            .with_body(r#"{"translatedText":" Bonjour "}"#)
            .create_async()
            .await;

        let client = LibreTranslateClient::new(Client::new());
        let translated = client
            .translate(&request("Good morning"), &server.url(), None)
            .await
            .unwrap();

        assert_eq!(translated, "Bonjour");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_translate_includes_api_key_when_set() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/translate")
            .match_body(Matcher::PartialJson(json!({ "api_key": "libre-key" })))
            .with_status(200)
            .with_body(r#"{"translatedText":"Bonjour"}"#)
            .create_async()
            .await;

        let client = LibreTranslateClient::new(Client::new());
        client
            .translate(&request("Hello"), &server.url(), Some("libre-key"))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_translation_is_unparsable() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/translate")
            .with_status(200)
            .with_body(r#"{"translatedText":""}"#)
            .create_async()
            .await;

        let client = LibreTranslateClient::new(Client::new());
        let err = client
            .translate(&request("Hello"), &server.url(), None)
            .await
            .unwrap_err();

        assert_eq!(err, TranslationError::UnparsableResponse);
    }

    #[tokio::test]
    async fn test_rejection_uses_error_message() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/translate")
            .with_status(400)
            .with_body(r#"{"error":{"message":"fr is not supported"}}"#)
            .create_async()
            .await;

        let client = LibreTranslateClient::new(Client::new());
        let err = client
            .translate(&request("Hello"), &server.url(), None)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TranslationError::ProviderRejected("fr is not supported".to_string())
        );
    }
}

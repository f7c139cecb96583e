//! Client for OpenAI-compatible chat completion endpoints (OpenAI, Groq).

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::error::{TranslationError, extract_provider_error};
use super::prompt::build_system_prompt;
use super::request::TranslationRequest;

const TEMPERATURE: f64 = 0.1;

// Use Cow to avoid cloning strings that are only borrowed for serialization
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// One chat completion endpoint. OpenAI and Groq differ only by URL and defaults.
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    client: Client,
    endpoint: String,
}

impl ChatCompletionClient {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends a single chat completion request and returns the trimmed reply.
    pub async fn translate(
        &self,
        request: &TranslationRequest,
        api_key: &str,
        model: &str,
    ) -> Result<String, TranslationError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(TranslationError::MissingCredential);
        }

        let url = Url::parse(&self.endpoint).map_err(|_| TranslationError::InvalidEndpoint)?;

        let system_prompt = build_system_prompt(request.source, request.target);

        let chat_request = ChatCompletionRequest {
            model,
            messages: vec![
                Message {
                    role: "system",
                    content: Cow::Owned(system_prompt),
                },
                Message {
                    role: "user",
                    content: Cow::Borrowed(&request.text),
                },
            ],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&chat_request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TranslationError::ProviderRejected(extract_provider_error(
                &body, status,
            )));
        }

        parse_chat_content(&body)
    }
}

fn parse_chat_content(body: &str) -> Result<String, TranslationError> {
    let response: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|_| TranslationError::UnparsableResponse)?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(TranslationError::UnparsableResponse)
}

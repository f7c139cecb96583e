//! Provider error taxonomy and error-body normalization.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Message shown when the provider reports an exhausted quota.
pub const QUOTA_MESSAGE: &str =
    "API quota exceeded (insufficient_quota). Check your billing and credits.";

/// Failure of a single provider call.
///
/// The `Display` text is user-facing: the orchestrator shows it verbatim as
/// status and log line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    #[error("An API key is required.")]
    MissingCredential,

    #[error("Invalid URL.")]
    InvalidEndpoint,

    #[error("Translation error: {0}")]
    ProviderRejected(String),

    #[error("Could not parse the server response.")]
    UnparsableResponse,

    #[error("Translation error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for TranslationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::InvalidEndpoint
        } else if err.is_decode() {
            Self::UnparsableResponse
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ProviderErrorBody>,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    param: Option<String>,
    code: Option<String>,
}

/// Extracts a readable message from a non-2xx response body.
///
/// Preference order: quota message, envelope `message`, raw body, `HTTP <status>`.
pub fn extract_provider_error(body: &str, status: StatusCode) -> String {
    if let Ok(ErrorEnvelope { error: Some(error) }) = serde_json::from_str::<ErrorEnvelope>(body) {
        if error.code.as_deref() == Some("insufficient_quota") {
            return QUOTA_MESSAGE.to_string();
        }
        if let Some(message) = error.message.filter(|m| !m.is_empty()) {
            return message;
        }
    }

    if body.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        body.to_string()
    }
}

//! Gemini `generateContent` transport.
//!
//! # Responsibility
//! - Execute one blocking HTTP round-trip per generation request.
//! - Decode the response into the plain generated text.
//!
//! # Invariants
//! - The API key never appears in diagnostic log output.
//! - A whitespace-only generation is reported as `EmptyResponse`, not as
//!   success.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Default REST base for the generative-language API.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default generation model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";

const API_KEY_ENV: &str = "BRIEFNOTE_GEMINI_API_KEY";
const MODEL_ENV: &str = "BRIEFNOTE_GEMINI_MODEL";
const BASE_URL_ENV: &str = "BRIEFNOTE_GEMINI_BASE_URL";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub type GenerateResult<T> = Result<T, GenerateError>;

/// Failure taxonomy for one generation round-trip.
#[derive(Debug)]
pub enum GenerateError {
    /// No API key configured for the transport.
    MissingApiKey,
    /// Transport-level failure (client build, connect, decode).
    Http(reqwest::Error),
    /// Endpoint answered with a non-success status.
    Api { status: u16, body: String },
    /// Endpoint answered successfully but produced no usable text.
    EmptyResponse,
}

impl Display for GenerateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "no API key configured ({API_KEY_ENV})"),
            Self::Http(err) => write!(f, "{err}"),
            Self::Api { status, body } => write!(f, "API returned status {status}: {body}"),
            Self::EmptyResponse => write!(f, "API returned an empty generation"),
        }
    }
}

impl Error for GenerateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GenerateError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Single-round-trip text generation seam.
///
/// The production implementation talks to the external API; tests substitute
/// in-process fakes to observe call counts and force failures.
pub trait TextGenerator {
    /// Generates text for one instruction prompt.
    fn generate(&self, prompt: &str) -> GenerateResult<String>;
}

/// Blocking Gemini REST client.
#[derive(Debug)]
pub struct GeminiGenerator {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiGenerator {
    /// Creates a client for the default endpoint and model.
    pub fn new(api_key: impl Into<String>) -> GenerateResult<Self> {
        Self::with_endpoint(api_key, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL)
    }

    /// Creates a client against an explicit base URL and model.
    ///
    /// # Errors
    /// - `MissingApiKey` when the key is blank.
    /// - `Http` when the underlying HTTP client cannot be built.
    pub fn with_endpoint(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> GenerateResult<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(GenerateError::MissingApiKey);
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
        })
    }

    /// Creates a client from process environment configuration.
    ///
    /// Reads `BRIEFNOTE_GEMINI_API_KEY` (required) plus optional
    /// `BRIEFNOTE_GEMINI_MODEL` and `BRIEFNOTE_GEMINI_BASE_URL` overrides.
    pub fn from_env() -> GenerateResult<Self> {
        let api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        let model = env_or(MODEL_ENV, DEFAULT_GEMINI_MODEL);
        let base_url = env_or(BASE_URL_ENV, DEFAULT_GEMINI_BASE_URL);
        Self::with_endpoint(api_key, base_url, model)
    }

    /// Returns the configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl TextGenerator for GeminiGenerator {
    fn generate(&self, prompt: &str) -> GenerateResult<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self.client.post(url).json(&request).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerateError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let decoded: GenerateContentResponse = response.json()?;
        let text = decoded
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GenerateError::EmptyResponse);
        }

        Ok(text)
    }
}

fn env_or(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().to_string(),
        _ => default.to_string(),
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    #[serde(default)]
    content: ResponseContent,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::{GeminiGenerator, GenerateError, GenerateContentResponse};

    #[test]
    fn blank_api_key_is_rejected() {
        let err = GeminiGenerator::new("   ").expect_err("blank key must be rejected");
        assert!(matches!(err, GenerateError::MissingApiKey));
    }

    #[test]
    fn endpoint_base_url_is_normalized() {
        let generator =
            GeminiGenerator::with_endpoint("key", "https://example.test/v1beta/", "model-x")
                .expect("client should build");
        assert_eq!(generator.base_url, "https://example.test/v1beta");
        assert_eq!(generator.model(), "model-x");
    }

    #[test]
    fn response_decode_tolerates_missing_candidates() {
        let decoded: GenerateContentResponse =
            serde_json::from_str("{}").expect("empty object should decode");
        assert!(decoded.candidates.is_empty());
    }

    #[test]
    fn response_decode_collects_part_text() {
        let raw = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "Hello " }, { "text": "world" } ] } }
            ]
        }"#;
        let decoded: GenerateContentResponse =
            serde_json::from_str(raw).expect("candidate payload should decode");
        let text: String = decoded.candidates[0]
            .content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect();
        assert_eq!(text, "Hello world");
    }
}

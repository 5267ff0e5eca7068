//! Gemini `generateContent` client
//!
//! Sends one non-streaming request per call and pulls the first candidate's
//! first text part out of the response.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{GenerationError, Style, TextGenerator};
use crate::core::config::GeminiConfig;

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

/// Client for the Gemini generative language API
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("PromptRelay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    /// Parse a raw response body into the generated text
    fn extract_text(style: Style, body: &str) -> Result<String, GenerationError> {
        let parsed: GenerateContentResponse =
            serde_json::from_str(body).map_err(|e| GenerationError::MalformedResponse {
                style,
                message: e.to_string(),
            })?;

        let text = parsed
            .first_text()
            .ok_or_else(|| GenerationError::MalformedResponse {
                style,
                message: "missing candidates[0].content.parts[0].text".to_string(),
            })?;

        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse { style });
        }

        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, query: &str, style: Style) -> Result<String, GenerationError> {
        let prompt = style.build_prompt(query);
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &prompt }],
            }],
        };

        tracing::debug!(
            style = %style,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // without_url keeps the API key out of the message
                let message = e.without_url().to_string();
                tracing::error!(style = %style, "Error calling Gemini API: {}", message);
                GenerationError::Transport { style, message }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| GenerationError::Transport {
            style,
            message: e.without_url().to_string(),
        })?;

        if !status.is_success() {
            tracing::warn!(style = %style, status = %status, "Gemini API error: {}", body);
            return Err(GenerationError::Status {
                style,
                status: status.as_u16(),
                body,
            });
        }

        let text = Self::extract_text(style, &body).inspect_err(|e| {
            tracing::warn!("Unusable Gemini response: {}", e);
        })?;

        tracing::debug!(style = %style, response_len = text.len(), "Gemini response received");
        Ok(text)
    }
}

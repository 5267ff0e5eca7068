//! Generation module - client for the external generative language API
//!
//! A [`TextGenerator`] turns a query plus a [`Style`] into one generated
//! response. [`GeminiClient`] is the production implementation.

mod gemini_client;
mod style;

pub use gemini_client::GeminiClient;
pub use style::Style;

use async_trait::async_trait;
use thiserror::Error;

/// Why a single generation call produced no usable text
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{style} request failed: {message}")]
    Transport { style: Style, message: String },

    #[error("{style} request returned {status}: {body}")]
    Status {
        style: Style,
        status: u16,
        body: String,
    },

    #[error("{style} response malformed: {message}")]
    MalformedResponse { style: Style, message: String },

    #[error("{style} response contained no text")]
    EmptyResponse { style: Style },
}

/// One round trip to a generative language backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, query: &str, style: Style) -> Result<String, GenerationError>;
}

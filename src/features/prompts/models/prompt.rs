use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::modules::generation::Style;

/// A stored query together with its three generated answers
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Prompt {
    pub id: i32,
    pub user_id: String,
    pub query: String,
    pub casual_response: String,
    pub formal_response: String,
    pub blended_response: String,
    pub created_at: DateTime<Utc>,
}

/// One generated answer per style
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedResponses {
    pub casual: String,
    pub formal: String,
    pub blended: String,
}

impl GeneratedResponses {
    pub fn set(&mut self, style: Style, text: String) {
        let slot = match style {
            Style::Casual => &mut self.casual,
            Style::Formal => &mut self.formal,
            Style::Blended => &mut self.blended,
        };
        *slot = text;
    }
}

/// Insert payload; only built once every style has been generated
#[derive(Debug, Clone)]
pub struct NewPrompt {
    pub user_id: String,
    pub query: String,
    pub responses: GeneratedResponses,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::prompts::models::Prompt;

// Create request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePromptDto {
    /// Caller-supplied identifier of the owning user
    #[validate(required, length(min = 1))]
    pub user_id: Option<String>,

    /// Free-text query to answer in every style
    #[validate(required, length(min = 1))]
    pub query: Option<String>,
}

// Query params for listing a user's history
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPromptsQuery {
    /// Owner whose prompts are returned
    #[validate(required, length(min = 1))]
    pub user_id: Option<String>,
}

// Create response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePromptResponseDto {
    pub id: i32,
    pub casual_response: String,
    pub formal_response: String,
    pub blended_response: String,
}

// History entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PromptResponseDto {
    pub id: i32,
    pub query: String,
    pub casual_response: String,
    pub formal_response: String,
    pub blended_response: String,
    pub created_at: DateTime<Utc>,
}

impl From<Prompt> for PromptResponseDto {
    fn from(p: Prompt) -> Self {
        Self {
            id: p.id,
            query: p.query,
            casual_response: p.casual_response,
            formal_response: p.formal_response,
            blended_response: p.blended_response,
            created_at: p.created_at,
        }
    }
}

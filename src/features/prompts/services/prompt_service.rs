use std::sync::Arc;

use crate::core::error::Result;
use crate::features::prompts::dtos::{CreatePromptResponseDto, PromptResponseDto};
use crate::features::prompts::models::{GeneratedResponses, NewPrompt};
use crate::features::prompts::repositories::PromptStore;
use crate::modules::generation::{Style, TextGenerator};

/// Generates the three styled answers for a query and records them
pub struct PromptService {
    store: Arc<dyn PromptStore>,
    generator: Arc<dyn TextGenerator>,
}

impl std::fmt::Debug for PromptService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptService")
            .field("store", &"<PromptStore>")
            .field("generator", &"<TextGenerator>")
            .finish()
    }
}

impl PromptService {
    pub fn new(store: Arc<dyn PromptStore>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { store, generator }
    }

    /// Generate every style in order, then persist.
    ///
    /// The first failed generation aborts the request before anything is
    /// written, so a stored record always has all three answers.
    pub async fn create(&self, user_id: String, query: String) -> Result<CreatePromptResponseDto> {
        let mut responses = GeneratedResponses::default();
        for style in Style::ALL {
            let text = self
                .generator
                .generate(&query, style)
                .await
                .inspect_err(|e| {
                    tracing::warn!(user_id = %user_id, "Aborting prompt creation: {}", e);
                })?;
            responses.set(style, text);
        }

        let id = self
            .store
            .insert(NewPrompt {
                user_id: user_id.clone(),
                query,
                responses: responses.clone(),
            })
            .await?;

        tracing::info!(prompt_id = id, user_id = %user_id, "Prompt created");

        Ok(CreatePromptResponseDto {
            id,
            casual_response: responses.casual,
            formal_response: responses.formal,
            blended_response: responses.blended,
        })
    }

    /// History of `user_id`, newest first
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<PromptResponseDto>> {
        let prompts = self.store.list_by_user(user_id).await?;
        tracing::debug!(user_id = %user_id, count = prompts.len(), "Prompts listed");

        Ok(prompts.into_iter().map(PromptResponseDto::from).collect())
    }
}

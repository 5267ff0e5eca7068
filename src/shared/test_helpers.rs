//! In-process doubles for the storage and generation seams

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::core::error::{AppError, Result};
use crate::features::prompts::models::{NewPrompt, Prompt};
use crate::features::prompts::PromptStore;
use crate::modules::generation::{GenerationError, Style, TextGenerator};

/// Vec-backed store with the same ordering contract as the postgres one
#[derive(Default)]
pub struct InMemoryPromptStore {
    rows: Mutex<Vec<Prompt>>,
    failure: Mutex<Option<String>>,
}

impl InMemoryPromptStore {
    /// Make every subsequent operation fail with `message`
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn records(&self) -> Vec<Prompt> {
        self.rows.lock().unwrap().clone()
    }

    fn check_failure(&self) -> Result<()> {
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(AppError::Database(sqlx::Error::Protocol(message.clone()))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PromptStore for InMemoryPromptStore {
    async fn ensure_schema(&self) -> Result<()> {
        self.check_failure()
    }

    async fn insert(&self, prompt: NewPrompt) -> Result<i32> {
        self.check_failure()?;
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i32 + 1;
        rows.push(Prompt {
            id,
            user_id: prompt.user_id,
            query: prompt.query,
            casual_response: prompt.responses.casual,
            formal_response: prompt.responses.formal,
            blended_response: prompt.responses.blended,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Prompt>> {
        self.check_failure()?;
        let mut prompts: Vec<Prompt> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        prompts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(prompts)
    }
}

/// Generator returning canned text per style and recording every call
#[derive(Default)]
pub struct ScriptedGenerator {
    responses: HashMap<Style, String>,
    failing: HashSet<Style>,
    calls: Mutex<Vec<(Style, String)>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, style: Style, text: &str) -> Self {
        self.responses.insert(style, text.to_string());
        self
    }

    pub fn failing(mut self, style: Style) -> Self {
        self.failing.insert(style);
        self
    }

    pub fn calls(&self) -> Vec<(Style, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, query: &str, style: Style) -> std::result::Result<String, GenerationError> {
        self.calls.lock().unwrap().push((style, query.to_string()));

        if self.failing.contains(&style) {
            return Err(GenerationError::Status {
                style,
                status: 503,
                body: "scripted failure".to_string(),
            });
        }

        self.responses
            .get(&style)
            .cloned()
            .ok_or(GenerationError::EmptyResponse { style })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::prompts::models::GeneratedResponses;

    #[tokio::test]
    async fn test_in_memory_store_orders_newest_first() {
        let store = InMemoryPromptStore::default();
        for query in ["a", "b", "c"] {
            store
                .insert(NewPrompt {
                    user_id: "u1".to_string(),
                    query: query.to_string(),
                    responses: GeneratedResponses::default(),
                })
                .await
                .unwrap();
        }

        let ids: Vec<i32> = store
            .list_by_user("u1")
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}

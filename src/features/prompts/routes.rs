use axum::{routing::post, Router};
use std::sync::Arc;

use crate::features::prompts::{handlers, services::PromptService};

/// Create and list routes for tri-style prompts
pub fn routes(service: Arc<PromptService>) -> Router {
    Router::new()
        .route(
            "/prompt",
            post(handlers::create_prompt).get(handlers::list_prompts),
        )
        .with_state(service)
}

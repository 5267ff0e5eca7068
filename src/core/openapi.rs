use utoipa::{Modify, OpenApi};

use crate::features::prompts::{dtos as prompts_dtos, handlers as prompts_handlers};
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        prompts_handlers::prompt_handler::create_prompt,
        prompts_handlers::prompt_handler::list_prompts,
    ),
    components(
        schemas(
            ErrorResponse,
            prompts_dtos::CreatePromptDto,
            prompts_dtos::CreatePromptResponseDto,
            prompts_dtos::PromptResponseDto,
        )
    ),
    tags(
        (name = "prompts", description = "Tri-style prompt generation and history"),
    ),
    info(
        title = "Prompt Relay API",
        version = "0.1.0",
        description = "Generates casual, formal and blended answers to user queries",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

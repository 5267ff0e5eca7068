use axum::{extract::Query, extract::State, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::prompts::dtos::{
    CreatePromptDto, CreatePromptResponseDto, ListPromptsQuery, PromptResponseDto,
};
use crate::features::prompts::services::PromptService;
use crate::shared::types::ErrorResponse;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";
pub const MISSING_USER_ID_MESSAGE: &str = "Missing user_id parameter";

/// Generate casual, formal and blended answers for a query and store them
#[utoipa::path(
    post,
    path = "/prompt",
    request_body = CreatePromptDto,
    responses(
        (status = 200, description = "Prompt answered and stored", body = CreatePromptResponseDto),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 500, description = "Generation or storage failure", body = ErrorResponse)
    ),
    tag = "prompts"
)]
pub async fn create_prompt(
    State(service): State<Arc<PromptService>>,
    AppJson(payload): AppJson<Option<CreatePromptDto>>,
) -> Result<Json<CreatePromptResponseDto>> {
    // A literal `null` body carries no fields at all
    let Some(dto) = payload else {
        return Err(AppError::BadRequest(MISSING_FIELDS_MESSAGE.to_string()));
    };
    dto.validate()
        .map_err(|_| AppError::BadRequest(MISSING_FIELDS_MESSAGE.to_string()))?;
    let (Some(user_id), Some(query)) = (dto.user_id, dto.query) else {
        return Err(AppError::BadRequest(MISSING_FIELDS_MESSAGE.to_string()));
    };

    let created = service.create(user_id, query).await?;
    Ok(Json(created))
}

/// List a user's prompts, most recent first
#[utoipa::path(
    get,
    path = "/prompt",
    params(ListPromptsQuery),
    responses(
        (status = 200, description = "Prompt history (empty when none exist)", body = Vec<PromptResponseDto>),
        (status = 400, description = "Missing user_id parameter", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "prompts"
)]
pub async fn list_prompts(
    State(service): State<Arc<PromptService>>,
    Query(params): Query<ListPromptsQuery>,
) -> Result<Json<Vec<PromptResponseDto>>> {
    params
        .validate()
        .map_err(|_| AppError::BadRequest(MISSING_USER_ID_MESSAGE.to_string()))?;
    let Some(user_id) = params.user_id else {
        return Err(AppError::BadRequest(MISSING_USER_ID_MESSAGE.to_string()));
    };

    let prompts = service.list_by_user(&user_id).await?;
    Ok(Json(prompts))
}

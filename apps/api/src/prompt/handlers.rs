//! Axum route handlers for the Prompt API. All endpoints are pure previews:
//! the render pipeline builds its own prompt from the same functions.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::prompt::builder::{
    build_edit_prompt, build_fallback_prompt, build_prompt, ConfigurationItem, PromptOptions,
};
use crate::prompt::scene::{build_complete_prompt, build_concise_prompt, CompletePrompt, SceneOptions};

#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct ConfigurationPromptRequest {
    pub items: Vec<ConfigurationItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenePromptResponse {
    #[serde(flatten)]
    pub complete: CompletePrompt,
    pub concise: String,
}

/// POST /api/v1/prompts
///
/// Builds the constraint-bearing edit prompt for the given options.
pub async fn handle_build_prompt(
    Json(options): Json<PromptOptions>,
) -> Result<Json<PromptResponse>, AppError> {
    if options.n_workstations == 0 && !options.strict {
        return Err(AppError::Validation(
            "nWorkstations must be at least 1".to_string(),
        ));
    }

    Ok(Json(PromptResponse {
        prompt: build_prompt(&options),
    }))
}

/// POST /api/v1/prompts/configuration
///
/// Adapts a saved configuration line-item list. An empty list falls back to
/// the fixed-default prompt.
pub async fn handle_configuration_prompt(
    Json(request): Json<ConfigurationPromptRequest>,
) -> Json<PromptResponse> {
    let prompt = if request.items.is_empty() {
        build_fallback_prompt()
    } else {
        build_edit_prompt(&request.items)
    };

    Json(PromptResponse { prompt })
}

/// POST /api/v1/prompts/scene
///
/// Builds the descriptive scene bundle: positive prompt, negative prompt,
/// mask instructions, fixed settings, plus the concise sentence-form variant.
pub async fn handle_scene_prompt(
    Json(options): Json<SceneOptions>,
) -> Result<Json<ScenePromptResponse>, AppError> {
    if options.workstations == 0 {
        return Err(AppError::Validation(
            "workstations must be at least 1".to_string(),
        ));
    }
    if !(options.area_m2 > 0.0) {
        return Err(AppError::Validation(
            "areaM2 must be a positive number".to_string(),
        ));
    }

    Ok(Json(ScenePromptResponse {
        complete: build_complete_prompt(&options),
        concise: build_concise_prompt(&options),
    }))
}

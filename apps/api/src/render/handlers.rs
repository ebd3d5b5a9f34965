//! Axum route handlers for the Render API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::pipeline::{render_project, RenderRequest, RenderResponse};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRenderRequest {
    /// Retry flag: selects the strict template after a generation violated
    /// masking constraints.
    #[serde(default)]
    pub strict: bool,
}

/// POST /api/v1/projects/:id/render
///
/// Runs the full pipeline for the current project: selection → prompt →
/// image generation → scenario. One render at a time per session.
pub async fn handle_start_render(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(request): Json<StartRenderRequest>,
) -> Result<Json<RenderResponse>, AppError> {
    let project = state
        .projects
        .current_project()
        .await
        .ok_or_else(|| AppError::NotFound("No current project".to_string()))?;
    if project.id != project_id {
        return Err(AppError::NotFound(format!(
            "Project {project_id} not found"
        )));
    }

    // Prefer the raw payload over the display URL as the base image.
    let base_image_url = match state.projects.photo_data_url().await {
        Some(data_url) => data_url,
        None => project.photo_url.clone().ok_or_else(|| {
            AppError::UnprocessableEntity("Project has no photo to render against".to_string())
        })?,
    };

    if !state.projects.try_begin_generating().await {
        return Err(AppError::UnprocessableEntity(
            "A render is already in progress".to_string(),
        ));
    }

    let catalog = state.catalog.snapshot().await;
    let result = render_project(
        &catalog,
        &RenderRequest {
            params: project.params.clone(),
            base_image_url,
            strict: request.strict,
        },
        state.renderer.as_ref(),
        &|pct| tracing::info!("Render progress: {pct}%"),
    )
    .await;

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            state.projects.set_generating(false).await;
            return Err(e);
        }
    };

    state.projects.set_render_result(response.clone()).await;
    state
        .projects
        .set_step(crate::models::project::Step::Result)
        .await;
    state.projects.save().await?;
    tracing::info!("Render {} completed", response.render_id);

    Ok(Json(response))
}

/// GET /api/v1/projects/:id/render
///
/// Returns the last render result for the current project.
pub async fn handle_get_render(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<RenderResponse>, AppError> {
    let project = state
        .projects
        .current_project()
        .await
        .ok_or_else(|| AppError::NotFound("No current project".to_string()))?;
    if project.id != project_id {
        return Err(AppError::NotFound(format!(
            "Project {project_id} not found"
        )));
    }

    let response = state
        .projects
        .render_result()
        .await
        .ok_or_else(|| AppError::NotFound("No render result yet".to_string()))?;

    Ok(Json(response))
}

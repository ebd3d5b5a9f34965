//! Axum route handlers for the Project API. One configurator session at a
//! time: all routes operate on the current project.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::project::{Project, ProjectParams, Step};
use crate::project::store::PersistedSession;
use crate::selection::handlers::validate_selection_params;
use crate::selection::selector::SelectionParams;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStepRequest {
    pub step: Step,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPhotoRequest {
    pub photo_url: String,
    /// Raw image payload as a data URL; preferred as the render base image.
    pub photo_data_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetMaskRequest {
    pub mask_data_url: String,
}

/// POST /api/v1/projects
///
/// Starts a new configurator session. Replaces any existing project and
/// resets the flow to the info step.
pub async fn handle_create_project(
    State(state): State<AppState>,
    Json(params): Json<ProjectParams>,
) -> Result<Json<Project>, AppError> {
    validate_project_params(&params)?;

    let project = state.projects.create_project(params).await;
    state.projects.save().await?;
    tracing::info!(
        "Project created: {} ({} workstations, {}€)",
        project.id,
        project.params.workstations,
        project.params.budget
    );

    Ok(Json(project))
}

/// GET /api/v1/projects/current
pub async fn handle_get_current_project(
    State(state): State<AppState>,
) -> Result<Json<Project>, AppError> {
    let project = state
        .projects
        .current_project()
        .await
        .ok_or_else(|| AppError::NotFound("No current project".to_string()))?;

    Ok(Json(project))
}

/// GET /api/v1/projects/current/session
///
/// The durable view of the session: current project and step, transient
/// fields stripped.
pub async fn handle_get_session(State(state): State<AppState>) -> Json<PersistedSession> {
    Json(state.projects.persisted_view().await)
}

/// PATCH /api/v1/projects/current/step
pub async fn handle_set_step(
    State(state): State<AppState>,
    Json(request): Json<SetStepRequest>,
) -> Result<Json<Value>, AppError> {
    require_current_project(&state).await?;
    state.projects.set_step(request.step).await;
    state.projects.save().await?;

    Ok(Json(json!({ "step": request.step })))
}

/// PATCH /api/v1/projects/current/photo
pub async fn handle_set_photo(
    State(state): State<AppState>,
    Json(request): Json<SetPhotoRequest>,
) -> Result<Json<Project>, AppError> {
    if request.photo_url.trim().is_empty() {
        return Err(AppError::Validation("photoUrl cannot be empty".to_string()));
    }
    require_current_project(&state).await?;

    state
        .projects
        .set_photo(request.photo_url, request.photo_data_url)
        .await;
    state.projects.save().await?;

    // set_photo only mutates an existing project, checked above
    let project = state
        .projects
        .current_project()
        .await
        .ok_or_else(|| AppError::NotFound("No current project".to_string()))?;
    Ok(Json(project))
}

/// PATCH /api/v1/projects/current/mask
pub async fn handle_set_mask(
    State(state): State<AppState>,
    Json(request): Json<SetMaskRequest>,
) -> Result<Json<Value>, AppError> {
    if request.mask_data_url.trim().is_empty() {
        return Err(AppError::Validation(
            "maskDataUrl cannot be empty".to_string(),
        ));
    }
    require_current_project(&state).await?;

    state.projects.set_mask(request.mask_data_url).await;
    state.projects.save().await?;

    Ok(Json(json!({ "updated": true })))
}

/// POST /api/v1/projects/current/reset
///
/// Tears the whole session down: project, step, render result, photo.
pub async fn handle_reset(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.projects.reset().await;
    state.projects.save().await?;
    tracing::info!("Project session reset");

    Ok(Json(json!({ "reset": true })))
}

async fn require_current_project(state: &AppState) -> Result<Project, AppError> {
    state
        .projects
        .current_project()
        .await
        .ok_or_else(|| AppError::NotFound("No current project".to_string()))
}

pub(crate) fn validate_project_params(params: &ProjectParams) -> Result<(), AppError> {
    if params.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    if !(params.area_m2 > 0.0) {
        return Err(AppError::Validation(
            "areaM2 must be a positive number".to_string(),
        ));
    }
    validate_selection_params(&SelectionParams {
        budget: params.budget,
        workstations: params.workstations,
        style_level: params.style_level,
        meeting_tables_preference: params.meeting_tables_preference,
    })
}

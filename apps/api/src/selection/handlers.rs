//! Axum route handlers for the Selection API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::selection::selector::{
    select_furniture, selection_summary, FurnitureSelection, SelectionParams,
};
use crate::state::AppState;

/// Workstation count ceiling accepted by the form layer.
const MAX_WORKSTATIONS: u32 = 400;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub selection: FurnitureSelection,
    pub summary: String,
}

/// POST /api/v1/selection
///
/// Runs one selection pass over the current catalog snapshot. Useful for
/// previewing the proposal before committing to a render.
pub async fn handle_select(
    State(state): State<AppState>,
    Json(params): Json<SelectionParams>,
) -> Result<Json<SelectionResponse>, AppError> {
    validate_selection_params(&params)?;

    let catalog = state.catalog.snapshot().await;
    let selection = select_furniture(&catalog, &params);
    let summary = selection_summary(&selection);

    tracing::info!(
        "Selection preview: {} unit(s), {}€ of {}€ budget",
        selection.items.len(),
        selection.total_cost,
        params.budget
    );

    Ok(Json(SelectionResponse { selection, summary }))
}

pub(crate) fn validate_selection_params(params: &SelectionParams) -> Result<(), AppError> {
    if params.workstations == 0 || params.workstations > MAX_WORKSTATIONS {
        return Err(AppError::Validation(format!(
            "workstations must be between 1 and {MAX_WORKSTATIONS}"
        )));
    }
    if !(params.budget > 0.0) {
        return Err(AppError::Validation(
            "budget must be a positive number".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::StyleLevel;

    fn params(workstations: u32, budget: f64) -> SelectionParams {
        SelectionParams {
            budget,
            workstations,
            style_level: StyleLevel::Standard,
            meeting_tables_preference: true,
        }
    }

    #[test]
    fn test_rejects_zero_and_oversized_workstations() {
        assert!(validate_selection_params(&params(0, 1000.0)).is_err());
        assert!(validate_selection_params(&params(401, 1000.0)).is_err());
        assert!(validate_selection_params(&params(400, 1000.0)).is_ok());
        assert!(validate_selection_params(&params(1, 1000.0)).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_budget() {
        assert!(validate_selection_params(&params(10, 0.0)).is_err());
        assert!(validate_selection_params(&params(10, -500.0)).is_err());
        assert!(validate_selection_params(&params(10, f64::NAN)).is_err());
    }
}

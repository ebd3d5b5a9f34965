//! Axum route handlers for the Catalog API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::catalog::formatter::{catalog_context, CatalogContext};
use crate::catalog::item::CatalogItem;
use crate::catalog::store::{CreateItemInput, FurnitureRecord, UpdateItemInput};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CatalogListResponse {
    pub items: Vec<CatalogItem>,
    pub total: usize,
}

/// GET /api/v1/catalog
///
/// Returns the full catalog snapshot.
pub async fn handle_list_catalog(State(state): State<AppState>) -> Json<CatalogListResponse> {
    let items = state.catalog.snapshot().await;
    let total = items.len();
    Json(CatalogListResponse { items, total })
}

/// POST /api/v1/catalog
///
/// Creates a catalog item. The id is assigned server-side.
pub async fn handle_create_item(
    State(state): State<AppState>,
    Json(input): Json<CreateItemInput>,
) -> Result<Json<CatalogItem>, AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    if input.price <= 0.0 {
        return Err(AppError::Validation("price must be positive".to_string()));
    }

    let item = state.catalog.insert(input).await;
    tracing::info!("Catalog item created: {} ({})", item.name, item.id);

    Ok(Json(item))
}

/// PATCH /api/v1/catalog/:id
///
/// Partial update; absent fields are left untouched.
pub async fn handle_update_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(updates): Json<UpdateItemInput>,
) -> Result<Json<CatalogItem>, AppError> {
    if let Some(price) = updates.price {
        if price <= 0.0 {
            return Err(AppError::Validation("price must be positive".to_string()));
        }
    }

    let item = state
        .catalog
        .update(item_id, updates)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Catalog item {item_id} not found")))?;

    Ok(Json(item))
}

/// DELETE /api/v1/catalog/:id
pub async fn handle_delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    if !state.catalog.remove(item_id).await {
        return Err(AppError::NotFound(format!(
            "Catalog item {item_id} not found"
        )));
    }

    Ok(Json(json!({ "deleted": true, "id": item_id })))
}

/// GET /api/v1/catalog/backup
///
/// Storage-shaped dump of the whole catalog, suitable for re-seeding.
pub async fn handle_catalog_backup(State(state): State<AppState>) -> Json<Vec<FurnitureRecord>> {
    let records = state.catalog.export_records().await;
    tracing::info!("Catalog backup exported: {} record(s)", records.len());
    Json(records)
}

/// GET /api/v1/catalog/context
///
/// The prompt-ready catalog bundle: grouped text block, reference-image
/// URLs, and product count.
pub async fn handle_catalog_context(State(state): State<AppState>) -> Json<CatalogContext> {
    let items = state.catalog.snapshot().await;
    Json(catalog_context(&items))
}

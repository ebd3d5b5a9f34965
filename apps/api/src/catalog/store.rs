//! In-memory furniture catalog registry.
//!
//! The durable catalog backend is an external collaborator; this registry is
//! the in-process snapshot the selector and the render pipeline read from.
//! Seed and backup use the storage-side `FurnitureRecord` shape so dumps stay
//! compatible with the external store's vocabulary.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::catalog::item::{CatalogItem, Dimensions, ProductType};
use crate::catalog::mapping::{from_storage_category, to_storage_category, FurnitureCategory};

/// Defaults applied when a record omits optional physical attributes.
const DEFAULT_WIDTH_CM: f64 = 100.0;
const DEFAULT_DEPTH_CM: f64 = 50.0;
const DEFAULT_HEIGHT_CM: f64 = 75.0;
const DEFAULT_STOCK_QUANTITY: i32 = 10;
const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/400";

/// Storage-side furniture record, as read from seed files and written to
/// backups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FurnitureRecord {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: FurnitureCategory,
    pub price: f64,
    pub width_cm: f64,
    pub depth_cm: f64,
    pub height_cm: f64,
    pub image_url: String,
    pub brand: Option<String>,
    pub material: Option<String>,
    pub color: Option<String>,
    pub stock_quantity: i32,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FurnitureRecord {
    fn into_item(self) -> CatalogItem {
        CatalogItem {
            id: self.id,
            name: self.name,
            description: self.description.unwrap_or_default(),
            product_type: from_storage_category(self.category),
            price: self.price,
            image_url: Some(self.image_url),
            dimensions: Some(Dimensions {
                width_cm: self.width_cm,
                depth_cm: self.depth_cm,
                height_cm: self.height_cm,
            }),
            brand: self.brand,
            material: self.material,
            color: self.color,
        }
    }

    fn from_item(item: &CatalogItem) -> Self {
        let dims = item.dimensions.unwrap_or(Dimensions {
            width_cm: DEFAULT_WIDTH_CM,
            depth_cm: DEFAULT_DEPTH_CM,
            height_cm: DEFAULT_HEIGHT_CM,
        });
        let now = Utc::now();
        FurnitureRecord {
            id: item.id,
            name: item.name.clone(),
            description: if item.description.is_empty() {
                None
            } else {
                Some(item.description.clone())
            },
            category: to_storage_category(item.product_type),
            price: item.price,
            width_cm: dims.width_cm,
            depth_cm: dims.depth_cm,
            height_cm: dims.height_cm,
            image_url: item
                .image_url
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string()),
            brand: item.brand.clone(),
            material: item.material.clone(),
            color: item.color.clone(),
            stock_quantity: DEFAULT_STOCK_QUANTITY,
            is_available: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input shape for creating a catalog item. The id is assigned by the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub price: f64,
    pub image_url: Option<String>,
    pub dimensions: Option<Dimensions>,
    pub brand: Option<String>,
    pub material: Option<String>,
    pub color: Option<String>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemInput {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<ProductType>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub dimensions: Option<Dimensions>,
    pub brand: Option<String>,
    pub material: Option<String>,
    pub color: Option<String>,
}

/// Thread-safe in-memory catalog. Cheap to clone — handlers share one
/// instance through `AppState`.
#[derive(Clone, Default)]
pub struct CatalogStore {
    items: Arc<RwLock<Vec<CatalogItem>>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a catalog from a JSON seed file of storage-side records.
    /// Unavailable records are skipped, matching the external store's
    /// `is_available` filter.
    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog seed {}", path.display()))?;
        let records: Vec<FurnitureRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid catalog seed {}", path.display()))?;
        let items: Vec<CatalogItem> = records
            .into_iter()
            .filter(|r| r.is_available)
            .map(FurnitureRecord::into_item)
            .collect();
        Ok(Self {
            items: Arc::new(RwLock::new(items)),
        })
    }

    /// Immutable snapshot of the catalog for one selection call.
    pub async fn snapshot(&self) -> Vec<CatalogItem> {
        self.items.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn insert(&self, input: CreateItemInput) -> CatalogItem {
        let item = CatalogItem {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            product_type: input.product_type,
            price: input.price,
            image_url: input.image_url,
            dimensions: input.dimensions,
            brand: input.brand,
            material: input.material,
            color: input.color,
        };
        self.items.write().await.push(item.clone());
        item
    }

    pub async fn update(&self, id: Uuid, updates: UpdateItemInput) -> Option<CatalogItem> {
        let mut items = self.items.write().await;
        let item = items.iter_mut().find(|i| i.id == id)?;
        if let Some(name) = updates.name {
            item.name = name;
        }
        if let Some(description) = updates.description {
            item.description = description;
        }
        if let Some(product_type) = updates.product_type {
            item.product_type = product_type;
        }
        if let Some(price) = updates.price {
            item.price = price;
        }
        if let Some(image_url) = updates.image_url {
            item.image_url = Some(image_url);
        }
        if let Some(dimensions) = updates.dimensions {
            item.dimensions = Some(dimensions);
        }
        if let Some(brand) = updates.brand {
            item.brand = Some(brand);
        }
        if let Some(material) = updates.material {
            item.material = Some(material);
        }
        if let Some(color) = updates.color {
            item.color = Some(color);
        }
        Some(item.clone())
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| i.id != id);
        items.len() < before
    }

    /// Storage-shaped dump of the whole catalog, for backup/export.
    pub async fn export_records(&self) -> Vec<FurnitureRecord> {
        self.items
            .read()
            .await
            .iter()
            .map(FurnitureRecord::from_item)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(name: &str, product_type: ProductType, price: f64) -> CreateItemInput {
        CreateItemInput {
            name: name.to_string(),
            description: String::new(),
            product_type,
            price,
            image_url: None,
            dimensions: None,
            brand: None,
            material: None,
            color: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_snapshot() {
        let store = CatalogStore::new();
        store
            .insert(create_input("Bureau Standard", ProductType::Desk, 200.0))
            .await;
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "Bureau Standard");
    }

    #[tokio::test]
    async fn test_update_is_partial() {
        let store = CatalogStore::new();
        let item = store
            .insert(create_input("Chaise", ProductType::Chair, 150.0))
            .await;
        let updated = store
            .update(
                item.id,
                UpdateItemInput {
                    price: Some(175.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price, 175.0);
        assert_eq!(updated.name, "Chaise");
        assert_eq!(updated.product_type, ProductType::Chair);
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_none() {
        let store = CatalogStore::new();
        let result = store.update(Uuid::new_v4(), UpdateItemInput::default()).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_remove() {
        let store = CatalogStore::new();
        let item = store
            .insert(create_input("Armoire", ProductType::Storage, 300.0))
            .await;
        assert!(store.remove(item.id).await);
        assert!(!store.remove(item.id).await);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_export_applies_storage_defaults() {
        let store = CatalogStore::new();
        store
            .insert(create_input("Lampe", ProductType::Lighting, 45.0))
            .await;
        let records = store.export_records().await;
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.category, FurnitureCategory::Lighting);
        assert_eq!(record.width_cm, DEFAULT_WIDTH_CM);
        assert_eq!(record.image_url, PLACEHOLDER_IMAGE_URL);
        assert_eq!(record.stock_quantity, DEFAULT_STOCK_QUANTITY);
        assert!(record.is_available);
    }

    #[test]
    fn test_record_into_item_maps_category_and_dimensions() {
        let record = FurnitureRecord {
            id: Uuid::new_v4(),
            name: "Caisson".to_string(),
            description: Some("Caisson de rangement".to_string()),
            category: FurnitureCategory::Cabinet,
            price: 120.0,
            width_cm: 40.0,
            depth_cm: 50.0,
            height_cm: 55.0,
            image_url: "https://example.com/caisson.jpg".to_string(),
            brand: None,
            material: None,
            color: None,
            stock_quantity: 3,
            is_available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let item = record.into_item();
        // Cabinet is a storage-side refinement; locally it is storage.
        assert_eq!(item.product_type, ProductType::Storage);
        assert_eq!(item.dimensions.unwrap().width_cm, 40.0);
        assert_eq!(item.description, "Caisson de rangement");
    }
}

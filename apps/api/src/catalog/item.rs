use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Local product vocabulary used by the configurator and the selection
/// engine. The storage side speaks `FurnitureCategory` — see `mapping`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductType {
    Desk,
    Chair,
    MeetingTable,
    Storage,
    Lighting,
    Decoration,
    Other,
}

/// Physical dimensions in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width_cm: f64,
    pub depth_cm: f64,
    pub height_cm: f64,
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{}x{} cm",
            self.width_cm, self.depth_cm, self.height_cm
        )
    }
}

/// A purchasable furniture record. Immutable snapshot per selection call —
/// the selector clones one entry per unit purchased.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: Uuid,
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

//! Bidirectional mapping between the local `ProductType` vocabulary and the
//! storage-side `FurnitureCategory` vocabulary.
//!
//! The two tag sets are closed but not symmetric: the storage side carries
//! finer categories (cabinet, sofa) that collapse onto local types, and the
//! local side splits accessories into decoration/other. Both directions are
//! exhaustive `match`es so a new category fails to compile until mapped.

use serde::{Deserialize, Serialize};

use crate::catalog::item::ProductType;

/// Storage-side furniture category vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FurnitureCategory {
    Desk,
    Chair,
    Storage,
    MeetingTable,
    Accessories,
    Cabinet,
    Sofa,
    Lighting,
}

/// Maps a local product type to its storage category.
/// Decoration and other both land on `accessories`.
pub fn to_storage_category(product_type: ProductType) -> FurnitureCategory {
    match product_type {
        ProductType::Desk => FurnitureCategory::Desk,
        ProductType::Chair => FurnitureCategory::Chair,
        ProductType::MeetingTable => FurnitureCategory::MeetingTable,
        ProductType::Storage => FurnitureCategory::Storage,
        ProductType::Lighting => FurnitureCategory::Lighting,
        ProductType::Decoration => FurnitureCategory::Accessories,
        ProductType::Other => FurnitureCategory::Accessories,
    }
}

/// Maps a storage category back to the local product type.
/// Fallbacks: cabinet → storage, accessories → decoration, sofa → other.
pub fn from_storage_category(category: FurnitureCategory) -> ProductType {
    match category {
        FurnitureCategory::Desk => ProductType::Desk,
        FurnitureCategory::Chair => ProductType::Chair,
        FurnitureCategory::MeetingTable => ProductType::MeetingTable,
        FurnitureCategory::Storage => ProductType::Storage,
        FurnitureCategory::Cabinet => ProductType::Storage,
        FurnitureCategory::Accessories => ProductType::Decoration,
        FurnitureCategory::Sofa => ProductType::Other,
        FurnitureCategory::Lighting => ProductType::Lighting,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PRODUCT_TYPES: [ProductType; 7] = [
        ProductType::Desk,
        ProductType::Chair,
        ProductType::MeetingTable,
        ProductType::Storage,
        ProductType::Lighting,
        ProductType::Decoration,
        ProductType::Other,
    ];

    const ALL_CATEGORIES: [FurnitureCategory; 8] = [
        FurnitureCategory::Desk,
        FurnitureCategory::Chair,
        FurnitureCategory::Storage,
        FurnitureCategory::MeetingTable,
        FurnitureCategory::Accessories,
        FurnitureCategory::Cabinet,
        FurnitureCategory::Sofa,
        FurnitureCategory::Lighting,
    ];

    #[test]
    fn test_core_types_round_trip_exactly() {
        // Types the selector depends on must survive a full round trip.
        for product_type in [
            ProductType::Desk,
            ProductType::Chair,
            ProductType::MeetingTable,
            ProductType::Storage,
            ProductType::Lighting,
        ] {
            assert_eq!(
                from_storage_category(to_storage_category(product_type)),
                product_type,
                "{product_type:?} must round-trip"
            );
        }
    }

    #[test]
    fn test_cabinet_collapses_to_storage() {
        assert_eq!(
            from_storage_category(FurnitureCategory::Cabinet),
            ProductType::Storage
        );
    }

    #[test]
    fn test_sofa_falls_back_to_other() {
        assert_eq!(
            from_storage_category(FurnitureCategory::Sofa),
            ProductType::Other
        );
    }

    #[test]
    fn test_decoration_and_other_share_accessories() {
        assert_eq!(
            to_storage_category(ProductType::Decoration),
            FurnitureCategory::Accessories
        );
        assert_eq!(
            to_storage_category(ProductType::Other),
            FurnitureCategory::Accessories
        );
    }

    #[test]
    fn test_every_tag_is_mapped() {
        // The matches are exhaustive at compile time; this pins the runtime
        // behavior for every member of both closed sets.
        for product_type in ALL_PRODUCT_TYPES {
            let _ = to_storage_category(product_type);
        }
        for category in ALL_CATEGORIES {
            let _ = from_storage_category(category);
        }
    }

    #[test]
    fn test_furniture_category_snake_case_wire_format() {
        assert_eq!(
            serde_json::to_string(&FurnitureCategory::MeetingTable).unwrap(),
            r#""meeting_table""#
        );
    }
}

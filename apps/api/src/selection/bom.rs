//! Bill of materials — groups the flat unit list of a selection into
//! per-product lines with quantities and price ranges, and derives the
//! scenario totals shown alongside the rendered image.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::item::ProductType;
use crate::models::project::ProjectParams;
use crate::selection::selector::FurnitureSelection;

/// Monthly rental estimate as a fraction of the purchase price.
const MONTHLY_RENT_RATE: f64 = 0.08;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// One grouped BOM line: identical selected units collapse into a quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomItem {
    pub sku: String,
    pub label: String,
    pub qty: u32,
    pub unit_price_range: Option<PriceRange>,
    #[serde(rename = "type")]
    pub item_type: ProductType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioTotals {
    pub buy_range: PriceRange,
    pub rent_range: PriceRange,
}

/// The decision package for one configuration: grouped BOM, buy/rent
/// estimates, and commercial notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub title: String,
    pub bom: Vec<BomItem>,
    pub totals: ScenarioTotals,
    pub notes: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// BOM assembly
// ────────────────────────────────────────────────────────────────────────────

/// Groups identical units (same catalog id) into BOM lines, preserving the
/// category order of the selection pass (desks, chairs, storage, meeting
/// tables, other).
pub fn build_bom(selection: &FurnitureSelection) -> Vec<BomItem> {
    let mut order: Vec<Uuid> = Vec::new();
    let mut lines: HashMap<Uuid, BomItem> = HashMap::new();

    for item in &selection.items {
        if let Some(line) = lines.get_mut(&item.id) {
            line.qty += 1;
            continue;
        }
        order.push(item.id);
        lines.insert(
            item.id,
            BomItem {
                sku: sku_for(item.product_type, item.id),
                label: item.name.clone(),
                qty: 1,
                unit_price_range: Some(PriceRange {
                    min: item.price,
                    max: item.price,
                }),
                item_type: item.product_type,
            },
        );
    }

    order
        .into_iter()
        .filter_map(|id| lines.remove(&id))
        .collect()
}

/// Buy range from the unit price ranges, rent range at the monthly rate.
pub fn calculate_totals(bom: &[BomItem]) -> ScenarioTotals {
    let buy_min: f64 = bom
        .iter()
        .map(|line| line.unit_price_range.map_or(0.0, |r| r.min) * line.qty as f64)
        .sum();
    let buy_max: f64 = bom
        .iter()
        .map(|line| line.unit_price_range.map_or(0.0, |r| r.max) * line.qty as f64)
        .sum();

    ScenarioTotals {
        buy_range: PriceRange {
            min: buy_min,
            max: buy_max,
        },
        rent_range: PriceRange {
            min: (buy_min * MONTHLY_RENT_RATE).round(),
            max: (buy_max * MONTHLY_RENT_RATE).round(),
        },
    }
}

/// Builds the full scenario for one rendered configuration.
pub fn build_scenario(selection: &FurnitureSelection, params: &ProjectParams) -> Scenario {
    let bom = build_bom(selection);
    let totals = calculate_totals(&bom);

    let mut notes = vec![
        "Visualisation générée par IA".to_string(),
        "Prix incluant la livraison standard".to_string(),
        "Installation estimée à 2-3 jours".to_string(),
        "Garantie 2 ans sur le mobilier".to_string(),
    ];
    if params.meeting_tables_preference {
        notes.push(format!(
            "{} espace(s) de réunion intégré(s)",
            selection.breakdown.meeting_tables
        ));
    } else {
        notes.push("Configuration open space optimisée".to_string());
    }

    Scenario {
        title: format!(
            "Configuration {} - {} postes",
            params.style_level, params.workstations
        ),
        bom,
        totals,
        notes,
    }
}

/// Short SKU derived from the product type and the catalog id.
fn sku_for(product_type: ProductType, id: Uuid) -> String {
    let prefix = match product_type {
        ProductType::Desk => "DSK",
        ProductType::Chair => "CHR",
        ProductType::Storage => "STG",
        ProductType::MeetingTable => "MTB",
        ProductType::Lighting => "LGT",
        ProductType::Decoration => "DEC",
        ProductType::Other => "OTH",
    };
    let short = id.simple().to_string();
    format!("{prefix}-{}", &short[..8])
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

//! Furniture Selector — greedy, budget-bounded selection over the catalog.
//!
//! Pure and synchronous: one immutable catalog snapshot in, one selection
//! out. Never errors — insufficient budget or missing categories degrade to
//! zero-count categories in the breakdown.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::item::{CatalogItem, ProductType};
use crate::models::project::StyleLevel;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Sizing and budget parameters for one selection call.
///
/// Precondition: `workstations >= 1` (enforced by the form layer). A zero
/// value is guarded here and yields an empty selection instead of a
/// division by zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionParams {
    pub budget: f64,
    pub workstations: u32,
    pub style_level: StyleLevel,
    #[serde(default = "default_meeting_tables_preference")]
    pub meeting_tables_preference: bool,
}

fn default_meeting_tables_preference() -> bool {
    true
}

/// Per-category unit counts of a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub desks: u32,
    pub chairs: u32,
    pub storage: u32,
    pub meeting_tables: u32,
    pub other: u32,
}

/// Result of one selection: one entry per unit purchased (duplicates
/// allowed), the exact summed cost, and per-category counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureSelection {
    pub items: Vec<CatalogItem>,
    pub total_cost: f64,
    pub breakdown: Breakdown,
}

// ────────────────────────────────────────────────────────────────────────────
// Selection algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Budget-per-workstation thresholds for the style-tier index.
const PREMIUM_BUDGET_THRESHOLD: f64 = 1500.0;
const STANDARD_BUDGET_THRESHOLD: f64 = 800.0;
/// Percentile into a price-sorted bucket per tier.
const PREMIUM_PERCENTILE: f64 = 0.7;
const STANDARD_PERCENTILE: f64 = 0.4;
/// At most this many complementary products fill the remaining budget.
const MAX_OTHER_ITEMS: u32 = 5;
/// One storage unit serves this many workstations.
const WORKSTATIONS_PER_STORAGE: u32 = 2;
/// One meeting table serves this many workstations (minimum one table).
const WORKSTATIONS_PER_MEETING_TABLE: u32 = 20;

/// Selects furniture from the catalog for the given parameters.
///
/// Algorithm:
/// 1. Keep items with `price > 0`, partition into five price-sorted buckets.
/// 2. Pick one tier index per desk/chair/storage bucket from the style level
///    and budget-per-workstation; the index is reused for every unit.
/// 3. Greedily add desks (one per workstation), chairs (one per
///    workstation), storage (one per two workstations), meeting tables
///    (cheapest only, one per twenty workstations when preferred), then up
///    to five complementary products — each unit gated on
///    `total + price <= budget` before committing.
pub fn select_furniture(catalog: &[CatalogItem], params: &SelectionParams) -> FurnitureSelection {
    if params.workstations == 0 {
        warn!("select_furniture called with workstations=0 — returning empty selection");
        return FurnitureSelection::default();
    }

    let budget = params.budget;
    let available: Vec<&CatalogItem> = catalog.iter().filter(|p| p.price > 0.0).collect();

    let desks = bucket(&available, ProductType::Desk);
    let chairs = bucket(&available, ProductType::Chair);
    let storage = bucket(&available, ProductType::Storage);
    let meeting_tables = bucket(&available, ProductType::MeetingTable);
    let other = other_bucket(&available);

    let budget_per_workstation = budget / params.workstations as f64;
    let desk_index = tier_index(desks.len(), params.style_level, budget_per_workstation);
    let chair_index = tier_index(chairs.len(), params.style_level, budget_per_workstation);
    let storage_index = tier_index(storage.len(), params.style_level, budget_per_workstation);

    let mut items: Vec<CatalogItem> = Vec::new();
    let mut total_cost = 0.0_f64;
    let mut breakdown = Breakdown::default();

    // 1. Desks — one per workstation.
    if let Some(desk) = desks.get(desk_index) {
        for _ in 0..params.workstations {
            if total_cost + desk.price <= budget {
                items.push((*desk).clone());
                total_cost += desk.price;
                breakdown.desks += 1;
            }
        }
    }

    // 2. Chairs — one per workstation.
    if let Some(chair) = chairs.get(chair_index) {
        for _ in 0..params.workstations {
            if total_cost + chair.price <= budget {
                items.push((*chair).clone());
                total_cost += chair.price;
                breakdown.chairs += 1;
            }
        }
    }

    // 3. Storage — one unit per two workstations, rounded up.
    let storage_needed = params.workstations.div_ceil(WORKSTATIONS_PER_STORAGE);
    if let Some(unit) = storage.get(storage_index) {
        for _ in 0..storage_needed {
            if total_cost + unit.price <= budget {
                items.push((*unit).clone());
                total_cost += unit.price;
                breakdown.storage += 1;
            }
        }
    }

    // 4. Meeting tables — optional, always the cheapest model.
    if params.meeting_tables_preference {
        if let Some(table) = meeting_tables.first() {
            let tables_needed = 1.max(params.workstations / WORKSTATIONS_PER_MEETING_TABLE);
            for _ in 0..tables_needed {
                if total_cost + table.price <= budget {
                    items.push((*table).clone());
                    total_cost += table.price;
                    breakdown.meeting_tables += 1;
                }
            }
        }
    }

    // 5. Complementary products with the remaining budget, cheapest first.
    if budget - total_cost > 0.0 && !other.is_empty() {
        for product in &other {
            if total_cost + product.price <= budget {
                items.push((*product).clone());
                total_cost += product.price;
                breakdown.other += 1;
                if breakdown.other >= MAX_OTHER_ITEMS {
                    break;
                }
            }
        }
    }

    FurnitureSelection {
        items,
        total_cost,
        breakdown,
    }
}

/// All priced items of one type, sorted ascending by price.
fn bucket<'a>(available: &[&'a CatalogItem], product_type: ProductType) -> Vec<&'a CatalogItem> {
    let mut group: Vec<&CatalogItem> = available
        .iter()
        .copied()
        .filter(|p| p.product_type == product_type)
        .collect();
    group.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(std::cmp::Ordering::Equal));
    group
}

/// Everything outside the four core types, sorted ascending by price.
fn other_bucket<'a>(available: &[&'a CatalogItem]) -> Vec<&'a CatalogItem> {
    let mut group: Vec<&CatalogItem> = available
        .iter()
        .copied()
        .filter(|p| {
            !matches!(
                p.product_type,
                ProductType::Desk
                    | ProductType::Chair
                    | ProductType::Storage
                    | ProductType::MeetingTable
            )
        })
        .collect();
    group.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(std::cmp::Ordering::Equal));
    group
}

/// Percentile index into a price-sorted bucket for the style tier.
/// Computed once per bucket and reused for every unit purchased from it.
fn tier_index(len: usize, style_level: StyleLevel, budget_per_workstation: f64) -> usize {
    if len == 0 {
        return 0;
    }
    if style_level == StyleLevel::Premium && budget_per_workstation > PREMIUM_BUDGET_THRESHOLD {
        (len - 1).min((len as f64 * PREMIUM_PERCENTILE).floor() as usize)
    } else if style_level == StyleLevel::Standard
        || budget_per_workstation > STANDARD_BUDGET_THRESHOLD
    {
        (len as f64 * STANDARD_PERCENTILE).floor() as usize
    } else {
        0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Selection summary
// ────────────────────────────────────────────────────────────────────────────

/// Human-readable summary of a selection for inclusion in the prompt, e.g.
/// `"3 bureau(x), 3 chaise(s)"`. Fixed category order, zero counts omitted.
pub fn selection_summary(selection: &FurnitureSelection) -> String {
    let b = &selection.breakdown;
    let mut parts: Vec<String> = Vec::new();

    if b.desks > 0 {
        parts.push(format!("{} bureau(x)", b.desks));
    }
    if b.chairs > 0 {
        parts.push(format!("{} chaise(s)", b.chairs));
    }
    if b.storage > 0 {
        parts.push(format!("{} rangement(s)", b.storage));
    }
    if b.meeting_tables > 0 {
        parts.push(format!("{} table(s) de réunion", b.meeting_tables));
    }
    if b.other > 0 {
        parts.push(format!("{} accessoire(s)", b.other));
    }

    parts.join(", ")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

//! Prompt Builder — deterministic constraint-bearing instructions for the
//! image-editing model.
//!
//! Every function here is a pure string transform: identical inputs always
//! produce byte-identical prompts. Prompt stability matters because it is
//! the only reproducibility lever we hold over the downstream generative
//! call.

use serde::{Deserialize, Serialize};

use crate::catalog::item::ProductType;
use crate::models::project::StyleLevel;

/// Workstation count used when no project parameters are available.
const FALLBACK_WORKSTATIONS: u32 = 10;

/// Inputs for one prompt. `strict` wins over `style_level`: it selects the
/// retry template used after a generation violated masking or architecture
/// constraints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptOptions {
    pub n_workstations: u32,
    pub meeting_tables: u32,
    pub style_level: StyleLevel,
    #[serde(default)]
    pub strict: bool,
}

/// A line item of a saved configuration, as produced by the legacy
/// configuration flow.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigurationItem {
    #[serde(rename = "type")]
    pub item_type: ProductType,
    pub standing: Option<StyleLevel>,
}

/// Builds the edit prompt for the given options.
pub fn build_prompt(options: &PromptOptions) -> String {
    if options.strict {
        return strict_retry_prompt(options.n_workstations, options.meeting_tables);
    }

    match options.style_level {
        StyleLevel::Basic => basic_prompt(options.n_workstations, options.meeting_tables),
        StyleLevel::Premium => premium_prompt(options.n_workstations, options.meeting_tables),
        StyleLevel::Standard => standard_prompt(options.n_workstations, options.meeting_tables),
    }
}

/// Adapts a legacy configuration line-item list: workstations are the desk
/// count, meeting tables their own count, and the standing of the first item
/// sets the style (standard when absent).
pub fn build_edit_prompt(items: &[ConfigurationItem]) -> String {
    let n_workstations = items
        .iter()
        .filter(|i| i.item_type == ProductType::Desk)
        .count() as u32;
    let meeting_tables = items
        .iter()
        .filter(|i| i.item_type == ProductType::MeetingTable)
        .count() as u32;
    let style_level = items
        .first()
        .and_then(|i| i.standing)
        .unwrap_or_default();

    build_prompt(&PromptOptions {
        n_workstations,
        meeting_tables,
        style_level,
        strict: false,
    })
}

/// Fixed-default prompt for when no parameters are available at all.
pub fn build_fallback_prompt() -> String {
    build_prompt(&PromptOptions {
        n_workstations: FALLBACK_WORKSTATIONS,
        meeting_tables: 0,
        style_level: StyleLevel::Standard,
        strict: false,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Style templates
// ────────────────────────────────────────────────────────────────────────────

fn basic_prompt(n_workstations: u32, meeting_tables: u32) -> String {
    let mut blocks = vec![
        "You are editing a REAL photo of an EMPTY office space. The goal is a DECISIONAL visualization, not a stylized render.".to_string(),
        "STRICT CONSTRAINTS:\n\
         - Do NOT change architecture or fixed elements (walls, windows, doors, ceiling, lighting, columns, floor material).\n\
         - Only add furniture ON TOP OF the floor inside the editable masked area.\n\
         - Keep original perspective and lighting.\n\
         - No decorations, no plants, no posters, no wall elements, no people, no text, no logos.".to_string(),
        format!(
            "TASK:\n\
             Furnish this office as an open-space workplace for EXACTLY {n_workstations} workstations.\n\
             Each workstation: 1 simple rectangular desk + 1 standard task chair."
        ),
        "Layout:\n\
         - Practical rows with clear walkways, realistic circulation.\n\
         - Keep a main corridor visible.\n\
         - Do not block doors/windows.".to_string(),
    ];
    if meeting_tables > 0 {
        blocks.push(format!(
            "Optional:\n\
             Add EXACTLY {meeting_tables} simple meeting tables with 4 chairs each ONLY if space allows, otherwise add none."
        ));
    }
    blocks.push("Keep everything minimal, functional, professional.".to_string());
    blocks.join("\n\n")
}

fn standard_prompt(n_workstations: u32, meeting_tables: u32) -> String {
    let mut blocks = vec![
        "You are editing a REAL photo of an EMPTY office space. This is a DECISIONAL visualization.".to_string(),
        "STRICT CONSTRAINTS:\n\
         - Do NOT change architecture or fixed elements (walls, windows, doors, ceiling, lighting, columns, floor material).\n\
         - Only add furniture on the floor inside the editable masked area.\n\
         - Preserve original perspective and lighting.\n\
         - No decorations, no plants, no posters, no people, no text, no logos.".to_string(),
        format!(
            "TASK:\n\
             Create a realistic mid-range corporate open-space for EXACTLY {n_workstations} workstations.\n\
             Each workstation: 1 modern rectangular desk + 1 ergonomic office chair."
        ),
        "Layout:\n\
         - Organized rows or clusters with clear circulation and walkways.\n\
         - Maintain a visible main corridor.\n\
         - Do not block doors/windows.".to_string(),
    ];
    if meeting_tables > 0 {
        blocks.push(format!(
            "Optional meeting:\n\
             Add EXACTLY {meeting_tables} meeting tables with 4 chairs each ONLY if space allows without overcrowding."
        ));
    }
    blocks.push("Result must look plausible and realistic in the same room.".to_string());
    blocks.join("\n\n")
}

fn premium_prompt(n_workstations: u32, meeting_tables: u32) -> String {
    let mut blocks = vec![
        "You are editing a REAL photo of an EMPTY office space. This is a DECISIONAL visualization (not artistic).".to_string(),
        "STRICT CONSTRAINTS:\n\
         - Do NOT change architecture or fixed elements (walls, windows, doors, ceiling, lighting, columns, floor material).\n\
         - Only add furniture on the floor inside the editable masked area.\n\
         - Preserve original perspective and lighting.\n\
         - No decorations, no plants, no posters, no people, no text, no logos.".to_string(),
        format!(
            "TASK:\n\
             Create a high-end executive open-space for EXACTLY {n_workstations} workstations.\n\
             Each workstation: 1 premium modern desk + 1 premium ergonomic chair."
        ),
        "Layout:\n\
         - Clean, premium, professional layout with realistic spacing and circulation.\n\
         - Keep a visible main corridor.\n\
         - Do not block doors/windows.".to_string(),
    ];
    if meeting_tables > 0 {
        blocks.push(format!(
            "Optional meeting:\n\
             Add EXACTLY {meeting_tables} premium meeting tables with 4 chairs each ONLY if space allows."
        ));
    }
    blocks.push("Keep the scene minimal, premium, and realistic.".to_string());
    blocks.join("\n\n")
}

/// Retry template used after a generation touched pixels outside the
/// editable region. Restates exact counts, drops all style adjectives.
fn strict_retry_prompt(n_workstations: u32, meeting_tables: u32) -> String {
    let mut blocks = vec![
        "RETRY — STRICT MODE.".to_string(),
        "You must keep the original photo unchanged except for adding furniture inside the editable masked area on the floor.".to_string(),
        "ABSOLUTE RULES:\n\
         - Do NOT alter any pixels outside the editable masked area.\n\
         - Do NOT change walls, windows, doors, ceiling, lighting, columns, floor material, or any fixed feature.\n\
         - Only place furniture on the floor within the masked area.\n\
         - Preserve the exact original perspective and lighting.\n\
         - No decorations, no people, no text, no logos.".to_string(),
        format!(
            "TASK:\n\
             Add EXACTLY {n_workstations} workstations (each: 1 rectangular desk + 1 ergonomic chair) arranged with realistic rows and clear walkways."
        ),
    ];
    if meeting_tables > 0 {
        blocks.push(format!(
            "Add EXACTLY {meeting_tables} meeting tables with 4 chairs each ONLY if space allows."
        ));
    }
    blocks.push("Minimal, realistic, professional.".to_string());
    blocks.join("\n\n")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

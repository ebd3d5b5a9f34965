//! Scene prompt family — the descriptive photorealistic variant used by the
//! alternate generation path. Where `builder` speaks in constraints, this
//! family speaks in scene descriptors: style adjectives, density, materials.
//! Same purity rule: deterministic string transforms only.

use serde::{Deserialize, Serialize};

use crate::models::project::StyleLevel;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Inputs for one scene prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneOptions {
    pub area_m2: f64,
    pub workstations: u32,
    pub style_level: StyleLevel,
    pub meeting_tables_preference: bool,
}

/// Fixed generation settings shipped with the complete bundle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Inpainting strength, 0-1.
    pub strength: f64,
    /// CFG scale.
    pub guidance: f64,
    pub steps: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            strength: 0.85,
            guidance: 7.5,
            steps: 50,
        }
    }
}

/// The full bundle for one generation call: positive prompt, negative
/// prompt, mask-placement instructions, and settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletePrompt {
    pub prompt: String,
    pub negative_prompt: String,
    pub mask_instructions: String,
    pub settings: RenderSettings,
}

struct StyleDescriptors {
    adjective: &'static str,
    style: &'static str,
    materials: &'static str,
    colors: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Descriptors
// ────────────────────────────────────────────────────────────────────────────

/// Workstation density thresholds (workstations per m²).
const DENSE_THRESHOLD: f64 = 0.15;
const WELL_SPACED_THRESHOLD: f64 = 0.1;

const NEGATIVE_TERMS: [&str; 17] = [
    "blurry",
    "distorted",
    "low quality",
    "cluttered",
    "messy",
    "dark",
    "dirty",
    "old furniture",
    "unprofessional",
    "residential",
    "home office",
    "bad lighting",
    "artifacts",
    "watermark",
    "text",
    "people",
    "occupied desks",
];

fn style_descriptors(style_level: StyleLevel) -> StyleDescriptors {
    match style_level {
        StyleLevel::Basic => StyleDescriptors {
            adjective: "functional",
            style: "contemporary",
            materials: "laminate desks, mesh chairs, basic storage",
            colors: "neutral tones, white and grey",
        },
        StyleLevel::Standard => StyleDescriptors {
            adjective: "modern",
            style: "professional",
            materials: "quality wood veneer desks, ergonomic chairs, modular storage",
            colors: "coordinated color scheme, corporate palette",
        },
        StyleLevel::Premium => StyleDescriptors {
            adjective: "luxury",
            style: "executive",
            materials: "solid wood desks, leather chairs, designer storage",
            colors: "sophisticated color palette, premium finishes",
        },
    }
}

fn density_descriptor(workstations: u32, area_m2: f64) -> &'static str {
    let density = workstations as f64 / area_m2;
    if density > DENSE_THRESHOLD {
        "dense"
    } else if density > WELL_SPACED_THRESHOLD {
        "well-spaced"
    } else {
        "spacious"
    }
}

fn furniture_description(style_level: StyleLevel, workstations: u32) -> String {
    let descriptors = style_descriptors(style_level);
    let mut parts = vec![descriptors.materials, descriptors.colors];

    if workstations > 50 {
        parts.push("modular workstation systems");
        parts.push("collaborative zones");
    } else if workstations > 20 {
        parts.push("grouped workstations");
        parts.push("shared storage solutions");
    } else {
        parts.push("individual workstations");
        parts.push("personal storage");
    }

    parts.join(", ")
}

// ────────────────────────────────────────────────────────────────────────────
// Builders
// ────────────────────────────────────────────────────────────────────────────

/// Main scene prompt: comma-joined descriptor list, empty fragments dropped.
pub fn build_main_prompt(options: &SceneOptions) -> String {
    let descriptors = style_descriptors(options.style_level);
    let density = density_descriptor(options.workstations, options.area_m2);

    let parts = [
        format!(
            "Professional office space with {} workstations",
            options.workstations
        ),
        format!("{} {} style", descriptors.adjective, descriptors.style),
        format!("{density} open-plan layout"),
        furniture_description(options.style_level, options.workstations),
        if options.meeting_tables_preference {
            "with dedicated meeting zones".to_string()
        } else {
            String::new()
        },
        "bright, professional atmosphere".to_string(),
        "photorealistic, architectural photography".to_string(),
        "natural lighting, modern interior design".to_string(),
        "high-end office furniture".to_string(),
        "8K, professional photography, sharp focus".to_string(),
        "clean, organized, corporate environment".to_string(),
    ];

    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// What the scene must not contain.
pub fn build_negative_prompt() -> String {
    NEGATIVE_TERMS.join(", ")
}

/// Placement instructions for the masked region.
pub fn build_mask_instructions(options: &SceneOptions) -> String {
    let furniture_grade = match options.style_level {
        StyleLevel::Premium => "Use high-end, executive furniture",
        StyleLevel::Standard => "Use quality modern office furniture",
        StyleLevel::Basic => "Use functional, economical office furniture",
    };

    [
        format!(
            "Place exactly {} workstations in the masked area",
            options.workstations
        ),
        "Arrange desks in organized rows or clusters".to_string(),
        "Maintain proper spacing between workstations (minimum 1.2m)".to_string(),
        "Ensure all desks face the same direction or follow the room's geometry".to_string(),
        furniture_grade.to_string(),
        "Add appropriate office lighting fixtures".to_string(),
        "Include cable management solutions".to_string(),
        "Ensure the furniture style matches the existing architecture".to_string(),
    ]
    .join(". ")
}

/// Complete bundle for the generation call.
pub fn build_complete_prompt(options: &SceneOptions) -> CompletePrompt {
    CompletePrompt {
        prompt: build_main_prompt(options),
        negative_prompt: build_negative_prompt(),
        mask_instructions: build_mask_instructions(options),
        settings: RenderSettings::default(),
    }
}

/// Short sentence-form variant for models that prefer concise prompts.
pub fn build_concise_prompt(options: &SceneOptions) -> String {
    let descriptors = style_descriptors(options.style_level);

    let parts = [
        format!(
            "A {} office space with {} workstations.",
            descriptors.adjective, options.workstations
        ),
        format!("{}.", descriptors.materials),
        if options.meeting_tables_preference {
            "Includes meeting areas with tables and chairs.".to_string()
        } else {
            String::new()
        },
        "Professional photography, bright natural lighting, clean and organized.".to_string(),
        "Modern corporate interior design.".to_string(),
    ];

    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

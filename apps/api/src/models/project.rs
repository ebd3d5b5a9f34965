use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Style tier for a project. Drives both the selection price percentile and
/// the adjective family used in prompts.
///
/// Unknown wire values deserialize to `Standard`, which must stay the last
/// variant for `#[serde(other)]` to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleLevel {
    Basic,
    Premium,
    #[default]
    #[serde(other)]
    Standard,
}

impl std::fmt::Display for StyleLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleLevel::Basic => write!(f, "basic"),
            StyleLevel::Standard => write!(f, "standard"),
            StyleLevel::Premium => write!(f, "premium"),
        }
    }
}

/// Workflow step of the configurator session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    #[default]
    Info,
    Proposal,
    Result,
}

/// Parameters captured by the project form. Validated at the HTTP boundary
/// (workstations within [1, 400], budget positive) — downstream code does
/// not re-validate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectParams {
    pub name: String,
    pub area_m2: f64,
    pub workstations: u32,
    pub budget: f64,
    pub style_level: StyleLevel,
    pub meeting_tables_preference: bool,
}

/// A configurator project: form parameters plus the uploaded photo and
/// optional editable-region mask, both referenced by URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    #[serde(flatten)]
    pub params: ProjectParams,
    pub photo_url: Option<String>,
    pub mask_data_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(params: ProjectParams) -> Self {
        Self {
            id: Uuid::new_v4(),
            params,
            photo_url: None,
            mask_data_url: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_level_deserializes_lowercase() {
        let level: StyleLevel = serde_json::from_str(r#""premium""#).unwrap();
        assert_eq!(level, StyleLevel::Premium);
    }

    #[test]
    fn test_unknown_style_level_falls_back_to_standard() {
        let level: StyleLevel = serde_json::from_str(r#""deluxe""#).unwrap();
        assert_eq!(level, StyleLevel::Standard);
    }

    #[test]
    fn test_known_style_levels_round_trip() {
        for level in [StyleLevel::Basic, StyleLevel::Premium, StyleLevel::Standard] {
            let json = serde_json::to_string(&level).unwrap();
            assert_eq!(json, format!("\"{level}\""));
            let parsed: StyleLevel = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, level);
        }
    }

    #[test]
    fn test_style_level_display_matches_wire_format() {
        assert_eq!(StyleLevel::Basic.to_string(), "basic");
        assert_eq!(StyleLevel::Standard.to_string(), "standard");
        assert_eq!(StyleLevel::Premium.to_string(), "premium");
    }

    #[test]
    fn test_project_params_round_trip() {
        let json = serde_json::json!({
            "name": "Siège social",
            "areaM2": 150.0,
            "workstations": 20,
            "budget": 45000.0,
            "styleLevel": "standard",
            "meetingTablesPreference": true
        });
        let params: ProjectParams = serde_json::from_value(json).unwrap();
        assert_eq!(params.workstations, 20);
        assert!(params.meeting_tables_preference);
        assert_eq!(params.style_level, StyleLevel::Standard);
    }

    #[test]
    fn test_project_flattens_params_in_json() {
        let project = Project::new(ProjectParams {
            name: "Test".to_string(),
            area_m2: 100.0,
            workstations: 10,
            budget: 20000.0,
            style_level: StyleLevel::Basic,
            meeting_tables_preference: false,
        });
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["workstations"], 10);
        assert_eq!(value["styleLevel"], "basic");
        assert!(value["photoUrl"].is_null());
    }
}

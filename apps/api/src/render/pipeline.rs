//! Render pipeline — one sequential pass from parameters to a furnished
//! visualization plus its decision package.
//!
//! Flow: catalog snapshot → furniture selection → selection summary →
//! edit prompt (strict on retry) → image generation → BOM/scenario.
//! Stages report through a linear progress callback; exactly one generative
//! call is in flight per render.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::item::CatalogItem;
use crate::errors::AppError;
use crate::models::project::ProjectParams;
use crate::prompt::builder::{build_prompt, PromptOptions};
use crate::render::{ImageRenderer, RenderImageRequest};
use crate::selection::bom::{build_scenario, Scenario};
use crate::selection::selector::{select_furniture, selection_summary, SelectionParams};

/// Progress checkpoints, mirroring the original sequential flow.
const PROGRESS_SELECTED: u8 = 10;
const PROGRESS_PROMPT_READY: u8 = 30;
const PROGRESS_RENDERING: u8 = 40;
const PROGRESS_RENDERED: u8 = 80;
const PROGRESS_DONE: u8 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOutput {
    pub image_url: String,
    pub scenario: Scenario,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
    pub render_id: Uuid,
    pub outputs: Vec<RenderOutput>,
}

/// Inputs for one pipeline run. `strict` selects the retry prompt after a
/// previous attempt violated masking constraints.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub params: ProjectParams,
    pub base_image_url: String,
    pub strict: bool,
}

/// Runs the full render pipeline.
pub async fn render_project(
    catalog: &[CatalogItem],
    request: &RenderRequest,
    renderer: &dyn ImageRenderer,
    progress: &(dyn Fn(u8) + Send + Sync),
) -> Result<RenderResponse, AppError> {
    let params = &request.params;

    // Stage 1: catalog-constrained selection.
    let selection = select_furniture(
        catalog,
        &SelectionParams {
            budget: params.budget,
            workstations: params.workstations,
            style_level: params.style_level,
            meeting_tables_preference: params.meeting_tables_preference,
        },
    );
    if selection.items.is_empty() {
        warn!(
            "Selection is empty (budget {}, {} catalog items) — rendering without product grounding",
            params.budget,
            catalog.len()
        );
    }
    info!(
        "Selected {} unit(s) for {}€ — {:?}",
        selection.items.len(),
        selection.total_cost,
        selection.breakdown
    );
    progress(PROGRESS_SELECTED);

    // Stage 2: prompt. Counts come from the selection breakdown so the
    // instruction never references furniture the catalog could not supply.
    let summary = selection_summary(&selection);
    let mut prompt = build_prompt(&PromptOptions {
        n_workstations: params.workstations,
        meeting_tables: selection.breakdown.meeting_tables,
        style_level: params.style_level,
        strict: request.strict,
    });
    if !summary.is_empty() {
        prompt.push_str(&format!("\n\nMobilier sélectionné: {summary}"));
    }
    progress(PROGRESS_PROMPT_READY);

    // Stage 3: one generative call, reference images riding along.
    let reference_image_urls: Vec<String> = selection
        .items
        .iter()
        .filter_map(|item| item.image_url.clone())
        .collect();
    progress(PROGRESS_RENDERING);

    let image_url = renderer
        .render(&RenderImageRequest {
            base_image_url: request.base_image_url.clone(),
            prompt,
            reference_image_urls,
        })
        .await?;
    progress(PROGRESS_RENDERED);

    // Stage 4: decision package.
    let scenario = build_scenario(&selection, params);
    progress(PROGRESS_DONE);

    Ok(RenderResponse {
        render_id: Uuid::new_v4(),
        outputs: vec![RenderOutput {
            image_url,
            scenario,
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::item::ProductType;
    use crate::models::project::StyleLevel;
    use crate::render::MockImageRenderer;
    use std::sync::Mutex;

    fn item(name: &str, product_type: ProductType, price: f64) -> CatalogItem {
        CatalogItem {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            product_type,
            price,
            image_url: Some(format!("https://example.com/{name}.jpg")),
            dimensions: None,
            brand: None,
            material: None,
            color: None,
        }
    }

    fn catalog() -> Vec<CatalogItem> {
        vec![
            item("bureau", ProductType::Desk, 200.0),
            item("chaise", ProductType::Chair, 150.0),
            item("armoire", ProductType::Storage, 300.0),
            item("table", ProductType::MeetingTable, 500.0),
        ]
    }

    fn request(strict: bool) -> RenderRequest {
        RenderRequest {
            params: ProjectParams {
                name: "Projet test".to_string(),
                area_m2: 120.0,
                workstations: 4,
                budget: 10_000.0,
                style_level: StyleLevel::Standard,
                meeting_tables_preference: true,
            },
            base_image_url: "https://example.com/empty-office.jpg".to_string(),
            strict,
        }
    }

    /// Captures a prompt by wrapping the mock renderer.
    struct CapturingRenderer(Mutex<Option<RenderImageRequest>>);

    #[async_trait::async_trait]
    impl ImageRenderer for CapturingRenderer {
        async fn render(&self, request: &RenderImageRequest) -> Result<String, AppError> {
            *self.0.lock().unwrap() = Some(request.clone());
            Ok(request.base_image_url.clone())
        }
    }

    #[tokio::test]
    async fn test_pipeline_produces_image_and_scenario() {
        let response = render_project(&catalog(), &request(false), &MockImageRenderer, &|_| {})
            .await
            .unwrap();
        assert_eq!(response.outputs.len(), 1);
        let output = &response.outputs[0];
        assert_eq!(output.image_url, "https://example.com/empty-office.jpg");
        assert_eq!(output.scenario.title, "Configuration standard - 4 postes");
        // 4 desks, 4 chairs, 2 storage, 1 meeting table → 4 BOM lines.
        assert_eq!(output.scenario.bom.len(), 4);
    }

    #[tokio::test]
    async fn test_progress_is_monotonic_and_terminates_at_100() {
        let seen = Mutex::new(Vec::<u8>::new());
        render_project(&catalog(), &request(false), &MockImageRenderer, &|pct| {
            seen.lock().unwrap().push(pct);
        })
        .await
        .unwrap();
        let seen = seen.into_inner().unwrap();
        assert_eq!(seen, vec![10, 30, 40, 80, 100]);
    }

    #[tokio::test]
    async fn test_prompt_carries_selection_summary_and_references() {
        let capturing = CapturingRenderer(Mutex::new(None));
        render_project(&catalog(), &request(false), &capturing, &|_| {})
            .await
            .unwrap();
        let captured = capturing.0.into_inner().unwrap().unwrap();
        assert!(captured.prompt.contains("EXACTLY 4 workstations"));
        assert!(captured.prompt.contains("Mobilier sélectionné: 4 bureau(x)"));
        // one reference URL per selected unit that carries an image
        assert_eq!(captured.reference_image_urls.len(), 11);
    }

    #[tokio::test]
    async fn test_strict_retry_uses_strict_template() {
        let capturing = CapturingRenderer(Mutex::new(None));
        render_project(&catalog(), &request(true), &capturing, &|_| {})
            .await
            .unwrap();
        let captured = capturing.0.into_inner().unwrap().unwrap();
        assert!(captured.prompt.starts_with("RETRY — STRICT MODE."));
    }

    #[tokio::test]
    async fn test_empty_catalog_still_renders() {
        let response = render_project(&[], &request(false), &MockImageRenderer, &|_| {})
            .await
            .unwrap();
        let output = &response.outputs[0];
        assert!(output.scenario.bom.is_empty());
        assert_eq!(output.scenario.totals.buy_range.max, 0.0);
        assert_eq!(output.image_url, "https://example.com/empty-office.jpg");
    }
}

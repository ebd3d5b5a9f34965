//! Render orchestration — the seam between the pure selection/prompt core
//! and the external image-generation collaborator.
//!
//! `AppState` holds an `Arc<dyn ImageRenderer>`, swapped at startup. The
//! shipped implementation is `MockImageRenderer`; a real HTTP client against
//! the generative API plugs in behind the same trait without touching the
//! pipeline.

pub mod handlers;
pub mod pipeline;

use async_trait::async_trait;

use crate::errors::AppError;

/// One image-generation request: the base photo, the verbatim prompt, and
/// reference images of the selected products for visual grounding.
#[derive(Debug, Clone)]
pub struct RenderImageRequest {
    pub base_image_url: String,
    pub prompt: String,
    pub reference_image_urls: Vec<String>,
}

/// The image-generation seam. Implementations return the URL of the
/// furnished visualization.
#[async_trait]
pub trait ImageRenderer: Send + Sync {
    async fn render(&self, request: &RenderImageRequest) -> Result<String, AppError>;
}

/// Mock renderer: echoes the base image. Keeps the whole pipeline exercisable
/// without a generative backend.
pub struct MockImageRenderer;

#[async_trait]
impl ImageRenderer for MockImageRenderer {
    async fn render(&self, request: &RenderImageRequest) -> Result<String, AppError> {
        tracing::info!(
            "Mock render: {} reference image(s), prompt {} chars",
            request.reference_image_urls.len(),
            request.prompt.len()
        );
        Ok(request.base_image_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_renderer_echoes_base_image() {
        let renderer = MockImageRenderer;
        let url = renderer
            .render(&RenderImageRequest {
                base_image_url: "https://example.com/office.jpg".to_string(),
                prompt: "prompt".to_string(),
                reference_image_urls: vec![],
            })
            .await
            .unwrap();
        assert_eq!(url, "https://example.com/office.jpg");
    }
}

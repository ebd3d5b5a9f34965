//! Project session store — the application state of one configurator
//! session behind a lock, with an explicit serialization boundary.
//!
//! The in-memory state carries transient fields (raw photo bytes, the last
//! render result, the in-flight flag) that must never reach durable storage.
//! `persisted_view()` is the single projection point: everything that gets
//! written to disk goes through it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::models::project::{Project, ProjectParams, Step};
use crate::render::pipeline::RenderResponse;

#[derive(Debug, Default)]
struct SessionState {
    current_project: Option<Project>,
    current_step: Step,
    render_result: Option<RenderResponse>,
    is_generating: bool,
    /// Raw uploaded photo payload (data URL). Transient: never serialized.
    photo_data_url: Option<String>,
}

/// Durable projection of the session. Excludes photo bytes, the render
/// result, and the in-flight flag by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub current_project: Option<Project>,
    pub current_step: Step,
}

/// Thread-safe session store, cheap to clone through `AppState`.
#[derive(Clone, Default)]
pub struct ProjectStore {
    inner: Arc<RwLock<SessionState>>,
    state_path: Option<PathBuf>,
}

impl ProjectStore {
    pub fn new(state_path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionState::default())),
            state_path,
        }
    }

    /// Restores a previously persisted session if the state file exists.
    pub fn load(state_path: Option<PathBuf>) -> Result<Self> {
        let mut initial = SessionState::default();
        if let Some(path) = &state_path {
            if path.exists() {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read session state {}", path.display()))?;
                let persisted: PersistedSession = serde_json::from_str(&raw)
                    .with_context(|| format!("Invalid session state {}", path.display()))?;
                initial.current_project = persisted.current_project;
                initial.current_step = persisted.current_step;
            }
        }
        Ok(Self {
            inner: Arc::new(RwLock::new(initial)),
            state_path,
        })
    }

    /// Creates a fresh project: step resets to info, previous render result
    /// is discarded.
    pub async fn create_project(&self, params: ProjectParams) -> Project {
        let project = Project::new(params);
        let mut state = self.inner.write().await;
        state.current_project = Some(project.clone());
        state.current_step = Step::Info;
        state.render_result = None;
        project
    }

    pub async fn current_project(&self) -> Option<Project> {
        self.inner.read().await.current_project.clone()
    }

    pub async fn current_step(&self) -> Step {
        self.inner.read().await.current_step
    }

    pub async fn set_step(&self, step: Step) {
        self.inner.write().await.current_step = step;
    }

    /// Attaches the uploaded photo: the payload stays transient, the display
    /// URL rides on the project.
    pub async fn set_photo(&self, url: String, photo_data_url: Option<String>) {
        let mut state = self.inner.write().await;
        state.photo_data_url = photo_data_url;
        if let Some(project) = state.current_project.as_mut() {
            project.photo_url = Some(url);
        }
    }

    /// The transient photo payload, preferred over the display URL as the
    /// render base image.
    pub async fn photo_data_url(&self) -> Option<String> {
        self.inner.read().await.photo_data_url.clone()
    }

    pub async fn set_mask(&self, mask_data_url: String) {
        let mut state = self.inner.write().await;
        if let Some(project) = state.current_project.as_mut() {
            project.mask_data_url = Some(mask_data_url);
        }
    }

    pub async fn set_render_result(&self, result: RenderResponse) {
        let mut state = self.inner.write().await;
        state.render_result = Some(result);
        state.is_generating = false;
    }

    pub async fn render_result(&self) -> Option<RenderResponse> {
        self.inner.read().await.render_result.clone()
    }

    pub async fn set_generating(&self, is_generating: bool) {
        self.inner.write().await.is_generating = is_generating;
    }

    /// Claims the render slot, check and set under one write lock. Returns
    /// false when a render is already in flight.
    pub async fn try_begin_generating(&self) -> bool {
        let mut state = self.inner.write().await;
        if state.is_generating {
            return false;
        }
        state.is_generating = true;
        true
    }

    pub async fn is_generating(&self) -> bool {
        self.inner.read().await.is_generating
    }

    /// Tears the whole session down.
    pub async fn reset(&self) {
        let mut state = self.inner.write().await;
        *state = SessionState::default();
    }

    /// The serialization boundary: projects the durable subset of the state.
    pub async fn persisted_view(&self) -> PersistedSession {
        let state = self.inner.read().await;
        PersistedSession {
            current_project: state.current_project.clone(),
            current_step: state.current_step,
        }
    }

    /// Writes the persisted projection to the state path, if configured.
    pub async fn save(&self) -> Result<()> {
        let Some(path) = &self.state_path else {
            return Ok(());
        };
        let view = self.persisted_view().await;
        let raw = serde_json::to_string_pretty(&view).context("Failed to serialize session")?;
        std::fs::write(path, raw)
            .with_context(|| format!("Failed to write session state {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::StyleLevel;
    use uuid::Uuid;

    fn params() -> ProjectParams {
        ProjectParams {
            name: "Open space R+2".to_string(),
            area_m2: 180.0,
            workstations: 24,
            budget: 60_000.0,
            style_level: StyleLevel::Premium,
            meeting_tables_preference: true,
        }
    }

    #[tokio::test]
    async fn test_create_project_resets_step_and_result() {
        let store = ProjectStore::new(None);
        store.set_step(Step::Result).await;
        store
            .set_render_result(RenderResponse {
                render_id: Uuid::new_v4(),
                outputs: vec![],
            })
            .await;

        let project = store.create_project(params()).await;
        assert_eq!(store.current_step().await, Step::Info);
        assert!(store.render_result().await.is_none());
        assert_eq!(store.current_project().await.unwrap().id, project.id);
    }

    #[tokio::test]
    async fn test_set_photo_keeps_payload_out_of_the_project() {
        let store = ProjectStore::new(None);
        store.create_project(params()).await;
        store
            .set_photo(
                "blob:photo-1".to_string(),
                Some("data:image/jpeg;base64,/9j/4A==".to_string()),
            )
            .await;
        let project = store.current_project().await.unwrap();
        assert_eq!(project.photo_url.as_deref(), Some("blob:photo-1"));
        assert_eq!(
            store.photo_data_url().await.as_deref(),
            Some("data:image/jpeg;base64,/9j/4A==")
        );
    }

    #[tokio::test]
    async fn test_set_render_result_clears_generating_flag() {
        let store = ProjectStore::new(None);
        store.set_generating(true).await;
        store
            .set_render_result(RenderResponse {
                render_id: Uuid::new_v4(),
                outputs: vec![],
            })
            .await;
        assert!(!store.is_generating().await);
        assert!(store.render_result().await.is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_render_slot_claimed_at_most_once() {
        let store = ProjectStore::new(None);
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(
                async move { store.try_begin_generating().await },
            ));
        }
        let mut claims = 0;
        for handle in handles {
            if handle.await.unwrap() {
                claims += 1;
            }
        }
        assert_eq!(claims, 1);
        assert!(store.is_generating().await);

        // Releasing the slot makes it claimable again.
        store.set_generating(false).await;
        assert!(store.try_begin_generating().await);
        assert!(!store.try_begin_generating().await);
    }

    #[tokio::test]
    async fn test_reset_tears_everything_down() {
        let store = ProjectStore::new(None);
        store.create_project(params()).await;
        store.set_step(Step::Proposal).await;
        store.set_generating(true).await;
        store.reset().await;
        assert!(store.current_project().await.is_none());
        assert_eq!(store.current_step().await, Step::Info);
        assert!(!store.is_generating().await);
    }

    #[tokio::test]
    async fn test_persisted_view_strips_transient_fields() {
        let store = ProjectStore::new(None);
        store.create_project(params()).await;
        store
            .set_photo("blob:photo".to_string(), Some("data:image/png;base64,AAAA".to_string()))
            .await;
        store.set_generating(true).await;
        store
            .set_render_result(RenderResponse {
                render_id: Uuid::new_v4(),
                outputs: vec![],
            })
            .await;
        store.set_step(Step::Result).await;

        let view = store.persisted_view().await;
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["currentStep"], "result");
        assert_eq!(json["currentProject"]["photoUrl"], "blob:photo");
        // The projection type has no slots for transient state at all.
        assert!(json.get("renderResult").is_none());
        assert!(json.get("isGenerating").is_none());
        assert!(json.get("photoDataUrl").is_none());
    }

    #[tokio::test]
    async fn test_persisted_view_round_trips_through_json() {
        let store = ProjectStore::new(None);
        let project = store.create_project(params()).await;
        store.set_step(Step::Proposal).await;

        let raw = serde_json::to_string(&store.persisted_view().await).unwrap();
        let recovered: PersistedSession = serde_json::from_str(&raw).unwrap();
        assert_eq!(recovered.current_step, Step::Proposal);
        assert_eq!(recovered.current_project.unwrap().id, project.id);
    }
}

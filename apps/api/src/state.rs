use std::sync::Arc;

use crate::catalog::store::CatalogStore;
use crate::config::Config;
use crate::project::store::ProjectStore;
use crate::render::ImageRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogStore,
    pub projects: ProjectStore,
    /// Pluggable image generator. Default: MockImageRenderer — a real HTTP
    /// backend plugs in behind the same trait.
    pub renderer: Arc<dyn ImageRenderer>,
    pub config: Config,
}

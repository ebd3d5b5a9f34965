mod catalog;
mod config;
mod errors;
mod models;
mod project;
mod prompt;
mod render;
mod routes;
mod selection;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::store::CatalogStore;
use crate::config::Config;
use crate::project::store::ProjectStore;
use crate::render::MockImageRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting OfficePlan API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the catalog registry, seeded from file when configured
    let catalog = match &config.catalog_seed_path {
        Some(path) => CatalogStore::from_seed_file(path)?,
        None => CatalogStore::new(),
    };
    info!("Catalog initialized: {} item(s)", catalog.len().await);

    // Restore the project session when a state file exists
    let projects = ProjectStore::load(config.state_path.clone().map(PathBuf::from))?;
    if let Some(project) = projects.current_project().await {
        info!("Restored project session: {}", project.id);
    }

    // Image generation backend. Mock by default; a real client implements
    // the same ImageRenderer trait.
    let renderer = Arc::new(MockImageRenderer);
    info!("Image renderer initialized (mock)");

    // Build app state
    let state = AppState {
        catalog,
        projects,
        renderer,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

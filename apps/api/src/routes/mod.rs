pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog API
        .route(
            "/api/v1/catalog",
            get(crate::catalog::handlers::handle_list_catalog)
                .post(crate::catalog::handlers::handle_create_item),
        )
        .route(
            "/api/v1/catalog/backup",
            get(crate::catalog::handlers::handle_catalog_backup),
        )
        .route(
            "/api/v1/catalog/context",
            get(crate::catalog::handlers::handle_catalog_context),
        )
        .route(
            "/api/v1/catalog/:id",
            patch(crate::catalog::handlers::handle_update_item),
        )
        .route(
            "/api/v1/catalog/:id",
            delete(crate::catalog::handlers::handle_delete_item),
        )
        // Selection API
        .route(
            "/api/v1/selection",
            post(crate::selection::handlers::handle_select),
        )
        // Prompt API
        .route(
            "/api/v1/prompts",
            post(crate::prompt::handlers::handle_build_prompt),
        )
        .route(
            "/api/v1/prompts/configuration",
            post(crate::prompt::handlers::handle_configuration_prompt),
        )
        .route(
            "/api/v1/prompts/scene",
            post(crate::prompt::handlers::handle_scene_prompt),
        )
        // Project API
        .route(
            "/api/v1/projects",
            post(crate::project::handlers::handle_create_project),
        )
        .route(
            "/api/v1/projects/current",
            get(crate::project::handlers::handle_get_current_project),
        )
        .route(
            "/api/v1/projects/current/session",
            get(crate::project::handlers::handle_get_session),
        )
        .route(
            "/api/v1/projects/current/step",
            patch(crate::project::handlers::handle_set_step),
        )
        .route(
            "/api/v1/projects/current/photo",
            patch(crate::project::handlers::handle_set_photo),
        )
        .route(
            "/api/v1/projects/current/mask",
            patch(crate::project::handlers::handle_set_mask),
        )
        .route(
            "/api/v1/projects/current/reset",
            post(crate::project::handlers::handle_reset),
        )
        // Render API
        .route(
            "/api/v1/projects/:id/render",
            post(crate::render::handlers::handle_start_render)
                .get(crate::render::handlers::handle_get_render),
        )
        .with_state(state)
}

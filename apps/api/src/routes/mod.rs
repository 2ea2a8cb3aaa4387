pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resumes/validate", post(handlers::handle_validate))
        .route(
            "/api/v1/resumes",
            get(handlers::handle_list_resumes).post(handlers::handle_generate),
        )
        .route(
            "/api/v1/resumes/:id",
            get(handlers::handle_get_resume).delete(handlers::handle_delete_resume),
        )
        // Render API
        .route(
            "/api/v1/resumes/:id/print",
            get(handlers::handle_print_resume),
        )
        .route(
            "/api/v1/resumes/:id/share",
            get(handlers::handle_share_resume),
        )
        .with_state(state)
}

//! Axum route handlers for the Resume API.

use axum::{
    extract::{FromRequest, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::form::validate;
use crate::generation::GeneratedResume;
use crate::models::form::FormInput;
use crate::models::resume::{PersonalInfo, SavedResumeRecord};
use crate::render::{to_display_sections, to_printable_document, to_shareable_text, DisplaySection};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Extractors
// ────────────────────────────────────────────────────────────────────────────

/// `Json` whose rejections come back in the `AppError` body shape.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ResumeDetailResponse {
    pub record: SavedResumeRecord,
    pub header: PersonalInfo,
    pub sections: Vec<DisplaySection>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/validate
///
/// Field-level check without calling the provider. 204 when the form is
/// ready to submit.
pub async fn handle_validate(AppJson(form): AppJson<FormInput>) -> Result<StatusCode, AppError> {
    validate(&form)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/resumes
///
/// Full pipeline: validate → generate → save. Returns the saved record and
/// its display sections. 409 while another generation is outstanding.
pub async fn handle_generate(
    State(state): State<AppState>,
    AppJson(form): AppJson<FormInput>,
) -> Result<(StatusCode, Json<GeneratedResume>), AppError> {
    let generated = state.resumes.submit(form).await?;
    Ok((StatusCode::CREATED, Json(generated)))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<SavedResumeRecord>>, AppError> {
    Ok(Json(state.store().list().await?))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResumeDetailResponse>, AppError> {
    let record = find_record(&state, &id).await?;
    Ok(Json(ResumeDetailResponse {
        header: record.data.personal_info().clone(),
        sections: to_display_sections(&record.data),
        record,
    }))
}

/// DELETE /api/v1/resumes/:id
///
/// Returns the remaining collection. Unknown ids are a no-op.
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<SavedResumeRecord>>, AppError> {
    Ok(Json(state.store().remove(&id).await?))
}

/// GET /api/v1/resumes/:id/print
///
/// Static HTML for the print/PDF service.
pub async fn handle_print_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let record = find_record(&state, &id).await?;
    Ok(Html(to_printable_document(&record.data)?))
}

/// GET /api/v1/resumes/:id/share
pub async fn handle_share_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let record = find_record(&state, &id).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        to_shareable_text(&record.data),
    ))
}

async fn find_record(state: &AppState, id: &str) -> Result<SavedResumeRecord, AppError> {
    state
        .store()
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

use crate::generation::ResumeService;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Submission pipeline. Owns the single-flight gate for generations.
    pub resumes: ResumeService,
}

impl AppState {
    pub fn store(&self) -> &ResumeStore {
        self.resumes.store()
    }
}

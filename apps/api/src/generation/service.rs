//! Resume submission pipeline.
//!
//! Flow: validate → single-flight gate → generate → append to store →
//! project display sections.
//!
//! All or nothing: a resume is only returned once it is both parsed and
//! persisted. A failed generation never touches the store.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::form::{validate, ValidationErrors};
use crate::generation::generator::{GenerationError, ResumeGenerator};
use crate::models::form::FormInput;
use crate::models::resume::SavedResumeRecord;
use crate::render::{to_display_sections, DisplaySection};
use crate::store::{ResumeStore, StorageError};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form is incomplete: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("a resume generation is already in progress")]
    GenerationInProgress,

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A freshly generated and saved resume, ready for the preview view.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedResume {
    pub record: SavedResumeRecord,
    pub sections: Vec<DisplaySection>,
}

#[derive(Clone)]
pub struct ResumeService {
    generator: Arc<dyn ResumeGenerator>,
    store: ResumeStore,
    in_flight: Arc<Mutex<()>>,
}

impl ResumeService {
    pub fn new(generator: Arc<dyn ResumeGenerator>, store: ResumeStore) -> Self {
        Self {
            generator,
            store,
            in_flight: Arc::new(Mutex::new(())),
        }
    }

    pub fn store(&self) -> &ResumeStore {
        &self.store
    }

    /// Runs the whole pipeline for one form submission.
    ///
    /// At most one generation runs at a time; a second submission while one
    /// is outstanding is refused rather than queued. There is no
    /// cancellation once the provider call is issued.
    pub async fn submit(&self, form: FormInput) -> Result<GeneratedResume, SubmitError> {
        validate(&form)?;

        let _in_flight = self
            .in_flight
            .try_lock()
            .map_err(|_| SubmitError::GenerationInProgress)?;

        info!("Generating resume");
        let document = self
            .generator
            .generate(&form.api_key, &form)
            .await
            .inspect_err(|e| warn!("Resume generation failed: {e}"))?;

        let record = self.store.append(document).await?;
        let sections = to_display_sections(&record.data);

        info!(
            "Generated resume {} with {} sections",
            record.id,
            sections.len()
        );
        debug!(
            "Section shapes for {}: {:?}",
            record.id,
            sections
                .iter()
                .map(|s| (s.title.as_str(), s.kind()))
                .collect::<Vec<_>>()
        );
        Ok(GeneratedResume { record, sections })
    }
}

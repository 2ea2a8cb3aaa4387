#![allow(dead_code)]

//! Form state transitions.
//!
//! Each transition consumes the current `FormInput` and returns the next one.
//! Index-based transitions ignore out-of-range indices and hand back the
//! state unchanged.

use serde::{Deserialize, Serialize};

use crate::models::form::{
    split_skills, ApiKey, EducationEntry, FormField, FormInput, WorkExperienceEntry,
};

/// The single-value fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarField {
    FullName,
    Email,
    Phone,
    Summary,
    ApiKey,
}

impl From<ScalarField> for FormField {
    fn from(field: ScalarField) -> Self {
        match field {
            ScalarField::FullName => FormField::FullName,
            ScalarField::Email => FormField::Email,
            ScalarField::Phone => FormField::Phone,
            ScalarField::Summary => FormField::Summary,
            ScalarField::ApiKey => FormField::ApiKey,
        }
    }
}

impl FormInput {
    pub fn update_field(mut self, field: ScalarField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            ScalarField::FullName => self.full_name = value,
            ScalarField::Email => self.email = value,
            ScalarField::Phone => self.phone = value,
            ScalarField::Summary => self.summary = value,
            ScalarField::ApiKey => self.api_key = ApiKey::new(value),
        }
        self
    }

    pub fn add_work_experience_entry(mut self, entry: WorkExperienceEntry) -> Self {
        self.work_experience.push(entry);
        self
    }

    pub fn update_work_experience_entry(mut self, index: usize, entry: WorkExperienceEntry) -> Self {
        if let Some(slot) = self.work_experience.get_mut(index) {
            *slot = entry;
        }
        self
    }

    pub fn remove_work_experience_entry(mut self, index: usize) -> Self {
        if index < self.work_experience.len() {
            self.work_experience.remove(index);
        }
        self
    }

    pub fn add_education_entry(mut self, entry: EducationEntry) -> Self {
        self.education.push(entry);
        self
    }

    pub fn update_education_entry(mut self, index: usize, entry: EducationEntry) -> Self {
        if let Some(slot) = self.education.get_mut(index) {
            *slot = entry;
        }
        self
    }

    pub fn remove_education_entry(mut self, index: usize) -> Self {
        if index < self.education.len() {
            self.education.remove(index);
        }
        self
    }

    /// Replaces the skill list as given. Duplicates are kept.
    pub fn set_skills(mut self, skills: Vec<String>) -> Self {
        self.skills = skills;
        self
    }

    /// Replaces the skill list from comma-separated text, e.g. `"Go, Rust, SQL"`.
    pub fn set_skills_from_text(self, text: &str) -> Self {
        self.set_skills(split_skills(text))
    }
}

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::models::form::{FormField, FormInput};

/// Basic `local@domain.tld` shape. Not an RFC 5322 check.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Field-level validation failures, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FormField, String>);

impl ValidationErrors {
    fn add(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[cfg(test)]
    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(FormField::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Checks a form before submission.
///
/// Every rule runs; all failing fields are reported together. No cross-field
/// rules and no checks inside individual work/education entries.
pub fn validate(form: &FormInput) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let required = [
        (FormField::FullName, form.full_name.as_str(), "Full name is required"),
        (FormField::Email, form.email.as_str(), "Email is required"),
        (FormField::Phone, form.phone.as_str(), "Phone number is required"),
        (FormField::Summary, form.summary.as_str(), "Professional summary is required"),
        (FormField::ApiKey, form.api_key.expose(), "API key is required"),
    ];
    for (field, value, message) in required {
        if value.trim().is_empty() {
            errors.add(field, message);
        }
    }

    if errors.get(FormField::Email).is_none() && !EMAIL_PATTERN.is_match(form.email.trim()) {
        errors.add(FormField::Email, "Enter a valid email address");
    }

    if form.work_experience.is_empty() {
        errors.add(
            FormField::WorkExperience,
            "Add at least one work experience entry",
        );
    }
    if form.education.is_empty() {
        errors.add(FormField::Education, "Add at least one education entry");
    }
    if form.skills.is_empty() {
        errors.add(FormField::Skills, "Add at least one skill");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

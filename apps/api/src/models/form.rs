use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A form field that validation can report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    FullName,
    Email,
    Phone,
    Summary,
    WorkExperience,
    Education,
    Skills,
    ApiKey,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::FullName => "fullName",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Summary => "summary",
            FormField::WorkExperience => "workExperience",
            FormField::Education => "education",
            FormField::Skills => "skills",
            FormField::ApiKey => "apiKey",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider API key typed into the form.
///
/// Accepted on input, never serialized: it must not reach the store or the
/// prompt. `Debug` is redacted so it cannot leak through logs.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(#[serde(deserialize_with = "null_as_empty")] String);

impl ApiKey {
    #[allow(dead_code)]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("ApiKey(<empty>)")
        } else {
            f.write_str("ApiKey(<redacted>)")
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkExperienceEntry {
    #[serde(deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub position: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub end_date: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(deserialize_with = "null_as_empty")]
    pub school: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub degree: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub year: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
}

/// Everything the user typed into the resume form.
///
/// Every field defaults to empty so a half-filled form still deserializes and
/// gets a field-level validation report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormInput {
    #[serde(deserialize_with = "null_as_empty")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub work_experience: Vec<WorkExperienceEntry>,
    #[serde(deserialize_with = "null_as_empty")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "skills_from_list_or_text")]
    pub skills: Vec<String>,
    #[serde(skip_serializing)]
    pub api_key: ApiKey,
}

/// Splits comma-separated skills, trimming each and dropping blanks.
pub fn split_skills(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Web forms send `null` for fields the user never touched.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SkillsInput {
    List(Vec<String>),
    Text(String),
}

/// Skills arrive either as a list or as the raw comma-separated text box.
fn skills_from_list_or_text<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<SkillsInput>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(SkillsInput::List(skills)) => skills,
        Some(SkillsInput::Text(text)) => split_skills(&text),
    })
}

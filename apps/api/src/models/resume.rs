//! Generated resume documents and their persisted records.
//!
//! The provider answers with loosely-typed JSON. `ResumeDocument` keeps that
//! object verbatim and classifies every section into a closed
//! `SectionContent` variant once, when the document is built. Rendering never
//! inspects raw JSON shapes.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

const PERSONAL_INFO_KEYS: &[&str] = &["personalInfo", "personalInformation"];

/// Known sections in display order, each with the keys providers use for it.
const KNOWN_SECTIONS: &[(&str, &[&str])] = &[
    ("Professional Summary", &["summary", "professionalSummary"]),
    ("Work Experience", &["workExperience", "experience"]),
    ("Education", &["education"]),
    ("Skills", &["skills"]),
    ("Achievements", &["achievements"]),
];

// Entry fields, in the order they are read when describing a list item.
const HEADING_KEYS: &[&str] = &["position", "title", "role", "degree", "name"];
const PLACE_KEYS: &[&str] = &["company", "school", "institution", "organization"];
const START_KEYS: &[&str] = &["startDate", "start"];
const END_KEYS: &[&str] = &["endDate", "end"];
const WHEN_KEYS: &[&str] = &["year", "date", "dates", "duration"];
const DETAIL_KEYS: &[&str] = &["description", "details", "summary"];

#[derive(Debug, Error, PartialEq)]
pub enum DocumentError {
    #[error("expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),
}

/// Content of one resume section after shape classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content")]
pub enum SectionContent {
    Text(String),
    List(Vec<String>),
    KeyValue(Vec<(String, String)>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    Text,
    List,
    KeyValue,
}

impl SectionContent {
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionContent::Text(_) => SectionKind::Text,
            SectionContent::List(_) => SectionKind::List,
            SectionContent::KeyValue(_) => SectionKind::KeyValue,
        }
    }

    /// Classifies a raw provider value. `null` means the section is absent.
    pub fn classify(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(SectionContent::Text(text.clone())),
            Value::Bool(_) | Value::Number(_) => Some(SectionContent::Text(value.to_string())),
            Value::Array(items) => Some(SectionContent::List(
                items.iter().filter_map(describe_value).collect(),
            )),
            Value::Object(map) => Some(SectionContent::KeyValue(
                map.iter()
                    .filter_map(|(key, value)| {
                        describe_value(value).map(|text| (humanize_key(key), text))
                    })
                    .collect(),
            )),
        }
    }
}

/// One classified section of a resume.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeSection {
    /// The top-level key the section was read from.
    pub key: String,
    pub title: String,
    pub content: SectionContent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl PersonalInfo {
    fn from_value(value: Option<&Value>) -> Self {
        let Some(Value::Object(map)) = value else {
            return Self::default();
        };
        let text = |keys: &[&str]| {
            first_present(map, keys)
                .and_then(|(_, v)| describe_value(v))
                .filter(|s| !s.trim().is_empty())
        };
        Self {
            full_name: text(&["fullName", "name"]),
            email: text(&["email"]),
            phone: text(&["phone"]),
        }
    }
}

/// A generated resume. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct ResumeDocument {
    raw: Map<String, Value>,
    personal_info: PersonalInfo,
    sections: Vec<ResumeSection>,
}

impl ResumeDocument {
    pub fn personal_info(&self) -> &PersonalInfo {
        &self.personal_info
    }

    /// Sections in display order: the known ones first, then any extra
    /// top-level keys the provider added.
    pub fn sections(&self) -> &[ResumeSection] {
        &self.sections
    }

    pub fn as_json(&self) -> &Map<String, Value> {
        &self.raw
    }

    pub fn display_name(&self) -> &str {
        self.personal_info
            .full_name
            .as_deref()
            .unwrap_or("Untitled resume")
    }
}

impl TryFrom<Value> for ResumeDocument {
    type Error = DocumentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let raw = match value {
            Value::Object(map) => map,
            other => return Err(DocumentError::NotAnObject(json_type_name(&other))),
        };

        let mut consumed: HashSet<&str> = PERSONAL_INFO_KEYS.iter().copied().collect();
        let personal_info =
            PersonalInfo::from_value(first_present(&raw, PERSONAL_INFO_KEYS).map(|(_, v)| v));

        let mut sections = Vec::new();
        for (title, keys) in KNOWN_SECTIONS {
            let Some((key, value)) = first_present(&raw, keys) else {
                continue;
            };
            consumed.insert(key);
            if let Some(content) = SectionContent::classify(value) {
                sections.push(ResumeSection {
                    key: key.to_string(),
                    title: title.to_string(),
                    content,
                });
            }
        }

        for (key, value) in &raw {
            if consumed.contains(key.as_str()) {
                continue;
            }
            if let Some(content) = SectionContent::classify(value) {
                sections.push(ResumeSection {
                    key: key.clone(),
                    title: humanize_key(key),
                    content,
                });
            }
        }

        Ok(Self {
            raw,
            personal_info,
            sections,
        })
    }
}

impl From<ResumeDocument> for Value {
    fn from(doc: ResumeDocument) -> Self {
        Value::Object(doc.raw)
    }
}

/// A resume plus its storage metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResumeRecord {
    pub id: String,
    pub data: ResumeDocument,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shape helpers
// ────────────────────────────────────────────────────────────────────────────

fn first_present<'a, 'k>(map: &'a Map<String, Value>, keys: &[&'k str]) -> Option<(&'k str, &'a Value)> {
    keys.iter()
        .find_map(|key| map.get(*key).filter(|v| !v.is_null()).map(|v| (*key, v)))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Flattens any JSON value into one human-readable line.
fn describe_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(_) | Value::Number(_) => Some(value.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(describe_value).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Object(map) => describe_entry(map),
    }
}

/// Describes an experience/education-like object as
/// `heading, place (period): detail; extra; extra`.
fn describe_entry(map: &Map<String, Value>) -> Option<String> {
    let mut used: HashSet<&str> = HashSet::new();
    let mut take = |keys: &[&'static str]| -> Option<String> {
        let (key, value) = first_present(map, keys)?;
        used.insert(key);
        describe_value(value).filter(|s| !s.trim().is_empty())
    };

    let heading = take(HEADING_KEYS);
    let place = take(PLACE_KEYS);
    let period = match (take(START_KEYS), take(END_KEYS)) {
        (Some(start), Some(end)) => Some(format!("{start} - {end}")),
        (Some(start), None) => Some(format!("{start} - Present")),
        (None, Some(end)) => Some(end),
        (None, None) => take(WHEN_KEYS),
    };
    let detail = take(DETAIL_KEYS);

    let mut line = [heading, place]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");
    if let Some(period) = period {
        if line.is_empty() {
            line = period;
        } else {
            line.push_str(&format!(" ({period})"));
        }
    }
    if let Some(detail) = detail {
        if line.is_empty() {
            line = detail;
        } else {
            line.push_str(": ");
            line.push_str(&detail);
        }
    }

    let extras: Vec<String> = map
        .iter()
        .filter(|(key, _)| !used.contains(key.as_str()))
        .filter_map(|(_, value)| describe_value(value))
        .filter(|s| !s.trim().is_empty())
        .collect();
    if !extras.is_empty() {
        if !line.is_empty() {
            line.push_str("; ");
        }
        line.push_str(&extras.join("; "));
    }

    (!line.is_empty()).then_some(line)
}

/// `volunteerWork` / `volunteer_work` → `Volunteer Work`.
pub fn humanize_key(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in key.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn doc(value: Value) -> ResumeDocument {
        ResumeDocument::try_from(value).unwrap()
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert_eq!(
            ResumeDocument::try_from(json!(["a"])).unwrap_err(),
            DocumentError::NotAnObject("an array")
        );
        assert!(ResumeDocument::try_from(json!("text")).is_err());
    }

    #[test]
    fn test_serialization_reproduces_provider_json() {
        let raw = json!({
            "personalInfo": {"fullName": "Jane Doe", "email": "jane@x.com", "phone": "555-1212"},
            "summary": "Engineer",
            "workExperience": [{"company": "Acme", "position": "Dev"}],
            "skills": ["Go"],
            "hobbies": {"weekend": "climbing"}
        });
        let document = doc(raw.clone());
        assert_eq!(serde_json::to_value(&document).unwrap(), raw);

        let back: ResumeDocument = serde_json::from_value(raw).unwrap();
        assert_eq!(back, document);
    }

    #[test]
    fn test_known_sections_come_first_in_fixed_order() {
        let document = doc(json!({
            "certifications": ["CKA"],
            "skills": ["Go", "Rust"],
            "summary": "Engineer",
            "education": [{"school": "MIT", "degree": "BSc", "year": "2015"}],
            "experience": [{"company": "Acme", "position": "Dev", "startDate": "2020", "endDate": "2023"}],
        }));
        let titles: Vec<&str> = document.sections().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Professional Summary", "Work Experience", "Education", "Skills", "Certifications"]
        );
        assert_eq!(document.sections()[1].key, "experience");
    }

    #[test]
    fn test_sections_are_classified_by_shape() {
        let document = doc(json!({
            "summary": "Builds things",
            "skills": ["Go", "Rust"],
            "achievements": {"awardsWon": 3, "speaker": true},
        }));
        let sections = document.sections();
        assert_eq!(sections[0].content, SectionContent::Text("Builds things".to_string()));
        assert_eq!(
            sections[1].content,
            SectionContent::List(vec!["Go".to_string(), "Rust".to_string()])
        );
        assert_eq!(
            sections[2].content,
            SectionContent::KeyValue(vec![
                ("Awards Won".to_string(), "3".to_string()),
                ("Speaker".to_string(), "true".to_string()),
            ])
        );
        assert_eq!(sections[2].content.kind(), SectionKind::KeyValue);
    }

    #[test]
    fn test_entry_objects_become_readable_lines() {
        let document = doc(json!({
            "workExperience": [
                {"company": "Acme", "position": "Engineer", "startDate": "2020", "endDate": "2023", "description": "Built APIs"},
                {"company": "Initech", "position": "Intern", "startDate": "2019"},
                {"company": "Globex", "highlights": ["Led migration", "Cut costs 20%"]}
            ],
            "education": [{"school": "MIT", "degree": "BSc CS", "year": "2015"}]
        }));
        let SectionContent::List(work) = &document.sections()[0].content else {
            panic!("work experience should be a list");
        };
        assert_eq!(work[0], "Engineer, Acme (2020 - 2023): Built APIs");
        assert_eq!(work[1], "Intern, Initech (2019 - Present)");
        assert_eq!(work[2], "Globex; Led migration, Cut costs 20%");

        let SectionContent::List(education) = &document.sections()[1].content else {
            panic!("education should be a list");
        };
        assert_eq!(education[0], "BSc CS, MIT (2015)");
    }

    #[test]
    fn test_null_sections_are_skipped() {
        let document = doc(json!({"summary": null, "skills": ["Go"]}));
        assert_eq!(document.sections().len(), 1);
        assert_eq!(document.sections()[0].title, "Skills");
    }

    #[test]
    fn test_personal_info_is_extracted_and_not_a_section() {
        let document = doc(json!({
            "personalInformation": {"name": "Jane Doe", "email": "jane@x.com"},
            "summary": "Engineer"
        }));
        assert_eq!(document.personal_info().full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(document.personal_info().phone, None);
        assert_eq!(document.display_name(), "Jane Doe");
        assert_eq!(document.sections().len(), 1);
    }

    #[test]
    fn test_missing_personal_info_has_fallback_name() {
        let document = doc(json!({"summary": "Engineer"}));
        assert_eq!(document.personal_info(), &PersonalInfo::default());
        assert_eq!(document.display_name(), "Untitled resume");
    }

    #[test]
    fn test_humanize_key() {
        assert_eq!(humanize_key("volunteerWork"), "Volunteer Work");
        assert_eq!(humanize_key("volunteer_work"), "Volunteer Work");
        assert_eq!(humanize_key("skills"), "Skills");
        assert_eq!(humanize_key("URL"), "URL");
    }

    #[test]
    fn test_saved_record_timestamp_uses_millis_and_z() {
        let record = SavedResumeRecord {
            id: "1700000000000".to_string(),
            data: doc(json!({"summary": "Engineer"})),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["createdAt"], "2024-03-01T12:30:00.000Z");
        assert_eq!(value["data"]["summary"], "Engineer");

        let back: SavedResumeRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_saved_record_accepts_offset_timestamps() {
        let record: SavedResumeRecord = serde_json::from_value(json!({
            "id": "1",
            "data": {"summary": "x"},
            "createdAt": "2024-03-01T14:30:00+02:00"
        }))
        .unwrap();
        assert_eq!(
            record.created_at,
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
        );
    }
}

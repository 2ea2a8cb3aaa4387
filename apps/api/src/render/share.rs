use serde_json::Value;

use crate::models::resume::ResumeDocument;

/// Pretty-printed JSON of the whole document, for ad hoc sharing.
pub fn to_shareable_text(doc: &ResumeDocument) -> String {
    format!("{:#}", Value::Object(doc.as_json().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shareable_text_parses_back_to_the_same_document() {
        let doc = ResumeDocument::try_from(json!({
            "personalInfo": {"fullName": "Jane Doe", "email": "jane@x.com", "phone": "555-1212"},
            "summary": "Engineer \"who ships\"\nfast",
            "workExperience": [{"company": "Acme", "position": "Engineer"}],
            "education": [],
            "skills": ["Go", "Rust"],
            "achievements": null,
            "yearsOfExperience": 7.5
        }))
        .unwrap();

        let text = to_shareable_text(&doc);
        let back: ResumeDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(back, doc);
        assert!(text.contains('\n'), "shared text should be indented");
    }
}

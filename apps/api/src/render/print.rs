//! Printable document — a self-contained HTML page handed to the print/PDF
//! service. All values are HTML-escaped by the template.

use askama::Template;
use thiserror::Error;

use crate::models::resume::{ResumeDocument, SectionContent};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to render printable document: {0}")]
    Template(#[from] askama::Error),
}

struct PrintRow {
    key: String,
    value: String,
}

/// A section flattened for the template: exactly one of the three bodies is
/// non-empty.
struct PrintSection {
    title: String,
    paragraph: String,
    items: Vec<String>,
    rows: Vec<PrintRow>,
}

#[derive(Template)]
#[template(path = "print.html")]
struct PrintTemplate<'a> {
    name: &'a str,
    contact: Vec<&'a str>,
    sections: Vec<PrintSection>,
}

impl PrintSection {
    fn new(title: &str, content: &SectionContent) -> Self {
        let mut section = PrintSection {
            title: title.to_string(),
            paragraph: String::new(),
            items: Vec::new(),
            rows: Vec::new(),
        };
        match content {
            SectionContent::Text(text) => section.paragraph = text.clone(),
            SectionContent::List(items) => section.items = items.clone(),
            SectionContent::KeyValue(pairs) => {
                section.rows = pairs
                    .iter()
                    .map(|(key, value)| PrintRow {
                        key: key.clone(),
                        value: value.clone(),
                    })
                    .collect()
            }
        }
        section
    }
}

/// Renders the whole resume as static HTML with fixed styling.
pub fn to_printable_document(doc: &ResumeDocument) -> Result<String, RenderError> {
    let info = doc.personal_info();
    let contact = [info.email.as_deref(), info.phone.as_deref()]
        .into_iter()
        .flatten()
        .collect();

    let sections = doc
        .sections()
        .iter()
        .map(|section| PrintSection::new(&section.title, &section.content))
        .collect();

    let template = PrintTemplate {
        name: doc.display_name(),
        contact,
        sections,
    };
    Ok(template.render()?)
}

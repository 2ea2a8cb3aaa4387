use serde::Serialize;

use crate::models::resume::{ResumeDocument, SectionContent, SectionKind};

/// One card in the resume preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplaySection {
    pub title: String,
    #[serde(flatten)]
    pub content: SectionContent,
}

impl DisplaySection {
    pub fn kind(&self) -> SectionKind {
        self.content.kind()
    }
}

/// Sections in display order. Shapes were settled when the document was
/// built, so this is a straight projection.
pub fn to_display_sections(doc: &ResumeDocument) -> Vec<DisplaySection> {
    doc.sections()
        .iter()
        .map(|section| DisplaySection {
            title: section.title.clone(),
            content: section.content.clone(),
        })
        .collect()
}

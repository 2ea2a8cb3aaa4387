// Rendering/Export Adapter: pure projections of a ResumeDocument for the
// preview view, print/PDF export and ad hoc sharing.

pub mod print;
pub mod sections;
pub mod share;

pub use print::{to_printable_document, RenderError};
pub use sections::{to_display_sections, DisplaySection};
pub use share::to_shareable_text;

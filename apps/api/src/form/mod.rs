// Form session: immutable form state transitions and submission-time validation.
// Nothing here performs I/O.

pub mod state;
pub mod validation;

pub use validation::{validate, ValidationErrors};

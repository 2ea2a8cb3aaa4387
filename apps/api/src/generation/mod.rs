// Resume generation: request building, the provider round-trip, and the
// submission pipeline that persists the result.
// All LLM calls go through llm_client; nothing here talks to Anthropic directly.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod request;
pub mod service;

pub use generator::{ClaudeResumeGenerator, GenerationError};
pub use service::{GeneratedResume, ResumeService, SubmitError};

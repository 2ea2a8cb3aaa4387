//! Generation Client — one provider round-trip per resume.
//!
//! Flow: build_prompt → LlmClient::call → first text block → strict JSON
//! parse → ResumeDocument. No retries and no store access.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::generation::request::build_prompt;
use crate::llm_client::{strip_json_fences, LlmClient, LlmError};
use crate::models::form::{ApiKey, FormInput};
use crate::models::resume::{DocumentError, ResumeDocument};

#[derive(Debug, Error)]
pub enum GenerationError {
    /// Network, auth, quota or any other provider-side failure.
    #[error("model provider request failed: {0}")]
    ProviderFailure(LlmError),

    /// The provider answered but the text is not a JSON resume object.
    #[error("model provider returned an unparseable resume: {0}")]
    MalformedResponse(String),

    /// The provider stopped at the token ceiling; the JSON is cut off.
    #[error("model provider response was truncated at the token limit")]
    TruncatedResponse,

    /// The form could not be encoded into the prompt. Nothing was sent.
    #[error("failed to encode the form into a prompt: {0}")]
    PromptEncoding(#[source] serde_json::Error),
}

impl From<LlmError> for GenerationError {
    fn from(e: LlmError) -> Self {
        match e {
            // 2xx with an unreadable body
            LlmError::Decode(e) => GenerationError::MalformedResponse(e.to_string()),
            other => GenerationError::ProviderFailure(other),
        }
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(e: serde_json::Error) -> Self {
        GenerationError::MalformedResponse(e.to_string())
    }
}

impl From<DocumentError> for GenerationError {
    fn from(e: DocumentError) -> Self {
        GenerationError::MalformedResponse(e.to_string())
    }
}

/// Turns a form into a resume document. Implement this to swap providers
/// without touching the submission pipeline.
#[async_trait]
pub trait ResumeGenerator: Send + Sync {
    async fn generate(
        &self,
        api_key: &ApiKey,
        form: &FormInput,
    ) -> Result<ResumeDocument, GenerationError>;
}

/// Generates resumes through the Anthropic Messages API.
///
/// A fresh `LlmClient` is scoped to each call's key. `timeout` comes from
/// configuration; `None` means the call is unbounded.
#[derive(Debug, Clone)]
pub struct ClaudeResumeGenerator {
    base_url: String,
    timeout: Option<Duration>,
}

impl ClaudeResumeGenerator {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl ResumeGenerator for ClaudeResumeGenerator {
    async fn generate(
        &self,
        api_key: &ApiKey,
        form: &FormInput,
    ) -> Result<ResumeDocument, GenerationError> {
        let request = build_prompt(form).map_err(GenerationError::PromptEncoding)?;

        let client = LlmClient::new(api_key.expose(), self.base_url.as_str(), self.timeout)?;

        info!("Requesting resume generation");
        let response = client.call(&request).await?;

        if response.is_truncated() {
            warn!("Resume generation hit the max_tokens ceiling");
            return Err(GenerationError::TruncatedResponse);
        }

        let text = response.text().ok_or_else(|| {
            GenerationError::MalformedResponse("response has no text content".to_string())
        })?;

        parse_resume(text)
    }
}

/// Parses provider text into a resume. Code fences are stripped; everything
/// else must be a valid JSON object.
pub fn parse_resume(text: &str) -> Result<ResumeDocument, GenerationError> {
    let value: Value = serde_json::from_str(strip_json_fences(text))?;
    Ok(ResumeDocument::try_from(value)?)
}

//! Resume Request Builder — turns a validated form into one Messages API request.

use crate::generation::prompts::{RESUME_MAX_TOKENS, RESUME_PROMPT_TEMPLATE};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{Message, MessagesRequest, MODEL};
use crate::models::form::FormInput;

/// Builds the single-message request for a form.
///
/// The whole form is embedded as JSON; the API key is excluded by
/// `FormInput`'s serialization. No chunking: the form must fit in one request.
pub fn build_prompt(form: &FormInput) -> Result<MessagesRequest, serde_json::Error> {
    let form_json = serde_json::to_string_pretty(form)?;

    let content = RESUME_PROMPT_TEMPLATE
        .replace("{json_only_instruction}", JSON_ONLY_INSTRUCTION)
        .replace("{form_json}", &form_json);

    Ok(MessagesRequest {
        model: MODEL.to_string(),
        max_tokens: RESUME_MAX_TOKENS,
        messages: vec![Message {
            role: "user".to_string(),
            content,
        }],
    })
}

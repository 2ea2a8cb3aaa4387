// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Response ceiling declared to the provider for one resume.
/// Output beyond this is cut off by the provider.
pub const RESUME_MAX_TOKENS: u32 = 4000;

/// Resume generation prompt template.
/// Replace: {form_json}, {json_only_instruction}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Generate a professional resume in JSON format based on the following information:
{form_json}

The resume should include sections for personal information, professional summary, work experience, education, skills, and achievements.

Return a JSON object with this schema:
{
  "personalInfo": {"fullName": "...", "email": "...", "phone": "..."},
  "summary": "A polished professional summary",
  "workExperience": [
    {"company": "...", "position": "...", "startDate": "...", "endDate": "...", "description": "..."}
  ],
  "education": [
    {"school": "...", "degree": "...", "year": "...", "description": "..."}
  ],
  "skills": ["..."],
  "achievements": ["..."]
}

{json_only_instruction}"#;

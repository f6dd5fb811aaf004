// Prompt templates for the readiness analysis.

/// System prompt template. Replace `{role}`, `{country}`, `{experience}` via
/// [`system_prompt`] rather than by hand.
pub const ANALYSIS_SYSTEM_TEMPLATE: &str = r#"You are an honest, senior career mentor specializing in the GCC (Gulf Cooperation Council) job market.
Analyze the candidate's profile for the role of "{role}" in "{country}" with {experience} years experience.

Be realistic. If the resume is weak, say so.
Return a strict JSON object with this structure:
{
  "score": number (0-100),
  "summary": "2 sentences on their standing.",
  "strengths": ["string", "string", "string"],
  "gaps": ["string", "string", "string"],
  "action_plan": ["string", "string", "string"]
}"#;

/// Prefix for the user-turn message carrying the resume.
pub const RESUME_MESSAGE_PREFIX: &str = "Here is the resume content:\n";

/// Fills the system template in a single pass, so placeholder-looking text
/// inside a value is never substituted again.
pub fn system_prompt(role: &str, country: &str, experience: &str) -> String {
    let mut out = String::with_capacity(ANALYSIS_SYSTEM_TEMPLATE.len() + role.len() + 64);
    let mut rest = ANALYSIS_SYSTEM_TEMPLATE;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let (value, consumed) = if tail.starts_with("{role}") {
            (role, "{role}".len())
        } else if tail.starts_with("{country}") {
            (country, "{country}".len())
        } else if tail.starts_with("{experience}") {
            (experience, "{experience}".len())
        } else {
            ("{", 1)
        };
        out.push_str(value);
        rest = &tail[consumed..];
    }
    out.push_str(rest);
    out
}

pub fn resume_message(resume: &str) -> String {
    format!("{RESUME_MESSAGE_PREFIX}{resume}")
}

// LLM prompt constants for résumé generation.
// The JSON-only system prompt and schema embedding live in llm_client::prompts.

/// Keywords every optimized résumé is steered toward.
pub const TARGET_KEYWORDS: [&str; 7] = [
    "data analysis",
    "financial modeling",
    "business insights",
    "strategic research",
    "problem-solving",
    "data-driven decision-making",
    "market analysis",
];

/// Optimization prompt. Replace `{keywords}` and `{raw_text}` before sending.
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer specialized in creating ATS-optimized resumes for students applying to competitive internships and entry-level roles in finance, analytics, and strategy.

Transform this raw resume content into a modern, clean, keyword-rich resume that passes ATS and appeals to recruiters:

Requirements:
- Use strong action verbs and quantified achievements
- Optimize for finance, consulting, analytics, and research roles
- Include keywords: {keywords}
- Make Skills keyword-dense (technical + analytical + soft skills)
- Enhance bullet points for clarity and impact
- Generate relevant projects if needed based on background
- Calculate ATS score (0-100) based on keyword density, formatting, and content quality

Raw Resume Content:
{raw_text}"#;

pub fn build_optimize_prompt(raw_text: &str) -> String {
    let keywords = TARGET_KEYWORDS
        .iter()
        .map(|k| format!("\"{k}\""))
        .collect::<Vec<_>>()
        .join(", ");
    OPTIMIZE_PROMPT_TEMPLATE
        .replace("{keywords}", &keywords)
        .replace("{raw_text}", raw_text)
}

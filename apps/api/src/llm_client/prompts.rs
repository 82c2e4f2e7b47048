// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appends the target JSON schema to a system prompt.
pub fn schema_system_prompt(
    system: &str,
    schema: &serde_json::Value,
) -> Result<String, serde_json::Error> {
    let schema_json = serde_json::to_string_pretty(schema)?;
    Ok(format!(
        "{system}\n\nThe JSON object MUST conform to this JSON Schema. \
        Include every required property; do not add properties the schema does not define.\n\
        {schema_json}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_system_prompt_embeds_schema() {
        let schema = serde_json::json!({"type": "object", "required": ["profile"]});
        let system = schema_system_prompt(JSON_ONLY_SYSTEM, &schema).unwrap();
        assert!(system.starts_with(JSON_ONLY_SYSTEM));
        assert!(system.contains("\"required\""));
        assert!(system.contains("\"profile\""));
    }
}

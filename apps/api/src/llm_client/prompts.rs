// Cross-cutting prompt fragments. Feature-specific prompts live in a
// prompts.rs next to the code that sends them.

/// System prompt for schema-constrained calls — enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

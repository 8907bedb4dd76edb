//! JSON extraction from free-form model output.
//!
//! Generation calls ask for JSON-only responses, but grounded calls cannot
//! carry a response schema and the model sometimes wraps its payload in
//! markdown fences or conversational text. This module recovers the JSON
//! substring with an explicit scanner.
//!
//! Precedence rules: code-fence markers are stripped first; then whichever
//! of the first `{` or first `[` appears earlier decides whether the payload
//! is treated as an object or an array; the slice runs to the last matching
//! closer found scanning from the end. This is a heuristic, not a parser:
//! stray braces in trailing commentary can defeat it, and that surfaces as
//! a parse error downstream.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("response text is empty")]
    Empty,
    #[error("no JSON object or array found in response")]
    NoJsonStructure,
}

/// Extracts the JSON object/array substring from raw model output.
///
/// Unlike the permissive pass-through this replaced, input with no
/// recoverable structure is an explicit error rather than text handed to
/// the JSON parser to fail on.
pub fn extract_json(raw: &str) -> Result<String, ExtractError> {
    if raw.trim().is_empty() {
        return Err(ExtractError::Empty);
    }

    let cleaned = raw.replace("```json", "").replace("```", "");

    let first_brace = cleaned.find('{');
    let first_bracket = cleaned.find('[');

    // Object wins when it opens before any array (or no array exists).
    if let Some(start) = first_brace {
        if first_bracket.map_or(true, |b| start < b) {
            if let Some(end) = cleaned.rfind('}') {
                if end >= start {
                    return Ok(cleaned[start..=end].to_string());
                }
            }
        }
    }

    if let Some(start) = first_bracket {
        if first_brace.map_or(true, |b| start < b) {
            if let Some(end) = cleaned.rfind(']') {
                if end >= start {
                    return Ok(cleaned[start..=end].to_string());
                }
            }
        }
    }

    Err(ExtractError::NoJsonStructure)
}

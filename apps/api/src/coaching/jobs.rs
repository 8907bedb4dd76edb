//! Search-grounded job scanning.

use serde_json::Value;

use crate::errors::{llm_failure, AppError};
use crate::llm_client::{GenerateRequest, LlmClient};
use crate::models::market::JobListing;

use super::prompts::{jobs_example_json, JOBS_PROMPT_TEMPLATE};

pub async fn find_matching_jobs(
    llm: &LlmClient,
    target_role: &str,
    skills: &[String],
) -> Result<Vec<JobListing>, AppError> {
    let prompt = JOBS_PROMPT_TEMPLATE
        .replace("{target_role}", target_role)
        .replace("{skills}", &skills.join(", "))
        .replace("{example_json}", &jobs_example_json().to_string());

    // Grounded call: structure comes from the prompt, so the payload is
    // validated here instead of by a response schema.
    let request = GenerateRequest::user_text(prompt).grounded().without_thinking();

    let parsed = llm
        .generate_json::<Value>(&request)
        .await
        .map_err(|e| llm_failure("Job scan failed", &e))?;

    if !parsed.is_array() {
        return Err(AppError::MalformedResponse(
            "Job search returned a non-array payload".to_string(),
        ));
    }

    serde_json::from_value(parsed).map_err(|_| {
        AppError::MalformedResponse("Failed to parse AI response. Please try again.".to_string())
    })
}

//! Résumé analysis against a target role.

use crate::errors::{llm_failure, AppError};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{Content, GenerateRequest, LlmClient, Part};
use crate::models::profile::{CareerAnalysis, ResumeFile};

use super::prompts::{analysis_schema, ANALYSIS_PROMPT_TEMPLATE};

/// Résumé text beyond this many characters is dropped before prompting.
pub const RESUME_TEXT_LIMIT: usize = 30_000;

/// Résumé input: raw text, an uploaded file, or both. The file wins when
/// both are present.
#[derive(Debug, Clone)]
pub struct ResumeInput {
    pub text: Option<String>,
    pub file: Option<ResumeFile>,
}

pub async fn analyze_profile(
    llm: &LlmClient,
    input: &ResumeInput,
    target_role: &str,
) -> Result<CareerAnalysis, AppError> {
    let prompt = ANALYSIS_PROMPT_TEMPLATE.replace("{target_role}", target_role);

    let contents = if let Some(file) = &input.file {
        vec![Content::user(vec![
            Part::InlineData {
                mime_type: file.mime_type.clone(),
                data: file.data.clone(),
            },
            Part::Text(prompt),
        ])]
    } else if let Some(text) = &input.text {
        let truncated: String = text.chars().take(RESUME_TEXT_LIMIT).collect();
        vec![Content::user_text(format!(
            "Resume Content:\n\"{truncated}\"\n\n{prompt}"
        ))]
    } else {
        return Err(AppError::Validation(
            "No resume input provided".to_string(),
        ));
    };

    let request = GenerateRequest::new(contents)
        .with_system(JSON_ONLY_SYSTEM)
        .with_schema(analysis_schema());

    llm.generate_json::<CareerAnalysis>(&request)
        .await
        .map_err(|e| llm_failure("Analysis failed", &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::GenerativeBackend;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct CaptureAndReply(&'static str);

    #[async_trait]
    impl GenerativeBackend for CaptureAndReply {
        async fn generate(
            &self,
            _request: &GenerateRequest,
        ) -> Result<String, crate::llm_client::LlmError> {
            Ok(self.0.to_string())
        }
    }

    fn client(reply: &'static str) -> LlmClient {
        LlmClient::new(Arc::new(CaptureAndReply(reply)))
    }

    #[tokio::test]
    async fn test_missing_input_rejected_before_any_call() {
        let input = ResumeInput {
            text: None,
            file: None,
        };
        let result = analyze_profile(&client("{}"), &input, "Data Analyst").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_text_resume_parses_into_analysis() {
        let reply = r#"{
            "readinessScore": 72,
            "summary": "Strong fundamentals.",
            "skills": [
                {"name": "SQL", "category": "technical", "status": "acquired"},
                {"name": "dbt", "category": "technical", "status": "missing"}
            ],
            "strengths": ["SQL"],
            "weaknesses": ["dbt"]
        }"#;
        let input = ResumeInput {
            text: Some("Ten years of SQL.".to_string()),
            file: None,
        };
        let analysis = analyze_profile(&client(reply), &input, "Data Analyst")
            .await
            .unwrap();
        assert_eq!(analysis.readiness_score, 72.0);
        assert_eq!(analysis.missing_skill_names(), vec!["dbt"]);
    }

    #[test]
    fn test_truncation_is_character_based() {
        let text = "é".repeat(RESUME_TEXT_LIMIT + 10);
        let truncated: String = text.chars().take(RESUME_TEXT_LIMIT).collect();
        assert_eq!(truncated.chars().count(), RESUME_TEXT_LIMIT);
    }
}

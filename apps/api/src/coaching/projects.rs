//! Portfolio project suggestions.

use crate::errors::{llm_failure, AppError};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{GenerateRequest, LlmClient};
use crate::models::market::ProjectIdea;

use super::prompts::{projects_schema, PROJECTS_PROMPT_TEMPLATE};

pub async fn generate_project_ideas(
    llm: &LlmClient,
    target_role: &str,
) -> Result<Vec<ProjectIdea>, AppError> {
    let prompt = PROJECTS_PROMPT_TEMPLATE.replace("{target_role}", target_role);

    let request = GenerateRequest::user_text(prompt)
        .with_system(JSON_ONLY_SYSTEM)
        .with_schema(projects_schema())
        .without_thinking();

    llm.generate_json::<Vec<ProjectIdea>>(&request)
        .await
        .map_err(|e| llm_failure("Project generation failed", &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::GenerativeBackend;
    use crate::models::market::Difficulty;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StaticReply(&'static str);

    #[async_trait]
    impl GenerativeBackend for StaticReply {
        async fn generate(
            &self,
            _request: &GenerateRequest,
        ) -> Result<String, crate::llm_client::LlmError> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_project_ideas_parse() {
        let reply = r#"[{
            "id": "p1",
            "title": "Streaming dashboard",
            "difficulty": "Intermediate",
            "description": "Live metrics.",
            "techStack": ["Kafka", "Flink"],
            "keyFeatures": ["Alerting"],
            "resumeValue": "Shows real-time skills"
        }]"#;
        let llm = LlmClient::new(Arc::new(StaticReply(reply)));
        let ideas = generate_project_ideas(&llm, "Data Engineer").await.unwrap();
        assert_eq!(ideas.len(), 1);
        assert_eq!(ideas[0].difficulty, Difficulty::Intermediate);
    }
}

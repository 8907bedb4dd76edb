//! Search-grounded market trend snapshots.

use crate::errors::{llm_failure, AppError};
use crate::llm_client::{GenerateRequest, LlmClient};
use crate::models::market::MarketTrend;

use super::prompts::{trends_example_json, TRENDS_PROMPT_TEMPLATE};

pub async fn fetch_market_trends(
    llm: &LlmClient,
    target_role: &str,
) -> Result<MarketTrend, AppError> {
    let prompt = TRENDS_PROMPT_TEMPLATE
        .replace("{target_role}", target_role)
        .replace("{example_json}", &trends_example_json(target_role).to_string());

    let request = GenerateRequest::user_text(prompt).grounded().without_thinking();

    llm.generate_json::<MarketTrend>(&request)
        .await
        .map_err(|e| llm_failure("Trends fetch failed", &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::GenerativeBackend;
    use crate::models::market::DemandLevel;
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
    async fn test_fenced_trend_object_parses() {
        let reply = r#"```json
        {
            "role": "Data Engineer",
            "salaryRange": "$130k - $190k",
            "demandLevel": "High",
            "hotTechnologies": [{"name": "Iceberg", "growthReason": "Open table formats"}],
            "industryNews": [{"headline": "H", "summary": "S", "impact": "I"}]
        }
        ```"#;
        let llm = LlmClient::new(Arc::new(StaticReply(reply)));
        let trends = fetch_market_trends(&llm, "Data Engineer").await.unwrap();
        assert_eq!(trends.demand_level, DemandLevel::High);
        assert_eq!(trends.hot_technologies[0].name, "Iceberg");
    }

    #[tokio::test]
    async fn test_incomplete_object_is_malformed() {
        let llm = LlmClient::new(Arc::new(StaticReply(r#"{"role": "Data Engineer"}"#)));
        let result = fetch_market_trends(&llm, "Data Engineer").await;
        assert!(matches!(result, Err(AppError::MalformedResponse(_))));
    }
}

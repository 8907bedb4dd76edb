//! Gemini REST backend for [`GenerativeBackend`].
//!
//! One endpoint: `POST {base}/models/{model}:generateContent`, authenticated
//! with the `x-goog-api-key` header. Schema hints go through
//! `generationConfig.responseSchema`; grounded calls attach the
//! `googleSearch` tool instead (the API rejects both at once).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::llm_client::{GenerateRequest, GenerativeBackend, LlmError, OutputMode, Part, MODEL};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key,
        }
    }
}

/// Builds the generateContent request body. Pure so the wire shape is
/// testable without a network.
pub fn build_request_body(request: &GenerateRequest) -> Value {
    let contents: Vec<Value> = request
        .contents
        .iter()
        .map(|content| {
            let parts: Vec<Value> = content
                .parts
                .iter()
                .map(|part| match part {
                    Part::Text(text) => json!({ "text": text }),
                    Part::InlineData { mime_type, data } => json!({
                        "inlineData": { "mimeType": mime_type, "data": data }
                    }),
                })
                .collect();
            json!({ "role": content.role, "parts": parts })
        })
        .collect();

    let mut body = json!({ "contents": contents });

    if let Some(system) = &request.system_instruction {
        body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
    }

    let mut generation_config = serde_json::Map::new();
    if request.disable_thinking {
        generation_config.insert("thinkingConfig".to_string(), json!({ "thinkingBudget": 0 }));
    }

    match &request.output {
        OutputMode::Freeform => {}
        OutputMode::Schema(schema) => {
            generation_config.insert(
                "responseMimeType".to_string(),
                json!("application/json"),
            );
            generation_config.insert("responseSchema".to_string(), schema.clone());
        }
        OutputMode::Grounded => {
            body["tools"] = json!([{ "googleSearch": {} }]);
        }
    }

    if !generation_config.is_empty() {
        body["generationConfig"] = Value::Object(generation_config);
    }

    body
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiResponse {
    /// Concatenated text parts of the first candidate, if any.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, LlmError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, MODEL);
        let body = build_request_body(request);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            // Prefer the structured provider message when the body carries one.
            let message = serde_json::from_str::<GeminiError>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GeminiResponse = response.json().await?;
        debug!(candidates = parsed.candidates.len(), "Gemini response received");

        parsed.text().ok_or(LlmError::EmptyContent)
    }
}

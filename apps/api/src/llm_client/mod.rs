//! LLM Client — the single point of entry for all Gemini API calls in CareerForge.
//!
//! ARCHITECTURAL RULE: No other module may call the provider API directly.
//! All LLM interactions MUST go through this module.
//!
//! Model: gemini-2.5-flash (hardcoded — do not make configurable to prevent drift)

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

pub mod extract;
pub mod gemini;
pub mod prompts;

use extract::ExtractError;

/// The model used for all LLM calls in CareerForge.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-2.5-flash";

/// Default retry budget per call.
const DEFAULT_RETRIES: u32 = 3;
/// Once a rate-limit error is observed, the budget is raised to at least this.
const RATE_LIMIT_MIN_RETRIES: u32 = 5;

const STANDARD_BACKOFF_CAP_MS: u64 = 8_000;
const RATE_LIMIT_BACKOFF_CAP_MS: u64 = 15_000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("JSON extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Rate-limit / quota classification, by status or message markers.
/// Drives both the longer backoff curve and the raised retry budget.
pub fn is_rate_limit(error: &LlmError) -> bool {
    if let LlmError::Api { status: 429, .. } = error {
        return true;
    }
    let message = error.to_string();
    message.contains("429") || message.contains("quota") || message.contains("RESOURCE_EXHAUSTED")
}

/// Delay slept after failed attempt `attempt` (0-based) before the next one.
///
/// Rate-limited failures back off aggressively (4s, 8s, 15s cap); everything
/// else follows the standard curve (1s, 2s, 4s, 8s cap).
pub fn backoff_delay(attempt: u32, rate_limited: bool) -> Duration {
    let (exponent, cap) = if rate_limited {
        (attempt + 2, RATE_LIMIT_BACKOFF_CAP_MS)
    } else {
        (attempt, STANDARD_BACKOFF_CAP_MS)
    };
    let ms = 1000u64
        .checked_shl(exponent)
        .unwrap_or(u64::MAX)
        .min(cap);
    Duration::from_millis(ms)
}

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// One part of a content turn: text, or an inline file payload.
#[derive(Debug, Clone)]
pub enum Part {
    Text(String),
    /// Base64 data tagged with its declared media type (résumé uploads).
    InlineData {
        mime_type: String,
        data: String,
    },
}

/// One turn of conversation content. `role` is `"user"` or `"model"`.
#[derive(Debug, Clone)]
pub struct Content {
    pub role: &'static str,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self { role: "user", parts }
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self::user(vec![Part::Text(text.into())])
    }

    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: "model",
            parts: vec![Part::Text(text.into())],
        }
    }
}

/// Structured-output mode for a call. Schema hints and search grounding are
/// mutually exclusive in the provider API, so the invalid combination is
/// unrepresentable here.
#[derive(Debug, Clone)]
pub enum OutputMode {
    /// Plain text (interview chat turns).
    Freeform,
    /// JSON response constrained by a schema hint.
    Schema(Value),
    /// Google-Search-grounded call; structure comes from the prompt alone.
    Grounded,
}

/// A single provider call, fully described.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub system_instruction: Option<String>,
    pub contents: Vec<Content>,
    pub output: OutputMode,
    /// Disables provider-side thinking to cut latency where the original
    /// flows did.
    pub disable_thinking: bool,
}

impl GenerateRequest {
    pub fn new(contents: Vec<Content>) -> Self {
        Self {
            system_instruction: None,
            contents,
            output: OutputMode::Freeform,
            disable_thinking: false,
        }
    }

    pub fn user_text(prompt: impl Into<String>) -> Self {
        Self::new(vec![Content::user_text(prompt)])
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system_instruction = Some(system.into());
        self
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.output = OutputMode::Schema(schema);
        self
    }

    pub fn grounded(mut self) -> Self {
        self.output = OutputMode::Grounded;
        self
    }

    pub fn without_thinking(mut self) -> Self {
        self.disable_thinking = true;
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Backend seam + retrying client
// ────────────────────────────────────────────────────────────────────────────

/// The seam between the retry wrapper and the wire. Production uses
/// [`gemini::GeminiClient`]; tests substitute stubs.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Performs one provider call and returns the response text.
    async fn generate(&self, request: &GenerateRequest) -> Result<String, LlmError>;
}

/// The single LLM client used by all services. Wraps a backend with bounded
/// retries, exponential backoff, and structured-output helpers.
///
/// Retry state is per-call only — concurrent calls share no rate-limit
/// budget.
#[derive(Clone)]
pub struct LlmClient {
    backend: Arc<dyn GenerativeBackend>,
    retries: u32,
}

impl LlmClient {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self {
            backend,
            retries: DEFAULT_RETRIES,
        }
    }

    #[cfg(test)]
    pub fn with_retries(backend: Arc<dyn GenerativeBackend>, retries: u32) -> Self {
        Self { backend, retries }
    }

    /// Invokes the backend, retrying on failure. The budget starts at the
    /// configured count and is raised to at least 5 the first time a
    /// rate-limit error is observed. The last error is surfaced once the
    /// budget is exhausted.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<String, LlmError> {
        let mut budget = self.retries.max(1);
        let mut last_error: Option<LlmError> = None;
        let mut attempt = 0u32;

        while attempt < budget {
            match self.backend.generate(request).await {
                Ok(text) => {
                    debug!(attempt, "LLM call succeeded");
                    return Ok(text);
                }
                Err(e) => {
                    let rate_limited = is_rate_limit(&e);
                    if rate_limited && budget < RATE_LIMIT_MIN_RETRIES {
                        budget = RATE_LIMIT_MIN_RETRIES;
                    }
                    let delay = backoff_delay(attempt, rate_limited);
                    if rate_limited {
                        warn!(
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            "rate limit hit, backing off"
                        );
                    } else {
                        warn!(
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "LLM call attempt failed"
                        );
                    }
                    last_error = Some(e);
                    attempt += 1;
                    if attempt < budget {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or(LlmError::EmptyContent))
    }

    /// Calls the provider, extracts the JSON payload from the response text,
    /// and deserializes it. The raw text is logged when extraction or
    /// parsing fails so malformed output can be diagnosed.
    pub async fn generate_json<T: DeserializeOwned>(
        &self,
        request: &GenerateRequest,
    ) -> Result<T, LlmError> {
        let text = self.generate(request).await?;

        let json = extract::extract_json(&text).map_err(|e| {
            error!(raw = %text, "no JSON found in LLM response");
            LlmError::Extract(e)
        })?;

        serde_json::from_str(&json).map_err(|e| {
            error!(raw = %text, "failed to parse LLM response as JSON: {e}");
            LlmError::Parse(e)
        })
    }
}

//! Simulated interview: chat turns plus end-of-session feedback.
//!
//! The interviewer persona lives in the system instruction. The visible
//! transcript never contains the kickoff line; it is prepended to every
//! provider call so the model always sees how the session started.

use crate::errors::{llm_failure, AppError};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{Content, GenerateRequest, LlmClient, LlmError};
use crate::models::interview::{ChatMessage, ChatRole, InterviewFeedback};

use super::prompts::{feedback_schema, FEEDBACK_PROMPT_TEMPLATE};

/// Hidden first user turn that opens every interview session.
pub const INTERVIEW_KICKOFF: &str =
    "Start the interview. Introduce yourself briefly and ask the first question.";

/// Shown in-conversation when a chat turn fails outright. Chat degrades
/// instead of erroring so the session survives transient provider trouble.
pub const CONNECTION_TROUBLE_REPLY: &str =
    "I'm having trouble connecting right now (High Traffic). Please try again in a moment.";

/// Shown in-conversation when the model returns an empty reply.
pub const EMPTY_REPLY_FALLBACK: &str = "I didn't catch that. Could you please repeat?";

/// Opening line used when the model returns an empty reply to the kickoff.
pub const START_FALLBACK: &str = "Hello! I'm ready to interview you. Tell me about yourself.";

pub fn interview_system_instruction(target_role: &str) -> String {
    format!(
        "You are a hiring manager for {target_role}. \
         Ask 1 relevant question at a time. \
         Keep responses concise (<80 words). \
         Critique the answer briefly, then ask the next question."
    )
}

/// One interviewer turn over the transcript so far.
pub async fn interview_reply(
    llm: &LlmClient,
    target_role: &str,
    messages: &[ChatMessage],
) -> Result<String, LlmError> {
    let mut contents = vec![Content::user_text(INTERVIEW_KICKOFF)];
    for message in messages {
        contents.push(match message.role {
            ChatRole::User => Content::user_text(message.text.clone()),
            ChatRole::Model => Content::model_text(message.text.clone()),
        });
    }

    let request =
        GenerateRequest::new(contents).with_system(interview_system_instruction(target_role));

    llm.generate(&request).await
}

/// Maps a turn result to the text shown in the conversation. Failures become
/// interviewer messages, never HTTP errors.
pub fn reply_or_fallback(result: Result<String, LlmError>) -> String {
    match result {
        Ok(text) => text,
        Err(LlmError::EmptyContent) => EMPTY_REPLY_FALLBACK.to_string(),
        Err(_) => CONNECTION_TROUBLE_REPLY.to_string(),
    }
}

pub async fn generate_interview_feedback(
    llm: &LlmClient,
    target_role: &str,
    messages: &[ChatMessage],
) -> Result<InterviewFeedback, AppError> {
    let transcript = messages
        .iter()
        .map(|m| {
            let speaker = match m.role {
                ChatRole::User => "Candidate",
                ChatRole::Model => "Interviewer",
            };
            format!("{speaker}: {}", m.text)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = FEEDBACK_PROMPT_TEMPLATE
        .replace("{target_role}", target_role)
        .replace("{transcript}", &transcript);

    let request = GenerateRequest::user_text(prompt)
        .with_system(JSON_ONLY_SYSTEM)
        .with_schema(feedback_schema())
        .without_thinking();

    llm.generate_json::<InterviewFeedback>(&request)
        .await
        .map_err(|e| llm_failure("Feedback generation failed", &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::GenerativeBackend;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct Recorder {
        reply: &'static str,
        seen: Mutex<Vec<GenerateRequest>>,
    }

    #[async_trait]
    impl GenerativeBackend for Recorder {
        async fn generate(&self, request: &GenerateRequest) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(self.reply.to_string())
        }
    }

    #[tokio::test]
    async fn test_kickoff_is_prepended_to_transcript() {
        let backend = Arc::new(Recorder {
            reply: "Tell me about yourself.",
            seen: Mutex::new(Vec::new()),
        });
        let llm = LlmClient::new(backend.clone());

        let messages = vec![
            ChatMessage::new(ChatRole::Model, "Hi, I'm your interviewer."),
            ChatMessage::new(ChatRole::User, "Hello!"),
        ];
        interview_reply(&llm, "Data Engineer", &messages)
            .await
            .unwrap();

        let seen = backend.seen.lock().unwrap();
        let request = &seen[0];
        assert_eq!(request.contents.len(), 3);
        assert_eq!(request.contents[0].role, "user");
        assert_eq!(request.contents[1].role, "model");
        assert!(request
            .system_instruction
            .as_deref()
            .unwrap()
            .contains("hiring manager for Data Engineer"));
    }

    #[test]
    fn test_fallbacks_by_failure_kind() {
        assert_eq!(
            reply_or_fallback(Err(LlmError::EmptyContent)),
            EMPTY_REPLY_FALLBACK
        );
        assert_eq!(
            reply_or_fallback(Err(LlmError::Api {
                status: 429,
                message: "quota".to_string()
            })),
            CONNECTION_TROUBLE_REPLY
        );
        assert_eq!(reply_or_fallback(Ok("Next question.".to_string())), "Next question.");
    }

    #[tokio::test]
    async fn test_feedback_transcript_labels_speakers() {
        let backend = Arc::new(Recorder {
            reply: r#"{
                "score": 7.5,
                "feedbackSummary": "Solid.",
                "strengths": ["clarity"],
                "improvements": ["depth"],
                "recommendedFocus": "system design"
            }"#,
            seen: Mutex::new(Vec::new()),
        });
        let llm = LlmClient::new(backend.clone());

        let messages = vec![
            ChatMessage::new(ChatRole::Model, "First question?"),
            ChatMessage::new(ChatRole::User, "My answer."),
        ];
        let feedback = generate_interview_feedback(&llm, "Data Engineer", &messages)
            .await
            .unwrap();
        assert_eq!(feedback.score, 7.5);

        let seen = backend.seen.lock().unwrap();
        let prompt = match &seen[0].contents[0].parts[0] {
            crate::llm_client::Part::Text(text) => text.clone(),
            other => panic!("unexpected part: {other:?}"),
        };
        assert!(prompt.contains("Interviewer: First question?"));
        assert!(prompt.contains("Candidate: My answer."));
    }
}

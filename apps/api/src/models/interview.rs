//! Interview transcript and feedback entities.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One message in an interview transcript. The transcript is append-only;
/// messages are never edited or removed mid-session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    /// Unix milliseconds.
    pub timestamp: i64,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.to_string(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// Coach evaluation of a completed interview session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewFeedback {
    /// 0-10.
    pub score: f64,
    pub feedback_summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    pub recommended_focus: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_role_wire_names() {
        assert_eq!(serde_json::to_string(&ChatRole::Model).unwrap(), r#""model""#);
        let r: ChatRole = serde_json::from_str(r#""user""#).unwrap();
        assert_eq!(r, ChatRole::User);
    }

    #[test]
    fn test_new_message_has_id_and_timestamp() {
        let msg = ChatMessage::new(ChatRole::User, "Tell me about yourself");
        assert!(!msg.id.is_empty());
        assert!(msg.timestamp > 0);
    }

    #[test]
    fn test_feedback_camel_case() {
        let json = r#"{
            "score": 7,
            "feedbackSummary": "Solid answers, thin on metrics.",
            "strengths": ["Clear structure"],
            "improvements": ["Quantify outcomes"],
            "recommendedFocus": "STAR method practice"
        }"#;
        let fb: InterviewFeedback = serde_json::from_str(json).unwrap();
        assert_eq!(fb.recommended_focus, "STAR method practice");
        assert!((fb.score - 7.0).abs() < f64::EPSILON);
    }
}

//! User account record and the per-user persisted aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::interview::{ChatMessage, InterviewFeedback};
use crate::models::market::{JobListing, MarketTrend, ProjectIdea};
use crate::models::plan::WeeklyPlan;
use crate::models::profile::{CareerAnalysis, UserProfile};

/// One account row. Only the Argon2 PHC string of the password is stored,
/// never the password itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// The complete per-user bundle, persisted and reloaded as one unit.
/// Saves overwrite the whole blob; there are no partial updates and the
/// last write wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub user_profile: UserProfile,
    pub analysis: Option<CareerAnalysis>,
    pub plan: Option<Vec<WeeklyPlan>>,
    #[serde(default)]
    pub jobs: Vec<JobListing>,
    #[serde(default)]
    pub projects: Vec<ProjectIdea>,
    pub trends: Option<MarketTrend>,
    #[serde(default)]
    pub chat_messages: Vec<ChatMessage>,
    pub interview_feedback: Option<InterviewFeedback>,
}

impl UserData {
    /// Fresh aggregate for a new user (or after a full reset).
    pub fn empty(name: &str) -> Self {
        Self {
            user_profile: UserProfile::new(name),
            analysis: None,
            plan: None,
            jobs: Vec::new(),
            projects: Vec::new(),
            trends: None,
            chat_messages: Vec::new(),
            interview_feedback: None,
        }
    }

    /// Starts a new career track: the résumé survives, everything derived
    /// from the old target role is discarded.
    pub fn switch_track(&mut self) {
        self.user_profile.target_role.clear();
        self.analysis = None;
        self.plan = None;
        self.jobs.clear();
        self.projects.clear();
        self.trends = None;
        self.chat_messages.clear();
        self.interview_feedback = None;
    }
}

//! Learning plan entities.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Course,
    Project,
    Reading,
}

/// One task in a learning week. The three search-query strings are derived
/// client-side from the title after generation, never requested from the
/// provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningTask {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub estimated_hours: f64,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udemy_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coursera_query: Option<String>,
}

impl LearningTask {
    /// Fills the derived search-query strings from the task title.
    pub fn derive_queries(&mut self) {
        self.video_query = Some(format!("{} tutorial", self.title));
        self.udemy_query = Some(format!("{} course", self.title));
        self.coursera_query = Some(format!("{} specialization", self.title));
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    pub week_number: u32,
    pub theme: String,
    #[serde(default)]
    pub tasks: Vec<LearningTask>,
}

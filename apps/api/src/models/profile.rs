//! Profile and analysis entities — the candidate's input and the AI's read of it.

use serde::{Deserialize, Serialize};

/// The candidate profile driving every coaching operation.
/// A résumé is supplied either as raw text or as an inline file payload,
/// never both; analysis rejects a profile with neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub target_role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_file: Option<ResumeFile>,
}

impl UserProfile {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            target_role: String::new(),
            resume_text: None,
            resume_file: None,
        }
    }
}

/// Inline résumé payload: base64 content plus the browser-declared media type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeFile {
    /// Base64-encoded file content.
    pub data: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Technical,
    Soft,
    Domain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillStatus {
    #[serde(rename = "acquired")]
    Acquired,
    #[serde(rename = "missing")]
    Missing,
    #[serde(rename = "in-progress")]
    InProgress,
}

/// A single skill extracted by analysis. Name uniqueness is assumed,
/// not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub category: SkillCategory,
    pub status: SkillStatus,
}

/// Result of one profile analysis. Immutable once created — replaced
/// wholesale on re-analysis.
///
/// `readiness_score` is model-generated and intentionally not clamped to
/// [0, 100]; out-of-range values pass through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerAnalysis {
    pub readiness_score: f64,
    pub summary: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

impl CareerAnalysis {
    /// Names of skills the analysis marked as missing for the target role.
    pub fn missing_skill_names(&self) -> Vec<String> {
        self.skills
            .iter()
            .filter(|s| s.status == SkillStatus::Missing)
            .map(|s| s.name.clone())
            .collect()
    }

    /// All skill names, regardless of status.
    pub fn skill_names(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_status_in_progress_wire_name() {
        let skill: Skill =
            serde_json::from_str(r#"{"name":"Rust","category":"technical","status":"in-progress"}"#)
                .unwrap();
        assert_eq!(skill.status, SkillStatus::InProgress);
        let json = serde_json::to_string(&skill).unwrap();
        assert!(json.contains(r#""status":"in-progress""#));
    }

    #[test]
    fn test_analysis_camel_case_round_trip() {
        let json = r#"{
            "readinessScore": 72,
            "summary": "Strong data foundation, light on deployment experience.",
            "skills": [
                {"name": "Python", "category": "technical", "status": "acquired"},
                {"name": "Airflow", "category": "technical", "status": "missing"}
            ],
            "strengths": ["SQL fluency"],
            "weaknesses": ["No pipeline orchestration"]
        }"#;
        let analysis: CareerAnalysis = serde_json::from_str(json).unwrap();
        assert!((analysis.readiness_score - 72.0).abs() < f64::EPSILON);
        assert_eq!(analysis.missing_skill_names(), vec!["Airflow"]);
        assert_eq!(analysis.skill_names().len(), 2);

        let back = serde_json::to_string(&analysis).unwrap();
        assert!(back.contains("readinessScore"));
    }

    #[test]
    fn test_analysis_tolerates_missing_lists() {
        let analysis: CareerAnalysis =
            serde_json::from_str(r#"{"readinessScore": 40, "summary": "Partial."}"#).unwrap();
        assert!(analysis.skills.is_empty());
        assert!(analysis.missing_skill_names().is_empty());
    }

    #[test]
    fn test_readiness_score_not_clamped() {
        let analysis: CareerAnalysis =
            serde_json::from_str(r#"{"readinessScore": 140, "summary": "Over-eager model."}"#)
                .unwrap();
        assert!((analysis.readiness_score - 140.0).abs() < f64::EPSILON);
    }
}

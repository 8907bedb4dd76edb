//! Market-facing entities: job listings, project ideas, and trend snapshots.
//!
//! Jobs and trends come from search-grounded provider calls with no schema
//! hint, so these types tolerate absent optional fields but reject payloads
//! missing the core ones.

use serde::{Deserialize, Serialize};

/// A job listing surfaced by the grounded job search.
///
/// `match_score` is model-generated and passes through unclamped even when
/// outside [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<String>,
    pub match_score: f64,
    pub description: String,
    #[serde(default)]
    pub skills_matched: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_link: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// A portfolio project suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIdea {
    pub id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub key_features: Vec<String>,
    pub resume_value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotTechnology {
    pub name: String,
    pub growth_reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryNews {
    pub headline: String,
    pub summary: String,
    pub impact: String,
}

/// Market snapshot for one target role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketTrend {
    pub role: String,
    pub salary_range: String,
    pub demand_level: DemandLevel,
    #[serde(default)]
    pub hot_technologies: Vec<HotTechnology>,
    #[serde(default)]
    pub industry_news: Vec<IndustryNews>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_listing_minimal_grounded_payload() {
        // Grounded responses often omit salary/postedAt/applyLink.
        let json = r#"{
            "id": "acme-de-1",
            "title": "Data Engineer",
            "company": "Acme",
            "location": "Remote",
            "matchScore": 88,
            "description": "Build pipelines."
        }"#;
        let job: JobListing = serde_json::from_str(json).unwrap();
        assert!(job.salary.is_none());
        assert!(job.skills_matched.is_empty());
        assert!((job.match_score - 88.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_match_score_out_of_range_passes_through() {
        let json = r#"{
            "id": "x", "title": "t", "company": "c", "location": "l",
            "matchScore": 130, "description": "d"
        }"#;
        let job: JobListing = serde_json::from_str(json).unwrap();
        assert!((job.match_score - 130.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_difficulty_wire_names_are_capitalized() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Intermediate).unwrap(),
            r#""Intermediate""#
        );
        let d: Difficulty = serde_json::from_str(r#""Advanced""#).unwrap();
        assert_eq!(d, Difficulty::Advanced);
    }

    #[test]
    fn test_market_trend_round_trip() {
        let json = r#"{
            "role": "Data Analyst",
            "salaryRange": "$90k - $130k",
            "demandLevel": "High",
            "hotTechnologies": [{"name": "dbt", "growthReason": "Analytics engineering adoption"}],
            "industryNews": [{"headline": "h", "summary": "s", "impact": "i"}]
        }"#;
        let trend: MarketTrend = serde_json::from_str(json).unwrap();
        assert_eq!(trend.demand_level, DemandLevel::High);
        assert_eq!(trend.hot_technologies[0].name, "dbt");
        let back = serde_json::to_string(&trend).unwrap();
        assert!(back.contains("salaryRange"));
        assert!(back.contains("growthReason"));
    }
}

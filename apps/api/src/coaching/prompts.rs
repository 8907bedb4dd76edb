// All LLM prompt constants and response schemas for the coaching module.
// Schema-constrained calls carry a Gemini responseSchema; grounded calls
// describe their shape in the prompt instead (the two cannot be combined).

use serde_json::{json, Value};

/// Resume analysis prompt. Replace `{target_role}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Role: Senior Career Coach.
Task: Analyze the candidate's profile against the target role: "{target_role}".

Output strictly in JSON format matching the schema.
- readinessScore: number 0-100 based on fit.
- summary: A 2-3 sentence executive summary.
- skills: List of skills extracted, categorized, and marked as 'acquired' (found in resume) or 'missing' (required for target role).
- strengths: Top 3 selling points.
- weaknesses: Top 3 gaps to fill."#;

/// Learning plan prompt.
/// Replace: {target_role}, {focus_skills}, {regenerate_note}, {timestamp}
pub const PLAN_PROMPT_TEMPLATE: &str = r#"Role: Expert Curriculum Designer.
Task: Create a 1-Week Intensive Learning Sprint for a "{target_role}".
Focus strictly on these gaps: {focus_skills}.

Requirements:
- Output exactly 1 week (weekNumber: 1).
- 4-5 high-impact tasks per week.
- Mix of 'course', 'reading', 'project'.
- Provide detailed, engaging titles and descriptions for each task and week theme.
{regenerate_note}
- Timestamp: {timestamp}"#;

/// Extra instruction appended to plan regenerations so the model does not
/// repeat the previous plan.
pub const PLAN_REGENERATE_NOTE: &str = "This is a regeneration request. Please create a completely new and different learning plan with fresh tasks and approaches.";

/// Job search prompt (grounded).
/// Replace: {target_role}, {skills}, {example_json}
pub const JOBS_PROMPT_TEMPLATE: &str = r#"Role: Technical Recruiter.
Task: Search for 3 active, relevant job listings for "{target_role}" and return them as a JSON array.

Context: The candidate has these skills: {skills}.

Instructions:
1. Use Google Search to find REAL, active job listings.
2. For each job, analyze the description and calculate a 'matchScore' (0-100) based on the candidate's skills.
3. Extract 'skillsMatched' from the job description that overlap with candidate's skills.
4. Format the output EXACTLY as this JSON example (same keys):
{example_json}

Output Rules:
- Return ONLY the JSON array.
- No markdown formatting (no ```json).
- Ensure 'applyLink' is a valid direct link if possible, or a search result link.
- If exact salary is not found, estimate based on role/location or use 'Competitive'.
- Start with '[' and end with ']'."#;

/// Project ideas prompt. Replace `{target_role}`.
pub const PROJECTS_PROMPT_TEMPLATE: &str = r#"Role: Senior Engineering Manager.
Task: Suggest 3 portfolio projects for a "{target_role}".
Levels: Beginner, Intermediate, Advanced."#;

/// Market trends prompt (grounded).
/// Replace: {target_role}, {example_json}
pub const TRENDS_PROMPT_TEMPLATE: &str = r#"Role: Tech Analyst.
Task: Provide a real-time market snapshot for "{target_role}" including salary ranges, demand, hot technologies, and recent industry news.

Instructions:
1. Use Google Search to find CURRENT data for:
   - Salary range (US average or global tech hubs)
   - Market demand level
   - Trending technologies/skills for this role
   - Recent news headlines affecting this role
2. Format the output EXACTLY as this JSON object:
{example_json}

Output Rules:
- Return ONLY the JSON object.
- No markdown formatting.
- Start with '{' and end with '}'."#;

/// Interview feedback prompt.
/// Replace: {target_role}, {transcript}
pub const FEEDBACK_PROMPT_TEMPLATE: &str = r#"Role: Interview Coach.
Task: Evaluate transcript for "{target_role}".
Transcript: {transcript}
Provide Score (0-10), Feedback, Strengths, Improvements, Focus Area."#;

/// Worked example embedded in the jobs prompt so the grounded call returns
/// the exact key shape the client expects.
pub fn jobs_example_json() -> Value {
    json!([
        {
            "id": "apple-ml-2025",
            "title": "Machine Learning Engineer, OS Intelligence",
            "company": "Apple",
            "location": "Cupertino, CA / Remote Eligible",
            "salary": "$126,800 - $220,900",
            "postedAt": "3 days ago",
            "matchScore": 95,
            "description": "Design deep learning architectures and implement ML algorithms to optimize operating system performance and battery life.",
            "skillsMatched": ["Python", "PyTorch", "TensorFlow", "Deep Learning"],
            "applyLink": "https://www.apple.com/careers"
        }
    ])
}

/// Worked example embedded in the trends prompt.
pub fn trends_example_json(target_role: &str) -> Value {
    json!({
        "role": target_role,
        "salaryRange": "$120k - $180k",
        "demandLevel": "High",
        "hotTechnologies": [
            { "name": "TechName", "growthReason": "Reason for growth" }
        ],
        "industryNews": [
            { "headline": "Headline", "summary": "Short summary", "impact": "Impact on career" }
        ]
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Response schemas (Gemini structured output)
// ────────────────────────────────────────────────────────────────────────────

pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "readinessScore": { "type": "NUMBER" },
            "summary": { "type": "STRING" },
            "skills": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "category": { "type": "STRING", "enum": ["technical", "soft", "domain"] },
                        "status": { "type": "STRING", "enum": ["acquired", "missing", "in-progress"] }
                    }
                }
            },
            "strengths": { "type": "ARRAY", "items": { "type": "STRING" } },
            "weaknesses": { "type": "ARRAY", "items": { "type": "STRING" } }
        }
    })
}

pub fn plan_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "weekNumber": { "type": "INTEGER" },
                "theme": { "type": "STRING" },
                "tasks": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "id": { "type": "STRING" },
                            "title": { "type": "STRING" },
                            "description": { "type": "STRING" },
                            "type": { "type": "STRING", "enum": ["course", "project", "reading"] },
                            "estimatedHours": { "type": "NUMBER" },
                            "completed": { "type": "BOOLEAN" }
                        }
                    }
                }
            }
        }
    })
}

pub fn projects_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "title": { "type": "STRING" },
                "difficulty": { "type": "STRING", "enum": ["Beginner", "Intermediate", "Advanced"] },
                "description": { "type": "STRING" },
                "techStack": { "type": "ARRAY", "items": { "type": "STRING" } },
                "keyFeatures": { "type": "ARRAY", "items": { "type": "STRING" } },
                "resumeValue": { "type": "STRING" }
            }
        }
    })
}

pub fn feedback_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "NUMBER" },
            "feedbackSummary": { "type": "STRING" },
            "strengths": { "type": "ARRAY", "items": { "type": "STRING" } },
            "improvements": { "type": "ARRAY", "items": { "type": "STRING" } },
            "recommendedFocus": { "type": "STRING" }
        }
    })
}

//! Learning plan generation.

use chrono::Utc;

use crate::errors::{llm_failure, AppError};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{GenerateRequest, LlmClient};
use crate::models::plan::WeeklyPlan;

use super::prompts::{plan_schema, PLAN_PROMPT_TEMPLATE, PLAN_REGENERATE_NOTE};

/// At most this many missing skills are named in the prompt.
const FOCUS_SKILL_LIMIT: usize = 5;

pub async fn generate_learning_plan(
    llm: &LlmClient,
    target_role: &str,
    missing_skills: &[String],
    regenerate: bool,
) -> Result<Vec<WeeklyPlan>, AppError> {
    let focus_skills = if missing_skills.is_empty() {
        format!("core modern competencies for {target_role}")
    } else {
        missing_skills
            .iter()
            .take(FOCUS_SKILL_LIMIT)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };

    // The timestamp defeats provider-side caching so regenerations differ.
    let prompt = PLAN_PROMPT_TEMPLATE
        .replace("{target_role}", target_role)
        .replace("{focus_skills}", &focus_skills)
        .replace(
            "{regenerate_note}",
            if regenerate { PLAN_REGENERATE_NOTE } else { "" },
        )
        .replace("{timestamp}", &Utc::now().timestamp_millis().to_string());

    let request = GenerateRequest::user_text(prompt)
        .with_system(JSON_ONLY_SYSTEM)
        .with_schema(plan_schema())
        .without_thinking();

    let mut plan = llm
        .generate_json::<Vec<WeeklyPlan>>(&request)
        .await
        .map_err(|e| llm_failure("Plan generation failed", &e))?;

    // Weeks are renumbered sequentially from 1 regardless of what the model
    // claimed, and every task gets its derived search queries.
    for (index, week) in plan.iter_mut().enumerate() {
        week.week_number = index as u32 + 1;
        for task in &mut week.tasks {
            task.derive_queries();
        }
    }

    Ok(plan)
}

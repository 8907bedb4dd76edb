//! Axum route handlers for the coaching API.
//!
//! Every mutating handler commits the updated aggregate with one explicit
//! `save_user_data` call and returns the committed state, so the client
//! always sees exactly what was persisted.

use axum::{
    extract::{Path, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::load_user_data;
use crate::coaching::analysis::{analyze_profile, ResumeInput};
use crate::coaching::interview::{
    self, generate_interview_feedback, interview_reply, reply_or_fallback,
};
use crate::coaching::jobs::find_matching_jobs;
use crate::coaching::plan::generate_learning_plan;
use crate::coaching::projects::generate_project_ideas;
use crate::coaching::trends::fetch_market_trends;
use crate::errors::{llm_failure, AppError};
use crate::llm_client::LlmError;
use crate::models::interview::{ChatMessage, ChatRole};
use crate::models::plan::{LearningTask, TaskType};
use crate::models::profile::ResumeFile;
use crate::models::user::UserData;
use crate::state::AppState;

/// Uploaded résumé files beyond this many decoded bytes are rejected.
pub const MAX_RESUME_FILE_BYTES: usize = 2 * 1024 * 1024;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub target_role: String,
    pub resume_text: Option<String>,
    pub resume_file: Option<ResumeFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskRequest {
    pub week_number: u32,
    pub title: String,
    #[serde(default = "default_task_type")]
    pub task_type: TaskType,
    #[serde(default = "default_task_hours")]
    pub estimated_hours: f64,
}

fn default_task_type() -> TaskType {
    TaskType::Course
}

fn default_task_hours() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
pub struct InterviewMessageRequest {
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregate access
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/users/:email/data
pub async fn get_data(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserData>, AppError> {
    Ok(Json(load_user_data(&state.store, &email)?))
}

/// PUT /api/v1/users/:email/data — wholesale replacement.
pub async fn put_data(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(data): Json<UserData>,
) -> Result<Json<UserData>, AppError> {
    if state.store.get_user(&email)?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    state.store.save_user_data(&email, &data)?;
    Ok(Json(data))
}

/// POST /api/v1/users/:email/reset — fresh aggregate, name kept.
pub async fn reset(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserData>, AppError> {
    let data = load_user_data(&state.store, &email)?;
    let fresh = UserData::empty(&data.user_profile.name);
    state.store.save_user_data(&email, &fresh)?;
    info!(%email, "User data reset");
    Ok(Json(fresh))
}

/// POST /api/v1/users/:email/switch-track — résumé kept, everything derived
/// from the old target role discarded.
pub async fn switch_track(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserData>, AppError> {
    let mut data = load_user_data(&state.store, &email)?;
    data.switch_track();
    state.store.save_user_data(&email, &data)?;
    Ok(Json(data))
}

// ────────────────────────────────────────────────────────────────────────────
// Analysis
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/users/:email/analyze
pub async fn analyze(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<UserData>, AppError> {
    if req.target_role.trim().is_empty() {
        return Err(AppError::Validation("Target role is required".to_string()));
    }
    if req.resume_text.is_none() && req.resume_file.is_none() {
        return Err(AppError::Validation(
            "No resume input provided".to_string(),
        ));
    }
    if let Some(file) = &req.resume_file {
        let decoded = BASE64
            .decode(&file.data)
            .map_err(|_| AppError::Validation("Resume file is not valid base64".to_string()))?;
        if decoded.len() > MAX_RESUME_FILE_BYTES {
            return Err(AppError::Validation(
                "File size too large. Please upload a PDF smaller than 2MB.".to_string(),
            ));
        }
    }

    let mut data = load_user_data(&state.store, &email)?;

    let input = ResumeInput {
        text: req.resume_text.clone(),
        file: req.resume_file.clone(),
    };
    let analysis = analyze_profile(&state.llm, &input, &req.target_role).await?;

    data.user_profile.target_role = req.target_role;
    data.user_profile.resume_text = req.resume_text;
    data.user_profile.resume_file = req.resume_file;
    data.analysis = Some(analysis);
    state.store.save_user_data(&email, &data)?;

    Ok(Json(data))
}

// ────────────────────────────────────────────────────────────────────────────
// Learning plan
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/users/:email/plan — generates (or regenerates, when a plan
/// already exists) the learning sprint.
pub async fn generate_plan(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserData>, AppError> {
    let mut data = load_user_data(&state.store, &email)?;
    let analysis = data
        .analysis
        .as_ref()
        .ok_or_else(|| AppError::Validation("Run a resume analysis first".to_string()))?;

    let missing = analysis.missing_skill_names();
    let regenerate = data.plan.is_some();
    let plan = generate_learning_plan(
        &state.llm,
        &data.user_profile.target_role,
        &missing,
        regenerate,
    )
    .await?;

    data.plan = Some(plan);
    state.store.save_user_data(&email, &data)?;
    Ok(Json(data))
}

/// POST /api/v1/users/:email/plan/tasks — manual task insertion.
pub async fn add_task(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(req): Json<AddTaskRequest>,
) -> Result<Json<UserData>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("Task title is required".to_string()));
    }

    let mut data = load_user_data(&state.store, &email)?;
    let plan = data
        .plan
        .as_mut()
        .ok_or_else(|| AppError::Validation("No learning plan exists".to_string()))?;
    let week = plan
        .iter_mut()
        .find(|w| w.week_number == req.week_number)
        .ok_or_else(|| AppError::NotFound(format!("Week {} not found", req.week_number)))?;

    week.tasks.push(LearningTask {
        id: Uuid::new_v4().to_string(),
        title: req.title,
        description: "Manually added task".to_string(),
        task_type: req.task_type,
        estimated_hours: req.estimated_hours,
        completed: false,
        video_query: None,
        udemy_query: None,
        coursera_query: None,
    });

    state.store.save_user_data(&email, &data)?;
    Ok(Json(data))
}

/// POST /api/v1/users/:email/plan/tasks/:task_id/toggle
pub async fn toggle_task(
    State(state): State<AppState>,
    Path((email, task_id)): Path<(String, String)>,
) -> Result<Json<UserData>, AppError> {
    let mut data = load_user_data(&state.store, &email)?;
    let plan = data
        .plan
        .as_mut()
        .ok_or_else(|| AppError::Validation("No learning plan exists".to_string()))?;

    let task = plan
        .iter_mut()
        .flat_map(|w| w.tasks.iter_mut())
        .find(|t| t.id == task_id)
        .ok_or_else(|| AppError::NotFound(format!("Task {task_id} not found")))?;
    task.completed = !task.completed;

    state.store.save_user_data(&email, &data)?;
    Ok(Json(data))
}

/// DELETE /api/v1/users/:email/plan/tasks/:task_id — removing an unknown
/// task is a no-op, matching the optimistic delete in the UI.
pub async fn delete_task(
    State(state): State<AppState>,
    Path((email, task_id)): Path<(String, String)>,
) -> Result<Json<UserData>, AppError> {
    let mut data = load_user_data(&state.store, &email)?;
    if let Some(plan) = data.plan.as_mut() {
        for week in plan.iter_mut() {
            week.tasks.retain(|t| t.id != task_id);
        }
    }
    state.store.save_user_data(&email, &data)?;
    Ok(Json(data))
}

// ────────────────────────────────────────────────────────────────────────────
// Jobs, projects, trends
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/users/:email/jobs/scan
pub async fn scan_jobs(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserData>, AppError> {
    let mut data = load_user_data(&state.store, &email)?;
    let analysis = data
        .analysis
        .as_ref()
        .ok_or_else(|| AppError::Validation("Run a resume analysis first".to_string()))?;

    let skills = analysis.skill_names();
    let jobs = find_matching_jobs(&state.llm, &data.user_profile.target_role, &skills).await?;

    data.jobs = jobs;
    state.store.save_user_data(&email, &data)?;
    Ok(Json(data))
}

/// POST /api/v1/users/:email/projects/generate
pub async fn generate_projects(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserData>, AppError> {
    let mut data = load_user_data(&state.store, &email)?;
    if data.user_profile.target_role.trim().is_empty() {
        return Err(AppError::Validation(
            "Please define a target role first".to_string(),
        ));
    }

    data.projects = generate_project_ideas(&state.llm, &data.user_profile.target_role).await?;
    state.store.save_user_data(&email, &data)?;
    Ok(Json(data))
}

/// POST /api/v1/users/:email/trends/refresh
pub async fn refresh_trends(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserData>, AppError> {
    let mut data = load_user_data(&state.store, &email)?;
    if data.user_profile.target_role.trim().is_empty() {
        return Err(AppError::Validation(
            "Please define a target role first".to_string(),
        ));
    }

    data.trends = Some(fetch_market_trends(&state.llm, &data.user_profile.target_role).await?);
    state.store.save_user_data(&email, &data)?;
    Ok(Json(data))
}

// ────────────────────────────────────────────────────────────────────────────
// Interview
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/users/:email/interview/start — clears any previous session
/// and produces the interviewer's opening message. Unlike in-session turns,
/// a failure here surfaces as an error so the client never shows a broken
/// session it cannot recover.
pub async fn start_interview(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserData>, AppError> {
    let mut data = load_user_data(&state.store, &email)?;
    if data.user_profile.target_role.trim().is_empty() {
        return Err(AppError::Validation(
            "Please define a target role first".to_string(),
        ));
    }

    data.chat_messages.clear();
    data.interview_feedback = None;

    let opening = match interview_reply(&state.llm, &data.user_profile.target_role, &[]).await {
        Ok(text) => text,
        Err(LlmError::EmptyContent) => interview::START_FALLBACK.to_string(),
        Err(e) => return Err(llm_failure("Failed to start interview", &e)),
    };

    data.chat_messages
        .push(ChatMessage::new(ChatRole::Model, &opening));
    state.store.save_user_data(&email, &data)?;
    Ok(Json(data))
}

/// POST /api/v1/users/:email/interview/message — one candidate turn. Turn
/// failures degrade into interviewer messages so the session continues.
pub async fn interview_message(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(req): Json<InterviewMessageRequest>,
) -> Result<Json<UserData>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("Message text is required".to_string()));
    }

    let mut data = load_user_data(&state.store, &email)?;
    if data.chat_messages.is_empty() {
        return Err(AppError::Validation(
            "No interview in progress".to_string(),
        ));
    }

    data.chat_messages
        .push(ChatMessage::new(ChatRole::User, &req.text));

    let result = interview_reply(
        &state.llm,
        &data.user_profile.target_role,
        &data.chat_messages,
    )
    .await;
    let reply = reply_or_fallback(result);

    data.chat_messages
        .push(ChatMessage::new(ChatRole::Model, &reply));
    state.store.save_user_data(&email, &data)?;
    Ok(Json(data))
}

/// POST /api/v1/users/:email/interview/finish — scores the session. A
/// transcript with fewer than two messages carries no signal and is
/// discarded without a feedback call.
pub async fn finish_interview(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserData>, AppError> {
    let mut data = load_user_data(&state.store, &email)?;

    if data.chat_messages.len() < 2 {
        data.chat_messages.clear();
        state.store.save_user_data(&email, &data)?;
        return Ok(Json(data));
    }

    match generate_interview_feedback(
        &state.llm,
        &data.user_profile.target_role,
        &data.chat_messages,
    )
    .await
    {
        Ok(feedback) => {
            data.interview_feedback = Some(feedback);
            state.store.save_user_data(&email, &data)?;
            Ok(Json(data))
        }
        Err(e) => {
            // The transcript is gone either way; keeping it would invite a
            // retry loop against a transcript the user believes is closed.
            data.chat_messages.clear();
            state.store.save_user_data(&email, &data)?;
            Err(e)
        }
    }
}

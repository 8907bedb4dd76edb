pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::auth::handlers as auth_handlers;
use crate::coaching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/signup", post(auth_handlers::signup))
        .route("/api/v1/auth/login", post(auth_handlers::login))
        // Aggregate access
        .route(
            "/api/v1/users/:email/data",
            get(handlers::get_data).put(handlers::put_data),
        )
        .route("/api/v1/users/:email/reset", post(handlers::reset))
        .route(
            "/api/v1/users/:email/switch-track",
            post(handlers::switch_track),
        )
        // Coaching operations
        .route("/api/v1/users/:email/analyze", post(handlers::analyze))
        .route("/api/v1/users/:email/plan", post(handlers::generate_plan))
        .route(
            "/api/v1/users/:email/plan/tasks",
            post(handlers::add_task),
        )
        .route(
            "/api/v1/users/:email/plan/tasks/:task_id/toggle",
            post(handlers::toggle_task),
        )
        .route(
            "/api/v1/users/:email/plan/tasks/:task_id",
            delete(handlers::delete_task),
        )
        .route("/api/v1/users/:email/jobs/scan", post(handlers::scan_jobs))
        .route(
            "/api/v1/users/:email/projects/generate",
            post(handlers::generate_projects),
        )
        .route(
            "/api/v1/users/:email/trends/refresh",
            post(handlers::refresh_trends),
        )
        // Interview
        .route(
            "/api/v1/users/:email/interview/start",
            post(handlers::start_interview),
        )
        .route(
            "/api/v1/users/:email/interview/message",
            post(handlers::interview_message),
        )
        .route(
            "/api/v1/users/:email/interview/finish",
            post(handlers::finish_interview),
        )
        .with_state(state)
}

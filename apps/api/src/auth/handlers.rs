use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::auth;
use crate::errors::AppError;
use crate::models::user::UserRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/v1/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserRecord>), AppError> {
    let user = auth::signup(&state.store, &req.email, &req.password)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<UserRecord>, AppError> {
    let user = auth::login(&state.store, &req.email, &req.password)?;
    Ok(Json(user))
}

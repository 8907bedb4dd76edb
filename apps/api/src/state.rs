use std::sync::Arc;

use crate::config::Config;
use crate::db::UserStore;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<UserStore>,
    pub llm: LlmClient,
    pub config: Config,
}

use axum::extract::State;
use serde::Serialize;

use crate::api::{ApiResponse, ApiResult};
use crate::database::JokeSummary;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JokesIndex {
    pub jokes: Vec<JokeSummary>,
}

/// GET /jokes - every joke, newest first
pub async fn get(State(state): State<AppState>) -> ApiResult<JokesIndex> {
    let jokes = state.jokes.list().await?;
    Ok(ApiResponse::success(JokesIndex { jokes }))
}

use axum::{
    extract::{Path, State},
    http::HeaderMap,
};

use crate::api::{ApiResponse, JokeRouteError, JokeView};
use crate::state::AppState;

/// GET /jokes/:joke_id - the joke plus whether the visitor owns it
pub async fn get(
    State(state): State<AppState>,
    Path(joke_id): Path<String>,
    headers: HeaderMap,
) -> Result<ApiResponse<JokeView>, JokeRouteError> {
    let data = state
        .jokes
        .load(&joke_id, &headers)
        .await
        .map_err(|e| JokeRouteError::new(&joke_id, e))?;

    Ok(ApiResponse::success(JokeView::idle(data)))
}

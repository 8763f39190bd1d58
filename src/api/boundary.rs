//! Presentation of the joke route: the view model for a loaded joke and the
//! boundaries that turn a failed request into user-facing copy.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::database::Joke;
use crate::error::ApiError;
use crate::services::LoaderData;

/// What the joke page renders
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JokeView {
    pub joke: Joke,
    pub is_owner: bool,
    /// False while a submission for this page is in flight
    pub can_delete: bool,
}

impl JokeView {
    /// View for a freshly rendered page, which has nothing pending
    pub fn idle(data: LoaderData) -> Self {
        Self {
            joke: data.joke,
            is_owner: data.is_owner,
            can_delete: true,
        }
    }
}

/// A status the catch boundary has no copy for
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unhandled error: {0}")]
pub struct UnhandledStatus(pub u16);

/// Copy for the statuses the joke page knows how to explain
pub fn catch_boundary(error: &ApiError, joke_id: &str) -> Result<String, UnhandledStatus> {
    match error.status_code() {
        404 => Ok(error.message().to_string()),
        401 => Ok(format!("Sorry, but {} is not your joke.", joke_id)),
        other => Err(UnhandledStatus(other)),
    }
}

/// Last-resort copy once the catch boundary gives up
pub fn error_boundary(joke_id: &str) -> String {
    format!(
        "There was an error loading joke by the id {}. Sorry.",
        joke_id
    )
}

/// Failure of a `/jokes/:joke_id` request, rendered through the boundaries
#[derive(Debug)]
pub struct JokeRouteError {
    pub joke_id: String,
    pub error: ApiError,
}

impl JokeRouteError {
    pub fn new(joke_id: impl Into<String>, error: ApiError) -> Self {
        Self {
            joke_id: joke_id.into(),
            error,
        }
    }

    /// Boundary copy for this failure
    pub fn display(&self) -> String {
        match catch_boundary(&self.error, &self.joke_id) {
            Ok(copy) => copy,
            Err(unhandled) => {
                tracing::error!(joke_id = %self.joke_id, "{}: {}", unhandled, self.error);
                error_boundary(&self.joke_id)
            }
        }
    }
}

impl IntoResponse for JokeRouteError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = json!({
            "success": false,
            "error": self.error.to_json(),
            "display": self.display(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_renders_carried_message() {
        let copy = catch_boundary(&ApiError::not_found("no such joke"), "j1").unwrap();
        assert_eq!(copy, "no such joke");
    }

    #[test]
    fn unauthorized_names_the_joke() {
        let copy = catch_boundary(&ApiError::unauthorized("not your joke"), "j1").unwrap();
        assert_eq!(copy, "Sorry, but j1 is not your joke.");
    }

    #[test]
    fn other_statuses_are_unhandled() {
        assert_eq!(
            catch_boundary(&ApiError::unsupported("put"), "j1"),
            Err(UnhandledStatus(405))
        );
        assert_eq!(
            catch_boundary(&ApiError::internal_server_error("boom"), "j1"),
            Err(UnhandledStatus(500))
        );
    }

    #[test]
    fn fatal_statuses_fall_through_to_error_boundary() {
        let err = JokeRouteError::new("j9", ApiError::service_unavailable("down"));
        assert_eq!(
            err.display(),
            "There was an error loading joke by the id j9. Sorry."
        );
    }

    #[test]
    fn idle_view_allows_delete() {
        let joke = Joke::new("u1", "Pun", "...").with_id("j1");
        let view = JokeView::idle(LoaderData { joke, is_owner: true });
        assert!(view.can_delete);
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["isOwner"], true);
        assert_eq!(value["canDelete"], true);
    }
}

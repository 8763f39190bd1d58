//! Ownership-gated read and delete of a single joke.
//!
//! The loader is open to anonymous visitors and only reports whether the
//! visitor owns the joke. The action accepts a single form directive,
//! `delete`, and refuses anything it cannot attribute to the joke's owner.

use std::sync::Arc;

use axum::http::HeaderMap;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::auth::SessionService;
use crate::database::{Joke, JokeStore, JokeSummary, StoreError};
use crate::error::ApiError;

/// Where a successful delete sends the browser
pub const JOKES_INDEX: &str = "/jokes";

pub mod messages {
    pub const NO_SUCH_JOKE: &str = "no such joke";
    pub const NOTHING_TO_DELETE: &str = "nothing to delete";
    pub const NOT_YOUR_JOKE: &str = "not your joke";
}

/// Loader result: the joke and whether the current visitor owns it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderData {
    pub joke: Joke,
    pub is_owner: bool,
}

/// Value of the `_method` form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormDirective {
    Delete,
    Other(String),
    Missing,
}

impl FormDirective {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => FormDirective::Missing,
            Some(value) if value.eq_ignore_ascii_case("delete") => FormDirective::Delete,
            Some(value) => FormDirective::Other(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Redirect(String),
}

/// Loader and action for `/jokes/:joke_id`, with its collaborators injected
#[derive(Clone)]
pub struct JokeResource {
    store: Arc<dyn JokeStore>,
    sessions: Arc<dyn SessionService>,
}

impl JokeResource {
    pub fn new(store: Arc<dyn JokeStore>, sessions: Arc<dyn SessionService>) -> Self {
        Self { store, sessions }
    }

    pub fn store(&self) -> &Arc<dyn JokeStore> {
        &self.store
    }

    /// Read path. Fails 404 when the joke does not exist.
    pub async fn load(&self, joke_id: &str, headers: &HeaderMap) -> Result<LoaderData, ApiError> {
        let user_id = self.sessions.get_user_id(headers).await;

        let joke = self
            .store
            .find_joke_by_id(joke_id)
            .await?
            .ok_or_else(|| ApiError::not_found(messages::NO_SUCH_JOKE))?;

        let is_owner = user_id
            .as_deref()
            .map(|user_id| joke.is_owned_by(user_id))
            .unwrap_or(false);
        debug!(joke_id, is_owner, "loaded joke");

        Ok(LoaderData { joke, is_owner })
    }

    /// Mutating path. Checks run in order: directive, session, existence,
    /// ownership. The first failing check decides the response.
    pub async fn act(
        &self,
        joke_id: &str,
        directive: FormDirective,
        headers: &HeaderMap,
    ) -> Result<ActionOutcome, ApiError> {
        match directive {
            FormDirective::Delete => self.delete(joke_id, headers).await,
            FormDirective::Other(method) => Err(ApiError::unsupported(format!(
                "unsupported form method: {}",
                method
            ))),
            FormDirective::Missing => Err(ApiError::unsupported("missing form method")),
        }
    }

    async fn delete(&self, joke_id: &str, headers: &HeaderMap) -> Result<ActionOutcome, ApiError> {
        let user_id = self.sessions.require_user_id(headers).await?;

        let joke = match self.store.find_joke_by_id(joke_id).await? {
            Some(joke) => joke,
            None => return Err(ApiError::unauthorized(messages::NOTHING_TO_DELETE)),
        };

        if !joke.is_owned_by(&user_id) {
            warn!(joke_id, user_id = %user_id, "refused delete of another jokester's joke");
            return Err(ApiError::unauthorized(messages::NOT_YOUR_JOKE));
        }

        match self.store.delete_joke_by_id(joke_id).await {
            Ok(()) => info!(joke_id, user_id = %user_id, "deleted joke"),
            // Row vanished after the lookup; the caller wanted it gone and it is
            Err(StoreError::NotFound(_)) => {
                warn!(joke_id, "joke already deleted by a concurrent request")
            }
            Err(e) => return Err(e.into()),
        }

        Ok(ActionOutcome::Redirect(JOKES_INDEX.to_string()))
    }

    /// Collection listing, newest first
    pub async fn list(&self) -> Result<Vec<JokeSummary>, ApiError> {
        let jokes = self.store.list_jokes().await?;
        Ok(jokes.iter().map(JokeSummary::from).collect())
    }
}

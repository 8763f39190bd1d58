use std::sync::Arc;

use crate::auth::SessionService;
use crate::database::JokeStore;
use crate::services::JokeResource;

/// Shared per-process dependencies handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub jokes: JokeResource,
}

impl AppState {
    pub fn new(store: Arc<dyn JokeStore>, sessions: Arc<dyn SessionService>) -> Self {
        Self {
            jokes: JokeResource::new(store, sessions),
        }
    }
}

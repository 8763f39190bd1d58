use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A joke row as persisted in the `"Joke"` table.
///
/// `jokester_id` names the user who created the joke and never changes
/// after creation; ownership checks compare against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Joke {
    pub id: String,
    pub jokester_id: String,
    pub name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Joke {
    /// Build a new joke with a fresh id, owned by `jokester_id`
    pub fn new(jokester_id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            jokester_id: jokester_id.into(),
            name: name.into(),
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Plain equality on the opaque user id
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.jokester_id == user_id
    }
}

/// Listing entry for the jokes collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JokeSummary {
    pub id: String,
    pub name: String,
}

impl From<&Joke> for JokeSummary {
    fn from(joke: &Joke) -> Self {
        Self {
            id: joke.id.clone(),
            name: joke.name.clone(),
        }
    }
}

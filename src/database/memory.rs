use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::models::Joke;
use super::store::{JokeStore, StoreError};

/// In-process joke store. Used by tests and when no database is configured.
#[derive(Clone, Default)]
pub struct MemoryJokeStore {
    jokes: Arc<RwLock<HashMap<String, Joke>>>,
}

impl MemoryJokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jokes(jokes: impl IntoIterator<Item = Joke>) -> Self {
        let map = jokes.into_iter().map(|joke| (joke.id.clone(), joke)).collect();
        Self {
            jokes: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn insert(&self, joke: Joke) {
        self.jokes.write().await.insert(joke.id.clone(), joke);
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.jokes.read().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.jokes.read().await.len()
    }
}

#[async_trait]
impl JokeStore for MemoryJokeStore {
    async fn find_joke_by_id(&self, id: &str) -> Result<Option<Joke>, StoreError> {
        Ok(self.jokes.read().await.get(id).cloned())
    }

    async fn delete_joke_by_id(&self, id: &str) -> Result<(), StoreError> {
        match self.jokes.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    async fn list_jokes(&self) -> Result<Vec<Joke>, StoreError> {
        let mut jokes: Vec<Joke> = self.jokes.read().await.values().cloned().collect();
        jokes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(jokes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn delete_missing_row_is_not_found() {
        let store = MemoryJokeStore::with_jokes([Joke::new("u1", "a", "b").with_id("j1")]);

        store.delete_joke_by_id("j1").await.unwrap();
        assert!(!store.contains("j1").await);

        let err = store.delete_joke_by_id("j1").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == "j1"));
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let mut older = Joke::new("u1", "older", "...").with_id("j1");
        older.created_at = Utc::now() - Duration::days(1);
        let newer = Joke::new("u2", "newer", "...").with_id("j2");
        let store = MemoryJokeStore::with_jokes([older, newer]);

        let ids: Vec<String> = store.list_jokes().await.unwrap().into_iter().map(|j| j.id).collect();
        assert_eq!(ids, vec!["j2", "j1"]);
    }
}

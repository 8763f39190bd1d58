use async_trait::async_trait;
use thiserror::Error;

use super::models::Joke;

/// Errors from a joke store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Joke not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    Connection(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence seam for joke records.
///
/// Each call stands alone; callers get no atomicity across a lookup and a
/// following delete.
#[async_trait]
pub trait JokeStore: Send + Sync {
    async fn find_joke_by_id(&self, id: &str) -> Result<Option<Joke>, StoreError>;

    /// Fails with [`StoreError::NotFound`] when no row has this id
    async fn delete_joke_by_id(&self, id: &str) -> Result<(), StoreError>;

    /// All jokes, newest first
    async fn list_jokes(&self) -> Result<Vec<Joke>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

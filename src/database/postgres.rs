use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::manager::DatabaseManager;
use super::models::Joke;
use super::store::{JokeStore, StoreError};

const JOKE_COLUMNS: &str = r#"id, "jokesterId", name, content, "createdAt", "updatedAt""#;

const DELETE_BY_ID: &str = r#"DELETE FROM "Joke" WHERE id = $1"#;

fn select_by_id_sql() -> String {
    format!(r#"SELECT {} FROM "Joke" WHERE id = $1"#, JOKE_COLUMNS)
}

fn select_newest_first_sql() -> String {
    format!(r#"SELECT {} FROM "Joke" ORDER BY "createdAt" DESC"#, JOKE_COLUMNS)
}

/// Joke store over the `"Joke"` table:
///
/// ```sql
/// CREATE TABLE "Joke" (
///     id          TEXT PRIMARY KEY,
///     "jokesterId" TEXT NOT NULL,
///     name        TEXT NOT NULL,
///     content     TEXT NOT NULL,
///     "createdAt" TIMESTAMPTZ NOT NULL DEFAULT now(),
///     "updatedAt" TIMESTAMPTZ NOT NULL DEFAULT now()
/// );
/// ```
#[derive(Clone)]
pub struct PgJokeStore {
    pool: PgPool,
}

impl PgJokeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JokeStore for PgJokeStore {
    async fn find_joke_by_id(&self, id: &str) -> Result<Option<Joke>, StoreError> {
        let joke = sqlx::query_as::<_, Joke>(&select_by_id_sql())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        debug!(joke_id = id, found = joke.is_some(), "joke lookup");
        Ok(joke)
    }

    async fn delete_joke_by_id(&self, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn list_jokes(&self) -> Result<Vec<Joke>, StoreError> {
        let jokes = sqlx::query_as::<_, Joke>(&select_newest_first_sql())
            .fetch_all(&self.pool)
            .await?;
        Ok(jokes)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    #[test]
    fn quotes_camel_case_columns() {
        let sql = select_by_id_sql();
        assert!(sql.contains(r#""jokesterId""#));
        assert!(sql.contains(r#""createdAt""#));
        assert!(sql.contains(r#""updatedAt""#));
        assert!(sql.ends_with("WHERE id = $1"));

        assert!(select_newest_first_sql().ends_with(r#"ORDER BY "createdAt" DESC"#));
        assert_eq!(DELETE_BY_ID, r#"DELETE FROM "Joke" WHERE id = $1"#);
    }

    /// Runs against a real database when DATABASE_URL is set, on a temp table
    /// that shadows any existing "Joke" table for this one connection.
    #[tokio::test]
    async fn round_trips_against_postgres() {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            return;
        };
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(&url)
            .await
            .expect("connect");

        sqlx::query(
            r#"CREATE TEMP TABLE "Joke" (
                id TEXT PRIMARY KEY,
                "jokesterId" TEXT NOT NULL,
                name TEXT NOT NULL,
                content TEXT NOT NULL,
                "createdAt" TIMESTAMPTZ NOT NULL DEFAULT now(),
                "updatedAt" TIMESTAMPTZ NOT NULL DEFAULT now()
            )"#,
        )
        .execute(&pool)
        .await
        .expect("create temp table");
        sqlx::query(r#"INSERT INTO "Joke" (id, "jokesterId", name, content) VALUES ('j1', 'u1', 'Pun', '...')"#)
            .execute(&pool)
            .await
            .expect("insert");

        let store = PgJokeStore::new(pool);

        let joke = store.find_joke_by_id("j1").await.unwrap().expect("j1 exists");
        assert_eq!(joke.jokester_id, "u1");
        assert_eq!(store.list_jokes().await.unwrap().len(), 1);

        store.delete_joke_by_id("j1").await.unwrap();
        assert!(store.find_joke_by_id("j1").await.unwrap().is_none());
        assert!(matches!(
            store.delete_joke_by_id("j1").await,
            Err(StoreError::NotFound(id)) if id == "j1"
        ));
    }
}

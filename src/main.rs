use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use jokes_route::auth::JwtSessionService;
use jokes_route::config::{self, AppConfig};
use jokes_route::database::{DatabaseManager, Joke, JokeStore, MemoryJokeStore, PgJokeStore};
use jokes_route::{app, is_development, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SESSION_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config();
    tracing::info!("Starting jokes route in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        bail!("SESSION_SECRET must be set outside development");
    }

    let store = joke_store(config).await?;
    let sessions = Arc::new(JwtSessionService::from_config(&config.security));
    let state = AppState::new(store, sessions);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app(state, &config.security.cors_origins))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn joke_store(config: &AppConfig) -> Result<Arc<dyn JokeStore>> {
    if config.database.url.is_some() {
        let pool = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        return Ok(Arc::new(PgJokeStore::new(pool)));
    }

    tracing::warn!("DATABASE_URL not set; using in-memory joke store");
    let store = MemoryJokeStore::new();
    if is_development!() {
        for joke in demo_jokes() {
            store.insert(joke).await;
        }
    }
    Ok(Arc::new(store))
}

fn demo_jokes() -> Vec<Joke> {
    vec![
        Joke::new(
            "kody",
            "Road worker",
            "I never wanted to believe that my Dad was stealing from his job as a road worker. But when I got home, all the signs were there.",
        ),
        Joke::new(
            "kody",
            "Frisbee",
            "I was wondering why the frisbee was getting bigger, then it hit me.",
        ),
    ]
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler keep serving until killed
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

use std::sync::Arc;

use anyhow::{Context, Result};
use jokes_route::auth::JwtSessionService;
use jokes_route::database::{Joke, MemoryJokeStore};
use jokes_route::{app, AppState};
use reqwest::redirect::Policy;

pub const SECRET: &str = "integration-test-secret";
pub const COOKIE: &str = "RJ_session";

/// Router served on a free port, backed by an in-memory store the test can inspect
pub struct TestServer {
    pub base_url: String,
    pub store: MemoryJokeStore,
    pub sessions: JwtSessionService,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Cookie header value carrying a session for `user_id`
    pub fn session_cookie(&self, user_id: &str) -> Result<String> {
        let token = self
            .sessions
            .issue_token(user_id)
            .context("failed to issue session token")?;
        Ok(format!("{}={}", COOKIE, token))
    }
}

pub async fn spawn_server(jokes: Vec<Joke>) -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let store = MemoryJokeStore::with_jokes(jokes);
    let sessions = JwtSessionService::new(SECRET, COOKIE, 1);
    let state = AppState::new(Arc::new(store.clone()), Arc::new(sessions.clone()));

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    tokio::spawn(async move {
        axum::serve(listener, app(state, &[])).await.expect("server");
    });

    // Redirects are asserted on, never followed
    let client = reqwest::Client::builder()
        .redirect(Policy::none())
        .build()?;

    Ok(TestServer {
        base_url,
        store,
        sessions,
        client,
    })
}

/// `{id: "j1", jokesterId: "u1"}`
pub fn j1() -> Joke {
    Joke::new(
        "u1",
        "Skeletons",
        "Why don't skeletons ride roller coasters? They don't have the stomach for it.",
    )
    .with_id("j1")
}

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod services;
pub mod state;

pub use app::app;
pub use state::AppState;

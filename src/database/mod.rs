pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::DatabaseManager;
pub use memory::MemoryJokeStore;
pub use models::{Joke, JokeSummary};
pub use postgres::PgJokeStore;
pub use store::{JokeStore, StoreError};

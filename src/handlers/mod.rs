// Route handlers. Each file owns one route; the service layer holds the rules.
pub mod health;
pub mod jokes;

pub use health::health;

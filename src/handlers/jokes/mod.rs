pub mod action;
pub mod index;
pub mod show;

// Re-export handler functions for use in routing
pub use action::post as joke_action;
pub use index::get as jokes_index;
pub use show::get as joke_get;

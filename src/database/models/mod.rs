pub mod joke;

pub use joke::{Joke, JokeSummary};

pub mod joke_resource;

pub use joke_resource::{messages, ActionOutcome, FormDirective, JokeResource, LoaderData, JOKES_INDEX};

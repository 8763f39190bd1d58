pub mod boundary;
pub mod response;

pub use boundary::{catch_boundary, error_boundary, JokeRouteError, JokeView, UnhandledStatus};
pub use response::{ApiResponse, ApiResult};

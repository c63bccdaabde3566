pub mod dto;
pub mod error;
pub mod handlers;
pub mod problem;
pub mod routes;

pub use problem::Problem;

/// Result type of every handler; errors render as `application/problem+json`.
pub type ApiResult<T> = Result<T, Problem>;

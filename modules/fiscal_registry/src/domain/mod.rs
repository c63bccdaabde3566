//! Domain layer - models, errors and the service orchestrating sessions.
//!
//! The domain layer:
//! - **MAY** import `infra` (data access) for the `Db` handle and repositories
//! - **MUST NOT** import `api::*` (one-way dependency: API -> Domain)

pub mod error;
pub mod models;
pub mod repo;
pub mod service;

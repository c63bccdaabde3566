//! Fiscal Registry Module
//!
//! Record keeping for companies (`empresas`) and their recurring filing
//! obligations (`obrigacoes`), exposed as create and fetch-by-id operations
//! over a relational store.
//!
//! ## Layers
//!
//! - `infra::storage` - `SeaORM` entities, schema migration, the `Db` handle
//!   with its request-scoped unit of work, and repositories
//! - `domain` - models, errors, repository traits and the `Service`
//! - `api::rest` - DTO validation, Problem responses, handlers and routes
//!
//! The server binary wires them together:
//!
//! ```ignore
//! let db = Db::connect(&url, &pool).await?;
//! db.ensure_schema().await?;
//! let service = Arc::new(AppService::with_orm(db));
//! let router = fiscal_registry::api::rest::routes::router(service);
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod domain;
pub mod infra;

pub use domain::error::DomainError;
pub use domain::models::{Company, NewCompany, NewObligation, Obligation};
pub use domain::service::{AppService, Service};
pub use infra::storage::db::{Db, DbError, PoolCfg, redact_dsn};

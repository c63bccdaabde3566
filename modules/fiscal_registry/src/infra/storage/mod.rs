//! Infrastructure storage layer - database persistence.
//!
//! This module contains all `SeaORM`-specific code:
//! - `entity/` - entity definitions for `empresas` and `obrigacoes` and their relation
//! - `migrations/` - schema creation, applied by [`db::Db::ensure_schema`]
//! - `db.rs` - connection pool, unit of work and store error classification
//! - `mapper.rs` - conversions between entity rows and domain models
//! - `sea_orm_repo.rs` - repository implementations

pub mod db;
pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod sea_orm_repo;

pub use sea_orm_repo::{OrmCompaniesRepository, OrmObligationsRepository};

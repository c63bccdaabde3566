//! Database handle and request-scoped unit of work.
//!
//! - [`Db`]: pooled connection to the backing store. Cheap to clone.
//! - [`Db::with_session`]: runs one unit of work inside a transaction.
//! - [`Db::ensure_schema`]: idempotent schema creation, run once at startup.
//!
//! # Example
//!
//! ```ignore
//! let db = Db::connect("sqlite::memory:", &PoolCfg::default()).await?;
//! db.ensure_schema().await?;
//!
//! let company = db
//!     .with_session(move |tx| Box::pin(async move { repo.create(tx, new_company).await }))
//!     .await?;
//! ```

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, DbErr, SqlErr,
    TransactionError, TransactionTrait,
};
use sea_orm_migration::MigratorTrait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::error::DomainError;
use crate::infra::storage::migrations::Migrator;

/// Errors raised while opening or preparing the store. All of them are fatal
/// to startup.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to connect to database '{dsn}': {source}")]
    Connect { dsn: String, source: DbErr },

    #[error("failed to ensure schema: {0}")]
    Schema(#[source] DbErr),

    #[error("database ping failed: {0}")]
    Ping(#[source] DbErr),
}

/// Connection pool settings. Unset values keep the driver defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolCfg {
    /// Maximum number of connections in the pool.
    pub max_conns: Option<u32>,
    /// Minimum number of idle connections kept open.
    pub min_conns: Option<u32>,
    /// Timeout to acquire a connection from the pool.
    #[serde(with = "humantime_serde")]
    pub acquire_timeout: Option<Duration>,
    /// Idle time before a connection is closed.
    #[serde(with = "humantime_serde")]
    pub idle_timeout: Option<Duration>,
}

impl PoolCfg {
    fn apply(&self, opts: &mut ConnectOptions) {
        if let Some(max) = self.max_conns {
            opts.max_connections(max);
        }
        if let Some(min) = self.min_conns {
            opts.min_connections(min);
        }
        if let Some(timeout) = self.acquire_timeout {
            opts.acquire_timeout(timeout);
        }
        if let Some(timeout) = self.idle_timeout {
            opts.idle_timeout(timeout);
        }
    }
}

/// Future returned by a unit-of-work closure.
pub type SessionFuture<'c, T> = Pin<Box<dyn Future<Output = Result<T, DomainError>> + Send + 'c>>;

/// Handle to the backing store.
#[derive(Clone, Debug)]
pub struct Db {
    conn: DatabaseConnection,
}

impl Db {
    /// Open a connection pool for `url`.
    ///
    /// # Errors
    /// Returns [`DbError::Connect`] if the store is unreachable or the URL is invalid.
    pub async fn connect(url: &str, pool: &PoolCfg) -> Result<Self, DbError> {
        let dsn = redact_dsn(url);
        tracing::info!(dsn = %dsn, "Connecting to database");

        let mut opts = ConnectOptions::new(url.to_owned());
        pool.apply(&mut opts);
        opts.sqlx_logging(false);

        let conn = Database::connect(opts)
            .await
            .map_err(|source| DbError::Connect { dsn, source })?;
        Ok(Self { conn })
    }

    /// Wrap an already opened connection.
    #[must_use]
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Create the `empresas` and `obrigacoes` tables if they do not exist.
    ///
    /// Safe to call repeatedly; already applied migrations are skipped.
    ///
    /// # Errors
    /// Returns [`DbError::Schema`] if the store rejects the DDL.
    pub async fn ensure_schema(&self) -> Result<(), DbError> {
        let pending = Migrator::get_pending_migrations(&self.conn)
            .await
            .map_err(DbError::Schema)?
            .len();

        Migrator::up(&self.conn, None).await.map_err(DbError::Schema)?;

        tracing::info!(applied = pending, "Schema is up to date");
        Ok(())
    }

    /// Check that the store answers.
    ///
    /// # Errors
    /// Returns [`DbError::Ping`] if the store does not respond.
    pub async fn ping(&self) -> Result<(), DbError> {
        self.conn.ping().await.map_err(DbError::Ping)
    }

    /// Run `f` as one unit of work.
    ///
    /// A transaction is opened on a pooled connection. It commits when `f`
    /// returns `Ok` and rolls back when `f` returns `Err`. If the future is
    /// dropped mid-flight the transaction is rolled back on drop. In every
    /// case the connection goes back to the pool.
    ///
    /// # Errors
    /// Returns the error produced by `f`, or a classified store error if the
    /// transaction cannot be opened or committed.
    pub async fn with_session<F, T>(&self, f: F) -> Result<T, DomainError>
    where
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> SessionFuture<'c, T> + Send,
        T: Send,
    {
        self.conn.transaction(f).await.map_err(|e| match e {
            TransactionError::Connection(err) => db_err(err),
            TransactionError::Transaction(err) => err,
        })
    }
}

/// Classify a store error into the domain taxonomy.
///
/// Uniqueness and foreign-key violations become
/// [`DomainError::ConstraintViolation`]; everything else is
/// [`DomainError::Database`].
#[must_use]
#[allow(clippy::needless_pass_by_value)] // called as `map_err(db_err)`
pub fn db_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(
            SqlErr::UniqueConstraintViolation(message)
            | SqlErr::ForeignKeyConstraintViolation(message),
        ) => DomainError::constraint_violation(message),
        _ => DomainError::database(e.to_string()),
    }
}

/// Replace the password of a DSN with `***` for logging.
///
/// DSNs without credentials (e.g. `sqlite::memory:`) are returned unchanged.
#[must_use]
pub fn redact_dsn(dsn: &str) -> String {
    match url::Url::parse(dsn) {
        Ok(mut parsed) if parsed.password().is_some() => {
            if parsed.set_password(Some("***")).is_ok() {
                parsed.to_string()
            } else {
                dsn.to_owned()
            }
        }
        _ => dsn.to_owned(),
    }
}

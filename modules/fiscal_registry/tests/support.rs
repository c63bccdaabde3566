#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Test support utilities for `fiscal_registry` integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use fiscal_registry::infra::storage::db::db_err;
use fiscal_registry::{AppService, Db, NewCompany, NewObligation, PoolCfg};
use sea_orm::{ConnectionTrait, Statement};

/// Fresh in-memory store with the schema applied.
///
/// A single pooled connection keeps every session on the same `SQLite`
/// memory database.
pub async fn inmem_db() -> Db {
    let db = Db::connect(
        "sqlite::memory:",
        &PoolCfg {
            max_conns: Some(1),
            min_conns: Some(1),
            ..PoolCfg::default()
        },
    )
    .await
    .expect("in-memory sqlite");
    db.ensure_schema().await.expect("schema");
    db
}

pub async fn inmem_service() -> Arc<AppService> {
    Arc::new(AppService::with_orm(inmem_db().await))
}

/// Rows currently stored in `table`.
pub async fn count_rows(db: &Db, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) AS n FROM {table}");
    let session = db.with_session(move |tx| {
        Box::pin(async move {
            let stmt = Statement::from_string(tx.get_database_backend(), sql);
            let row = tx.query_one(stmt).await.map_err(db_err)?;
            row.map_or(Ok(0), |r| r.try_get::<i64>("", "n"))
                .map_err(db_err)
        })
    });
    session.await.expect("row count")
}

#[must_use]
pub fn sample_company(tax_id: &str) -> NewCompany {
    NewCompany {
        name: "Padaria Estrela Ltda".to_owned(),
        tax_id: tax_id.to_owned(),
        address: "Rua das Flores, 100".to_owned(),
        email: "contato@estrela.com.br".to_owned(),
        phone: "11 4000-1000".to_owned(),
    }
}

#[must_use]
pub fn sample_obligation(company_id: i32) -> NewObligation {
    NewObligation {
        name: "DCTFWeb".to_owned(),
        periodicity: "mensal".to_owned(),
        company_id,
    }
}

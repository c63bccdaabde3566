#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Access-layer behaviour against a real (in-memory) store.

mod support;

use fiscal_registry::DomainError;
use support::{count_rows, inmem_db, inmem_service, sample_company, sample_obligation};

#[tokio::test]
async fn company_round_trips_with_assigned_id() {
    let svc = inmem_service().await;

    let created = svc
        .create_company(sample_company("11.111.111/0001-11"))
        .await
        .unwrap();
    assert!(created.id > 0);

    let fetched = svc.get_company(created.id).await.unwrap();
    assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn ids_are_distinct() {
    let svc = inmem_service().await;

    let a = svc.create_company(sample_company("1")).await.unwrap();
    let b = svc.create_company(sample_company("2")).await.unwrap();
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn duplicate_tax_id_is_rejected_and_first_record_survives() {
    let svc = inmem_service().await;

    let first = svc.create_company(sample_company("dup")).await.unwrap();

    let mut second = sample_company("dup");
    second.name = "Outra Empresa".to_owned();
    let err = svc.create_company(second).await.unwrap_err();
    assert!(
        matches!(err, DomainError::TaxIdAlreadyExists { ref tax_id } if tax_id == "dup"),
        "unexpected error: {err:?}"
    );
    assert!(err.is_constraint_violation());

    let still = svc.get_company(first.id).await.unwrap().unwrap();
    assert_eq!(still.name, "Padaria Estrela Ltda");
}

#[tokio::test]
async fn obligation_requires_existing_company() {
    let svc = inmem_service().await;

    let err = svc
        .create_obligation(sample_obligation(999))
        .await
        .unwrap_err();
    assert!(
        matches!(err, DomainError::UnknownCompany { company_id: 999 }),
        "unexpected error: {err:?}"
    );
    // The rejected insert must not leave an orphan row behind.
    assert_eq!(count_rows(svc.db(), "obrigacoes").await, 0);
    assert_eq!(svc.get_obligation(1).await.unwrap(), None);

    let company = svc.create_company(sample_company("1")).await.unwrap();
    let obligation = svc
        .create_obligation(sample_obligation(company.id))
        .await
        .unwrap();
    assert_eq!(
        svc.list_company_obligations(company.id).await.unwrap(),
        Some(vec![obligation])
    );
}

#[tokio::test]
async fn absent_ids_are_none() {
    let svc = inmem_service().await;

    assert_eq!(svc.get_company(42).await.unwrap(), None);
    assert_eq!(svc.get_obligation(42).await.unwrap(), None);
    assert_eq!(svc.list_company_obligations(42).await.unwrap(), None);
    assert_eq!(svc.get_obligation_company(42).await.unwrap(), None);
}

#[tokio::test]
async fn relationships_navigate_both_ways() {
    let svc = inmem_service().await;

    let acme = svc.create_company(sample_company("acme")).await.unwrap();
    let other = svc.create_company(sample_company("other")).await.unwrap();

    let das = svc
        .create_obligation(sample_obligation(acme.id))
        .await
        .unwrap();
    let mut annual = sample_obligation(acme.id);
    annual.name = "ECF".to_owned();
    annual.periodicity = "anual".to_owned();
    let ecf = svc.create_obligation(annual).await.unwrap();

    let mut listed = svc
        .list_company_obligations(acme.id)
        .await
        .unwrap()
        .unwrap();
    listed.sort_by_key(|o| o.id);
    assert_eq!(listed, vec![das.clone(), ecf]);

    assert_eq!(
        svc.list_company_obligations(other.id).await.unwrap(),
        Some(Vec::new())
    );

    assert_eq!(
        svc.get_obligation_company(das.id).await.unwrap(),
        Some(acme)
    );
}

#[tokio::test]
async fn ensure_schema_is_idempotent() {
    let db = inmem_db().await;
    db.ensure_schema().await.unwrap();
    db.ensure_schema().await.unwrap();
    db.ping().await.unwrap();
}

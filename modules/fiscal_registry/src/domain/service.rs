//! Domain service - one unit of work per operation.
//!
//! Every public method opens exactly one session through [`Db::with_session`]:
//! commit on success, rollback on error, connection released on every exit
//! path. Store constraint failures surface unchanged; nothing is retried.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::error::DomainError;
use crate::domain::models::{Company, NewCompany, NewObligation, Obligation};
use crate::domain::repo::{CompaniesRepository, ObligationsRepository};
use crate::infra::storage::db::Db;
use crate::infra::storage::sea_orm_repo::{OrmCompaniesRepository, OrmObligationsRepository};

/// Service wired with the `SeaORM` repositories, as used by the REST layer.
pub type AppService = Service<OrmCompaniesRepository, OrmObligationsRepository>;

pub struct Service<CR, OR> {
    db: Db,
    companies: Arc<CR>,
    obligations: Arc<OR>,
}

impl AppService {
    #[must_use]
    pub fn with_orm(db: Db) -> Self {
        Self::new(db, OrmCompaniesRepository, OrmObligationsRepository)
    }
}

impl<CR, OR> Service<CR, OR>
where
    CR: CompaniesRepository + 'static,
    OR: ObligationsRepository + 'static,
{
    #[must_use]
    pub fn new(db: Db, companies: CR, obligations: OR) -> Self {
        Self {
            db,
            companies: Arc::new(companies),
            obligations: Arc::new(obligations),
        }
    }

    #[must_use]
    pub fn db(&self) -> &Db {
        &self.db
    }

    // ==================== Company Operations ====================

    /// # Errors
    /// [`DomainError::TaxIdAlreadyExists`] when the tax id is taken, or
    /// [`DomainError::Database`] on any other store failure.
    #[instrument(skip(self, new_company), fields(tax_id = %new_company.tax_id))]
    pub async fn create_company(&self, new_company: NewCompany) -> Result<Company, DomainError> {
        info!("Creating company");

        let repo = Arc::clone(&self.companies);
        let company = self
            .db
            .with_session(move |tx| Box::pin(async move { repo.create(tx, new_company).await }))
            .await?;

        info!(company_id = company.id, "Successfully created company");
        Ok(company)
    }

    /// Absence is `Ok(None)`; the caller decides how to report it.
    ///
    /// # Errors
    /// [`DomainError::Database`] if the lookup fails.
    #[instrument(skip(self))]
    pub async fn get_company(&self, id: i32) -> Result<Option<Company>, DomainError> {
        debug!("Getting company by id");

        let repo = Arc::clone(&self.companies);
        self.db
            .with_session(move |tx| Box::pin(async move { repo.get(tx, id).await }))
            .await
    }

    /// # Errors
    /// [`DomainError::Database`] if the lookup fails.
    #[instrument(skip(self))]
    pub async fn list_company_obligations(
        &self,
        company_id: i32,
    ) -> Result<Option<Vec<Obligation>>, DomainError> {
        debug!("Listing obligations of company");

        let repo = Arc::clone(&self.obligations);
        self.db
            .with_session(move |tx| {
                Box::pin(async move { repo.list_by_company(tx, company_id).await })
            })
            .await
    }

    // ==================== Obligation Operations ====================

    /// # Errors
    /// [`DomainError::UnknownCompany`] when `company_id` references nothing,
    /// or [`DomainError::Database`] on any other store failure.
    #[instrument(skip(self, new_obligation), fields(company_id = new_obligation.company_id))]
    pub async fn create_obligation(
        &self,
        new_obligation: NewObligation,
    ) -> Result<Obligation, DomainError> {
        info!("Creating obligation");

        let repo = Arc::clone(&self.obligations);
        let obligation = self
            .db
            .with_session(move |tx| {
                Box::pin(async move { repo.create(tx, new_obligation).await })
            })
            .await?;

        info!(obligation_id = obligation.id, "Successfully created obligation");
        Ok(obligation)
    }

    /// # Errors
    /// [`DomainError::Database`] if the lookup fails.
    #[instrument(skip(self))]
    pub async fn get_obligation(&self, id: i32) -> Result<Option<Obligation>, DomainError> {
        debug!("Getting obligation by id");

        let repo = Arc::clone(&self.obligations);
        self.db
            .with_session(move |tx| Box::pin(async move { repo.get(tx, id).await }))
            .await
    }

    /// # Errors
    /// [`DomainError::Database`] if the lookup fails.
    #[instrument(skip(self))]
    pub async fn get_obligation_company(
        &self,
        obligation_id: i32,
    ) -> Result<Option<Company>, DomainError> {
        debug!("Resolving owner company of obligation");

        let repo = Arc::clone(&self.obligations);
        self.db
            .with_session(move |tx| Box::pin(async move { repo.owner(tx, obligation_id).await }))
            .await
    }
}

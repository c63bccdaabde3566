use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use crate::domain::error::DomainError;
use crate::domain::models::{Company, NewCompany, NewObligation, Obligation};

/// Repository trait for company persistence.
///
/// All methods accept a generic connection (`DatabaseConnection` or
/// `DatabaseTransaction`) so they run inside the caller's session.
#[async_trait]
pub trait CompaniesRepository: Send + Sync {
    /// Find a company by primary key.
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Company>, DomainError>;

    /// Insert a company and return it with its assigned id.
    async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        new_company: NewCompany,
    ) -> Result<Company, DomainError>;
}

/// Repository trait for filing obligation persistence.
#[async_trait]
pub trait ObligationsRepository: Send + Sync {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Obligation>, DomainError>;

    /// Insert an obligation. An unknown `company_id` surfaces as
    /// [`DomainError::UnknownCompany`].
    async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        new_obligation: NewObligation,
    ) -> Result<Obligation, DomainError>;

    /// Obligations owned by a company, `None` when the company does not exist.
    async fn list_by_company<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        company_id: i32,
    ) -> Result<Option<Vec<Obligation>>, DomainError>;

    /// The company an obligation belongs to, `None` when the obligation does not exist.
    async fn owner<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        obligation_id: i32,
    ) -> Result<Option<Company>, DomainError>;
}

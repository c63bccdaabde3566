use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, NotSet, QueryFilter,
    Set, SqlErr,
};

use crate::domain::error::DomainError;
use crate::domain::models::{Company, NewCompany, NewObligation, Obligation};
use crate::domain::repo::{CompaniesRepository, ObligationsRepository};
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::company::{ActiveModel as CompanyAM, Entity as CompanyEntity};
use crate::infra::storage::entity::obligation::{
    ActiveModel as ObligationAM, Column as ObligationColumn, Entity as ObligationEntity,
};

/// ORM-based implementation of the `CompaniesRepository` trait.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrmCompaniesRepository;

#[async_trait]
impl CompaniesRepository for OrmCompaniesRepository {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Company>, DomainError> {
        let found = CompanyEntity::find_by_id(id)
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        new_company: NewCompany,
    ) -> Result<Company, DomainError> {
        let NewCompany {
            name,
            tax_id,
            address,
            email,
            phone,
        } = new_company;

        let m = CompanyAM {
            id: NotSet,
            nome: Set(name),
            cnpj: Set(tax_id.clone()),
            endereco: Set(address),
            email: Set(email),
            telefone: Set(phone),
        };

        let inserted = m.insert(conn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                DomainError::tax_id_already_exists(tax_id)
            }
            _ => db_err(e),
        })?;
        Ok(inserted.into())
    }
}

/// ORM-based implementation of the `ObligationsRepository` trait.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrmObligationsRepository;

#[async_trait]
impl ObligationsRepository for OrmObligationsRepository {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Obligation>, DomainError> {
        let found = ObligationEntity::find_by_id(id)
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        new_obligation: NewObligation,
    ) -> Result<Obligation, DomainError> {
        let company_id = new_obligation.company_id;

        let m = ObligationAM {
            id: NotSet,
            nome: Set(new_obligation.name),
            periodicidade: Set(new_obligation.periodicity),
            empresa_id: Set(company_id),
        };

        let inserted = m.insert(conn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                DomainError::unknown_company(company_id)
            }
            _ => db_err(e),
        })?;
        Ok(inserted.into())
    }

    async fn list_by_company<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        company_id: i32,
    ) -> Result<Option<Vec<Obligation>>, DomainError> {
        let Some(company) = CompanyEntity::find_by_id(company_id)
            .one(conn)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let rows = company
            .find_related(ObligationEntity)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(Some(rows.into_iter().map(Into::into).collect()))
    }

    async fn owner<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        obligation_id: i32,
    ) -> Result<Option<Company>, DomainError> {
        let found = CompanyEntity::find()
            .inner_join(ObligationEntity)
            .filter(ObligationColumn::Id.eq(obligation_id))
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }
}

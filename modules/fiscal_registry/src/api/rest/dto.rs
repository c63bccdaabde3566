use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::domain::error::{DomainError, FieldViolation};
use crate::domain::models::{Company, NewCompany, NewObligation, Obligation};

/// Request body of `POST /empresas/`.
///
/// Missing text fields deserialize to `""` so they are reported by the
/// validator together with every other violation.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateEmpresaReq {
    #[serde(alias = "name")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub nome: String,
    #[serde(alias = "tax_id")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub cnpj: String,
    #[serde(alias = "address")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub endereco: String,
    #[validate(email(message = "invalid email"))]
    pub email: String,
    #[serde(alias = "phone")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub telefone: String,
}

impl CreateEmpresaReq {
    /// Validate the body and convert it into a domain insert.
    ///
    /// # Errors
    /// [`DomainError::Validation`] listing every rejected field.
    pub fn into_new_company(self) -> Result<NewCompany, DomainError> {
        self.validate().map_err(|e| to_domain(&e))?;
        Ok(NewCompany {
            name: self.nome,
            tax_id: self.cnpj,
            address: self.endereco,
            email: self.email,
            phone: self.telefone,
        })
    }
}

/// Request body of `POST /obrigacoes/`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateObrigacaoReq {
    #[serde(alias = "name")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub nome: String,
    /// Free text such as `mensal` or `anual`.
    #[serde(alias = "periodicity")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub periodicidade: String,
    #[serde(alias = "company_id")]
    #[validate(required(message = "field required"))]
    pub empresa_id: Option<i32>,
}

impl CreateObrigacaoReq {
    /// # Errors
    /// [`DomainError::Validation`] listing every rejected field.
    pub fn into_new_obligation(self) -> Result<NewObligation, DomainError> {
        self.validate().map_err(|e| to_domain(&e))?;
        let Some(company_id) = self.empresa_id else {
            return Err(DomainError::invalid_field("empresa_id", "field required"));
        };
        Ok(NewObligation {
            name: self.nome,
            periodicity: self.periodicidade,
            company_id,
        })
    }
}

fn to_domain(errors: &ValidationErrors) -> DomainError {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_owned();
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map_or_else(|| err.code.to_string(), ToString::to_string);
                FieldViolation::new(field.clone(), message)
            })
        })
        .collect();
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    DomainError::validation(violations)
}

/// A stored company as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmpresaDto {
    pub id: i32,
    pub nome: String,
    pub cnpj: String,
    pub endereco: String,
    pub email: String,
    pub telefone: String,
}

impl From<Company> for EmpresaDto {
    fn from(c: Company) -> Self {
        Self {
            id: c.id,
            nome: c.name,
            cnpj: c.tax_id,
            endereco: c.address,
            email: c.email,
            telefone: c.phone,
        }
    }
}

/// A stored filing obligation as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ObrigacaoDto {
    pub id: i32,
    pub nome: String,
    pub periodicidade: String,
    pub empresa_id: i32,
}

impl From<Obligation> for ObrigacaoDto {
    fn from(o: Obligation) -> Self {
        Self {
            id: o.id,
            nome: o.name,
            periodicidade: o.periodicity,
            empresa_id: o.company_id,
        }
    }
}

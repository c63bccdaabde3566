use thiserror::Error;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed: {}", summarize(.violations))]
    Validation { violations: Vec<FieldViolation> },

    #[error("Company with tax id '{tax_id}' already exists")]
    TaxIdAlreadyExists { tax_id: String },

    #[error("Company {company_id} does not exist")]
    UnknownCompany { company_id: i32 },

    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    #[error("Company not found: {id}")]
    CompanyNotFound { id: i32 },

    #[error("Obligation not found: {id}")]
    ObligationNotFound { id: i32 },

    #[error("Database error: {message}")]
    Database { message: String },
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl DomainError {
    #[must_use]
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::Validation { violations }
    }

    #[must_use]
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            violations: vec![FieldViolation::new(field, message)],
        }
    }

    #[must_use]
    pub fn tax_id_already_exists(tax_id: impl Into<String>) -> Self {
        Self::TaxIdAlreadyExists {
            tax_id: tax_id.into(),
        }
    }

    #[must_use]
    pub fn unknown_company(company_id: i32) -> Self {
        Self::UnknownCompany { company_id }
    }

    #[must_use]
    pub fn constraint_violation(message: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn company_not_found(id: i32) -> Self {
        Self::CompanyNotFound { id }
    }

    #[must_use]
    pub fn obligation_not_found(id: i32) -> Self {
        Self::ObligationNotFound { id }
    }

    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Store-enforced uniqueness or referential rule rejected the write.
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::TaxIdAlreadyExists { .. }
                | Self::UnknownCompany { .. }
                | Self::ConstraintViolation { .. }
        )
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_every_field() {
        let err = DomainError::validation(vec![
            FieldViolation::new("email", "invalid email"),
            FieldViolation::new("nome", "must not be empty"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: email: invalid email; nome: must not be empty"
        );
    }

    #[test]
    fn categories() {
        assert!(DomainError::tax_id_already_exists("1").is_constraint_violation());
        assert!(DomainError::unknown_company(7).is_constraint_violation());
        assert!(!DomainError::company_not_found(1).is_constraint_violation());
        assert!(!DomainError::database("boom").is_constraint_violation());
        assert!(!DomainError::invalid_field("nome", "x").is_constraint_violation());
    }
}

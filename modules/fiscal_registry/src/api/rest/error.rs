use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;

use crate::api::rest::problem::{Problem, ValidationViolation};
use crate::domain::error::DomainError;

const COMPANY_NOT_FOUND: &str = "Empresa n\u{e3}o encontrada";
const OBLIGATION_NOT_FOUND: &str = "Obriga\u{e7}\u{e3}o n\u{e3}o encontrada";

/// Map a domain error onto an RFC 9457 Problem for the request at `instance`.
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let (status, code, title, detail) = match e {
        DomainError::Validation { violations } => {
            let errors = violations
                .iter()
                .map(|v| ValidationViolation {
                    field: v.field.clone(),
                    message: v.message.clone(),
                })
                .collect();
            let title = "Validation failed";
            return Problem::new(StatusCode::UNPROCESSABLE_ENTITY, title, e.to_string())
                .with_type("https://errors.fiscal-registry.dev/validation_error")
                .with_code("validation_error")
                .with_instance(instance)
                .with_errors(errors);
        }
        DomainError::TaxIdAlreadyExists { .. } => (
            StatusCode::CONFLICT,
            "cnpj_already_exists",
            "Conflict",
            e.to_string(),
        ),
        DomainError::UnknownCompany { .. } => (
            StatusCode::CONFLICT,
            "empresa_unknown",
            "Conflict",
            e.to_string(),
        ),
        DomainError::ConstraintViolation { .. } => (
            StatusCode::CONFLICT,
            "constraint_violation",
            "Conflict",
            e.to_string(),
        ),
        DomainError::CompanyNotFound { .. } => (
            StatusCode::NOT_FOUND,
            "empresa_not_found",
            "Not Found",
            COMPANY_NOT_FOUND.to_owned(),
        ),
        DomainError::ObligationNotFound { .. } => (
            StatusCode::NOT_FOUND,
            "obrigacao_not_found",
            "Not Found",
            OBLIGATION_NOT_FOUND.to_owned(),
        ),
        DomainError::Database { .. } => {
            tracing::error!(error = %e, "Database error occurred");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                "Internal Server Error",
                "An internal error occurred".to_owned(),
            )
        }
    };

    Problem::new(status, title, detail)
        .with_type(format!("https://errors.fiscal-registry.dev/{code}"))
        .with_code(code)
        .with_instance(instance)
}

/// A request body the JSON extractor refused (bad syntax, wrong content
/// type or wrongly typed fields).
pub fn json_rejection_to_problem(rejection: &JsonRejection, instance: &str) -> Problem {
    Problem::new(
        rejection.status(),
        "Invalid request body",
        rejection.body_text(),
    )
    .with_code("invalid_body")
    .with_instance(instance)
}

/// A path segment that does not parse as an integer id.
pub fn path_rejection_to_problem(rejection: &PathRejection, instance: &str) -> Problem {
    Problem::new(
        rejection.status(),
        "Invalid path parameter",
        rejection.body_text(),
    )
    .with_code("invalid_path")
    .with_instance(instance)
}

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Extension, Path};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::api::rest::ApiResult;
use crate::api::rest::dto::{CreateEmpresaReq, CreateObrigacaoReq, EmpresaDto, ObrigacaoDto};
use crate::api::rest::error::{
    domain_error_to_problem, json_rejection_to_problem, path_rejection_to_problem,
};
use crate::api::rest::problem::Problem;
use crate::domain::error::DomainError;
use crate::domain::service::AppService;

/// Body of `GET /health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_owned(),
        }
    }
}

/// Create a company.
///
/// # Errors
/// A `Problem` with 422 for an invalid body, 409 when the `cnpj` is already
/// registered and 500 when the store fails.
#[utoipa::path(
    post,
    path = "/empresas/",
    tag = "empresas",
    request_body = CreateEmpresaReq,
    responses(
        (status = 200, description = "Company created", body = EmpresaDto),
        (status = 409, description = "Tax id already registered", body = Problem),
        (status = 422, description = "Invalid body", body = Problem),
    )
)]
pub async fn create_empresa(
    Extension(svc): Extension<Arc<AppService>>,
    uri: Uri,
    body: Result<Json<CreateEmpresaReq>, JsonRejection>,
) -> ApiResult<Json<EmpresaDto>> {
    let instance = uri.path();
    let Json(req) = body.map_err(|r| json_rejection_to_problem(&r, instance))?;
    let new_company = req
        .into_new_company()
        .map_err(|e| domain_error_to_problem(&e, instance))?;

    let company = svc
        .create_company(new_company)
        .await
        .map_err(|e| domain_error_to_problem(&e, instance))?;
    Ok(Json(company.into()))
}

/// Fetch a company by id.
///
/// # Errors
/// A `Problem` with 400 for a non-numeric id and 404 when no company has
/// that id.
#[utoipa::path(
    get,
    path = "/empresas/{id}",
    tag = "empresas",
    params(("id" = i32, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company found", body = EmpresaDto),
        (status = 404, description = "Company not found", body = Problem),
    )
)]
pub async fn get_empresa(
    Extension(svc): Extension<Arc<AppService>>,
    uri: Uri,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<EmpresaDto>> {
    let instance = uri.path();
    let Path(id) = id.map_err(|r| path_rejection_to_problem(&r, instance))?;

    match svc.get_company(id).await {
        Ok(Some(company)) => Ok(Json(company.into())),
        Ok(None) => Err(domain_error_to_problem(&DomainError::company_not_found(id), instance)),
        Err(e) => Err(domain_error_to_problem(&e, instance)),
    }
}

/// Create a filing obligation for an existing company.
///
/// # Errors
/// A `Problem` with 422 for an invalid body and 409 when `empresa_id` does
/// not reference a stored company.
#[utoipa::path(
    post,
    path = "/obrigacoes/",
    tag = "obrigacoes",
    request_body = CreateObrigacaoReq,
    responses(
        (status = 200, description = "Obligation created", body = ObrigacaoDto),
        (status = 409, description = "Referenced company does not exist", body = Problem),
        (status = 422, description = "Invalid body", body = Problem),
    )
)]
pub async fn create_obrigacao(
    Extension(svc): Extension<Arc<AppService>>,
    uri: Uri,
    body: Result<Json<CreateObrigacaoReq>, JsonRejection>,
) -> ApiResult<Json<ObrigacaoDto>> {
    let instance = uri.path();
    let Json(req) = body.map_err(|r| json_rejection_to_problem(&r, instance))?;
    let new_obligation = req
        .into_new_obligation()
        .map_err(|e| domain_error_to_problem(&e, instance))?;

    let obligation = svc
        .create_obligation(new_obligation)
        .await
        .map_err(|e| domain_error_to_problem(&e, instance))?;
    Ok(Json(obligation.into()))
}

/// Fetch a filing obligation by id.
///
/// # Errors
/// A `Problem` with 400 for a non-numeric id and 404 when no obligation
/// has that id.
#[utoipa::path(
    get,
    path = "/obrigacoes/{id}",
    tag = "obrigacoes",
    params(("id" = i32, Path, description = "Obligation id")),
    responses(
        (status = 200, description = "Obligation found", body = ObrigacaoDto),
        (status = 404, description = "Obligation not found", body = Problem),
    )
)]
pub async fn get_obrigacao(
    Extension(svc): Extension<Arc<AppService>>,
    uri: Uri,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<ObrigacaoDto>> {
    let instance = uri.path();
    let Path(id) = id.map_err(|r| path_rejection_to_problem(&r, instance))?;

    match svc.get_obligation(id).await {
        Ok(Some(obligation)) => Ok(Json(obligation.into())),
        Ok(None) => Err(domain_error_to_problem(&DomainError::obligation_not_found(id), instance)),
        Err(e) => Err(domain_error_to_problem(&e, instance)),
    }
}

/// Liveness of the service and its store.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Store reachable", body = HealthStatus),
        (status = 503, description = "Store unreachable", body = HealthStatus),
    )
)]
pub async fn health(Extension(svc): Extension<Arc<AppService>>) -> Response {
    match svc.db().ping().await {
        Ok(()) => Json(HealthStatus::new("ok")).into_response(),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus::new("unavailable")),
            )
                .into_response()
        }
    }
}

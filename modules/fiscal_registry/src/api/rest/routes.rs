use std::sync::Arc;

use axum::extract::Extension;
use axum::routing::{get, post};
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::api::rest::dto::{CreateEmpresaReq, CreateObrigacaoReq, EmpresaDto, ObrigacaoDto};
use crate::api::rest::handlers;
use crate::api::rest::problem::{Problem, ValidationViolation};
use crate::domain::service::AppService;

#[derive(OpenApi)]
#[openapi(
    info(title = "Fiscal Registry", description = "Companies and their filing obligations"),
    paths(
        handlers::create_empresa,
        handlers::get_empresa,
        handlers::create_obrigacao,
        handlers::get_obrigacao,
        handlers::health,
    ),
    components(schemas(
        CreateEmpresaReq,
        CreateObrigacaoReq,
        EmpresaDto,
        ObrigacaoDto,
        Problem,
        ValidationViolation,
        handlers::HealthStatus,
    )),
    tags(
        (name = "empresas", description = "Company records"),
        (name = "obrigacoes", description = "Filing obligations"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Build the HTTP router over `service`.
pub fn router(service: Arc<AppService>) -> Router {
    Router::new()
        .route("/empresas/", post(handlers::create_empresa))
        .route("/empresas/{id}", get(handlers::get_empresa))
        .route("/obrigacoes/", post(handlers::create_obrigacao))
        .route("/obrigacoes/{id}", get(handlers::get_obrigacao))
        .route("/health", get(handlers::health))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .layer(Extension(service))
}

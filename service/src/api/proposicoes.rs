use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    Json,
};
use mc_model::{PaginatedResponse, Proposicao, ProposicaoCategoria, SingleResponse};

use super::error::ApiError;
use super::params::{
    ano_filter, non_empty, page_request, parse_id, ApiQuery, PageParams, ProposicoesParams,
};
use crate::catalog::{Catalog, ProposicaoFilter};

const NOT_FOUND: &str = "Proposição não encontrada";

/// List propositions
///
/// # Errors
///
/// Returns 400 when `ano` is present and not an integer.
#[utoipa::path(
    get,
    path = "/proposicoes",
    tag = "Proposições",
    params(ProposicoesParams),
    responses(
        (status = 200, description = "Page of propositions", body = PaginatedResponse<Proposicao>),
        (status = 400, description = "Invalid `ano`", body = mc_model::ErrorResponse)
    )
)]
#[allow(clippy::unused_async)]
pub async fn list_proposicoes(
    Extension(catalog): Extension<Arc<Catalog>>,
    ApiQuery(params): ApiQuery<ProposicoesParams>,
) -> Result<Json<PaginatedResponse<Proposicao>>, ApiError> {
    let filter = ProposicaoFilter {
        tipo: non_empty(params.tipo.as_ref()),
        ano: ano_filter(params.ano.as_deref())?,
    };
    let page = page_request(params.page.as_deref(), params.per_page.as_deref());
    Ok(Json(catalog.proposicoes(&filter, page)))
}

/// Get a proposition
///
/// # Errors
///
/// Returns 400 for a malformed id and 404 for an unknown one.
#[utoipa::path(
    get,
    path = "/proposicoes/{id}",
    tag = "Proposições",
    params(("id" = String, Path, description = "Proposition id")),
    responses(
        (status = 200, description = "The proposition", body = SingleResponse<Proposicao>),
        (status = 400, description = "Malformed id", body = mc_model::ErrorResponse),
        (status = 404, description = "Unknown proposition", body = mc_model::ErrorResponse)
    )
)]
#[allow(clippy::unused_async)]
pub async fn get_proposicao(
    Extension(catalog): Extension<Arc<Catalog>>,
    Path(id): Path<String>,
) -> Result<Json<SingleResponse<Proposicao>>, ApiError> {
    let id = parse_id(&id)?;
    let proposicao = catalog
        .proposicao(id)
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;
    Ok(Json(SingleResponse {
        data: proposicao.clone(),
    }))
}

/// List a proposition's civic categories
///
/// # Errors
///
/// Returns 400 for a malformed id and 404 for an unknown proposition.
#[utoipa::path(
    get,
    path = "/proposicoes/{id}/categorias",
    tag = "Proposições",
    params(("id" = String, Path, description = "Proposition id"), PageParams),
    responses(
        (status = 200, description = "Page of classifications", body = PaginatedResponse<ProposicaoCategoria>),
        (status = 400, description = "Malformed id", body = mc_model::ErrorResponse),
        (status = 404, description = "Unknown proposition", body = mc_model::ErrorResponse)
    )
)]
#[allow(clippy::unused_async)]
pub async fn list_proposicao_categorias(
    Extension(catalog): Extension<Arc<Catalog>>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<PaginatedResponse<ProposicaoCategoria>>, ApiError> {
    let id = parse_id(&id)?;
    catalog
        .proposicao_categorias(id, params.page_request())
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))
}

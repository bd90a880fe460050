use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    Json,
};
use mc_model::{Orientacao, PaginatedResponse, SingleResponse, Votacao, VotacaoProposicao, Voto};

use super::error::ApiError;
use super::params::{
    bool_filter, non_empty, page_request, parse_id, ApiQuery, PageParams, VotacoesParams,
    VotosParams,
};
use crate::catalog::{Catalog, PageRequest, VotacaoFilter};

pub const NOT_FOUND: &str = "Votação não encontrada";

fn not_found() -> ApiError {
    ApiError::NotFound(NOT_FOUND.into())
}

/// List vote sessions
#[utoipa::path(
    get,
    path = "/votacoes",
    tag = "Votações",
    params(VotacoesParams),
    responses(
        (status = 200, description = "Page of vote sessions", body = PaginatedResponse<Votacao>)
    )
)]
#[allow(clippy::unused_async)]
pub async fn list_votacoes(
    Extension(catalog): Extension<Arc<Catalog>>,
    ApiQuery(params): ApiQuery<VotacoesParams>,
) -> Json<PaginatedResponse<Votacao>> {
    let filter = VotacaoFilter {
        sigla_orgao: non_empty(params.sigla_orgao.as_ref()),
        eh_nominal: bool_filter(params.eh_nominal.as_deref()),
    };
    let page = page_request(params.page.as_deref(), params.per_page.as_deref());
    Json(catalog.votacoes(&filter, page))
}

/// Get a vote session
///
/// # Errors
///
/// Returns 400 for a malformed id and 404 for an unknown one.
#[utoipa::path(
    get,
    path = "/votacoes/{id}",
    tag = "Votações",
    params(("id" = String, Path, description = "Vote session id")),
    responses(
        (status = 200, description = "The vote session", body = SingleResponse<Votacao>),
        (status = 400, description = "Malformed id", body = mc_model::ErrorResponse),
        (status = 404, description = "Unknown vote session", body = mc_model::ErrorResponse)
    )
)]
#[allow(clippy::unused_async)]
pub async fn get_votacao(
    Extension(catalog): Extension<Arc<Catalog>>,
    Path(id): Path<String>,
) -> Result<Json<SingleResponse<Votacao>>, ApiError> {
    let id = parse_id(&id)?;
    let votacao = catalog.votacao(id).ok_or_else(not_found)?;
    Ok(Json(SingleResponse {
        data: votacao.clone(),
    }))
}

/// List propositions decided in a vote session
///
/// # Errors
///
/// Returns 400 for a malformed id and 404 for an unknown session.
#[utoipa::path(
    get,
    path = "/votacoes/{id}/proposicoes",
    tag = "Votações",
    params(("id" = String, Path, description = "Vote session id"), PageParams),
    responses(
        (status = 200, description = "Page of linked propositions", body = PaginatedResponse<VotacaoProposicao>),
        (status = 400, description = "Malformed id", body = mc_model::ErrorResponse),
        (status = 404, description = "Unknown vote session", body = mc_model::ErrorResponse)
    )
)]
#[allow(clippy::unused_async)]
pub async fn list_votacao_proposicoes(
    Extension(catalog): Extension<Arc<Catalog>>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<PaginatedResponse<VotacaoProposicao>>, ApiError> {
    let id = parse_id(&id)?;
    catalog
        .votacao_proposicoes(id, params.page_request())
        .map(Json)
        .ok_or_else(not_found)
}

/// List party orientations for a vote session
///
/// # Errors
///
/// Returns 400 for a malformed id and 404 for an unknown session.
#[utoipa::path(
    get,
    path = "/votacoes/{id}/orientacoes",
    tag = "Votações",
    params(("id" = String, Path, description = "Vote session id"), PageParams),
    responses(
        (status = 200, description = "Page of orientations", body = PaginatedResponse<Orientacao>),
        (status = 400, description = "Malformed id", body = mc_model::ErrorResponse),
        (status = 404, description = "Unknown vote session", body = mc_model::ErrorResponse)
    )
)]
#[allow(clippy::unused_async)]
pub async fn list_orientacoes(
    Extension(catalog): Extension<Arc<Catalog>>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<PaginatedResponse<Orientacao>>, ApiError> {
    let id = parse_id(&id)?;
    catalog
        .orientacoes(id, params.page_request())
        .map(Json)
        .ok_or_else(not_found)
}

fn votos_of(
    catalog: &Catalog,
    raw_id: &str,
    page: PageRequest,
) -> Result<PaginatedResponse<Voto>, ApiError> {
    let id = parse_id(raw_id)?;
    catalog.votos_page(id, page).ok_or_else(not_found)
}

/// List individual votes of a vote session
///
/// # Errors
///
/// Returns 400 for a malformed id and 404 for an unknown session.
#[utoipa::path(
    get,
    path = "/votacoes/{id}/votos",
    tag = "Votações",
    params(("id" = String, Path, description = "Vote session id"), PageParams),
    responses(
        (status = 200, description = "Page of votes with nested deputy", body = PaginatedResponse<Voto>),
        (status = 400, description = "Malformed id", body = mc_model::ErrorResponse),
        (status = 404, description = "Unknown vote session", body = mc_model::ErrorResponse)
    )
)]
#[allow(clippy::unused_async)]
pub async fn list_votacao_votos(
    Extension(catalog): Extension<Arc<Catalog>>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<PaginatedResponse<Voto>>, ApiError> {
    votos_of(&catalog, &id, params.page_request()).map(Json)
}

/// List individual votes filtered by vote session
///
/// Same data as `/votacoes/{id}/votos`.
///
/// # Errors
///
/// Returns 400 when `votacao_id` is missing or malformed and 404 for an
/// unknown session.
#[utoipa::path(
    get,
    path = "/votos",
    tag = "Votações",
    params(VotosParams),
    responses(
        (status = 200, description = "Page of votes with nested deputy", body = PaginatedResponse<Voto>),
        (status = 400, description = "Missing or malformed votacao_id", body = mc_model::ErrorResponse),
        (status = 404, description = "Unknown vote session", body = mc_model::ErrorResponse)
    )
)]
#[allow(clippy::unused_async)]
pub async fn list_votos(
    Extension(catalog): Extension<Arc<Catalog>>,
    ApiQuery(params): ApiQuery<VotosParams>,
) -> Result<Json<PaginatedResponse<Voto>>, ApiError> {
    let raw_id = non_empty(params.votacao_id.as_ref()).ok_or_else(|| {
        ApiError::Validation("Parâmetro 'votacao_id' é obrigatório".into())
    })?;
    let page = page_request(params.page.as_deref(), params.per_page.as_deref());
    votos_of(&catalog, &raw_id, page).map(Json)
}

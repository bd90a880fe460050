//! REST handlers mounted under `/api/v1` and their `OpenAPI` document.
//!
//! Every handler reads from the shared [`Catalog`] extension. Collections
//! answer `{ data, pagination }`, single resources `{ data }`, and failures
//! `{ error: { code, message } }`.

// The OpenApi derive macro generates code that triggers this lint
#![allow(clippy::needless_for_each)]

pub mod deputados;
pub mod error;
pub mod params;
pub mod proposicoes;
pub mod votacoes;

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::get,
    Json, Router,
};
use mc_model::{
    CategoriaCivica, Deputado, ErrorBody, ErrorCode, ErrorResponse, Orientacao,
    OrigemClassificacao, PaginatedResponse, PaginationMeta, Placar, Proposicao,
    ProposicaoCategoria, ResultadoVotacao, TipoProposicao, TipoVoto, Votacao, VotacaoProposicao,
    Voto,
};
use utoipa::OpenApi;

use crate::build_info::BuildInfo;
use crate::catalog::Catalog;
pub use error::ApiError;
use params::{ApiQuery, PageParams};

/// `OpenAPI` documentation for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Memória Cívica API",
        version = "1.0.0",
        description = "Votações, deputados e proposições da Câmara dos Deputados",
        license(name = "MIT")
    ),
    servers(
        (url = "/api/v1", description = "REST API v1")
    ),
    paths(
        get_build_info,
        deputados::list_deputados,
        deputados::get_deputado,
        proposicoes::list_proposicoes,
        proposicoes::get_proposicao,
        proposicoes::list_proposicao_categorias,
        votacoes::list_votacoes,
        votacoes::get_votacao,
        votacoes::list_votacao_proposicoes,
        votacoes::list_orientacoes,
        votacoes::list_votacao_votos,
        votacoes::list_votos,
        list_categorias_civicas,
    ),
    components(schemas(
        BuildInfo,
        CategoriaCivica,
        Deputado,
        ErrorBody,
        ErrorCode,
        ErrorResponse,
        Orientacao,
        OrigemClassificacao,
        PaginationMeta,
        Placar,
        Proposicao,
        ProposicaoCategoria,
        ResultadoVotacao,
        TipoProposicao,
        TipoVoto,
        Votacao,
        VotacaoProposicao,
        Voto,
    ))
)]
pub struct ApiDoc;

/// Routes relative to `/api/v1`.
///
/// Expects `Extension<Arc<Catalog>>` and `Extension<BuildInfo>` layered on top.
pub fn router() -> Router {
    Router::new()
        .route("/build-info", get(get_build_info))
        .route("/deputados", get(deputados::list_deputados))
        .route("/deputados/{id}", get(deputados::get_deputado))
        .route("/proposicoes", get(proposicoes::list_proposicoes))
        .route("/proposicoes/{id}", get(proposicoes::get_proposicao))
        .route(
            "/proposicoes/{id}/categorias",
            get(proposicoes::list_proposicao_categorias),
        )
        .route("/votacoes", get(votacoes::list_votacoes))
        .route("/votacoes/{id}", get(votacoes::get_votacao))
        .route(
            "/votacoes/{id}/proposicoes",
            get(votacoes::list_votacao_proposicoes),
        )
        .route("/votacoes/{id}/orientacoes", get(votacoes::list_orientacoes))
        .route("/votacoes/{id}/votos", get(votacoes::list_votacao_votos))
        .route("/votos", get(votacoes::list_votos))
        .route("/categorias-civicas", get(list_categorias_civicas))
}

/// Get build information
///
/// Returns metadata about the running service including version, git SHA, and build time.
#[utoipa::path(
    get,
    path = "/build-info",
    tag = "System",
    responses(
        (status = 200, description = "Build information retrieved successfully", body = BuildInfo)
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn get_build_info(Extension(build_info): Extension<BuildInfo>) -> Json<BuildInfo> {
    Json(build_info)
}

/// List civic categories
#[utoipa::path(
    get,
    path = "/categorias-civicas",
    tag = "Categorias",
    params(PageParams),
    responses(
        (status = 200, description = "Page of civic categories", body = PaginatedResponse<CategoriaCivica>)
    )
)]
#[allow(clippy::unused_async)]
pub async fn list_categorias_civicas(
    Extension(catalog): Extension<Arc<Catalog>>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Json<PaginatedResponse<CategoriaCivica>> {
    Json(catalog.categorias(params.page_request()))
}

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    Json,
};
use mc_model::{Deputado, PaginatedResponse, SingleResponse};

use super::error::ApiError;
use super::params::{non_empty, page_request, parse_id, ApiQuery, DeputadosParams};
use crate::catalog::{Catalog, DeputadoFilter};

/// List deputies
///
/// Filters combine with AND. `nome` matches a case-insensitive substring;
/// `partido` and `uf` must match exactly.
#[utoipa::path(
    get,
    path = "/deputados",
    tag = "Deputados",
    params(DeputadosParams),
    responses(
        (status = 200, description = "Page of deputies", body = PaginatedResponse<Deputado>)
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn list_deputados(
    Extension(catalog): Extension<Arc<Catalog>>,
    ApiQuery(params): ApiQuery<DeputadosParams>,
) -> Json<PaginatedResponse<Deputado>> {
    let filter = DeputadoFilter {
        nome: non_empty(params.nome.as_ref()),
        partido: non_empty(params.partido.as_ref()),
        uf: non_empty(params.uf.as_ref()),
    };
    let page = page_request(params.page.as_deref(), params.per_page.as_deref());
    Json(catalog.deputados(&filter, page))
}

/// Get a deputy
///
/// # Errors
///
/// Returns 400 for a malformed id and 404 for an unknown one.
#[utoipa::path(
    get,
    path = "/deputados/{id}",
    tag = "Deputados",
    params(("id" = String, Path, description = "Deputy id")),
    responses(
        (status = 200, description = "The deputy", body = SingleResponse<Deputado>),
        (status = 400, description = "Malformed id", body = mc_model::ErrorResponse),
        (status = 404, description = "Unknown deputy", body = mc_model::ErrorResponse)
    )
)]
#[allow(clippy::unused_async)]
pub async fn get_deputado(
    Extension(catalog): Extension<Arc<Catalog>>,
    Path(id): Path<String>,
) -> Result<Json<SingleResponse<Deputado>>, ApiError> {
    let id = parse_id(&id)?;
    let deputado = catalog
        .deputado(id)
        .ok_or_else(|| ApiError::NotFound("Deputado não encontrado".into()))?;
    Ok(Json(SingleResponse {
        data: deputado.clone(),
    }))
}

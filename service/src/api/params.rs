//! Query-string and path parsing shared by the handlers.
//!
//! All query fields arrive as raw strings so that malformed pagination can
//! fall back to defaults instead of failing extraction.

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use utoipa::IntoParams;

use super::error::ApiError;
use crate::catalog::PageRequest;

/// Largest integer a JSON client can represent exactly (2^53 - 1).
pub const MAX_SAFE_ID: u64 = 9_007_199_254_740_991;

pub const INVALID_ID_MESSAGE: &str = "ID inválido: deve ser um número inteiro positivo";

/// Parse a path id: ASCII digits only, positive, at most [`MAX_SAFE_ID`].
///
/// # Errors
/// Returns [`ApiError::Validation`] for anything else.
pub fn parse_id(raw: &str) -> Result<u64, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::Validation(INVALID_ID_MESSAGE.into()));
    }
    match raw.parse::<u64>() {
        Ok(id) if (1..=MAX_SAFE_ID).contains(&id) => Ok(id),
        _ => Err(ApiError::Validation(INVALID_ID_MESSAGE.into())),
    }
}

/// A strictly positive integer, or `None`.
fn positive(raw: Option<&str>) -> Option<u32> {
    let raw = raw?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u32>().ok().filter(|n| *n > 0)
}

/// Build a page window; each invalid value falls back to its default.
#[must_use]
pub fn page_request(page: Option<&str>, per_page: Option<&str>) -> PageRequest {
    PageRequest::new(positive(page).unwrap_or(0), positive(per_page).unwrap_or(0))
}

/// Empty strings count as absent.
#[must_use]
pub fn non_empty(raw: Option<&String>) -> Option<String> {
    raw.filter(|s| !s.is_empty()).cloned()
}

/// `"true"` or `"false"`; any other value disables the filter.
#[must_use]
pub fn bool_filter(raw: Option<&str>) -> Option<bool> {
    match raw? {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Parse the `ano` filter.
///
/// # Errors
/// Returns [`ApiError::Validation`] when present and not an integer.
pub fn ano_filter(raw: Option<&str>) -> Result<Option<i32>, ApiError> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<i32>().map(Some).map_err(|_| {
            ApiError::Validation("Parâmetro 'ano' inválido: deve ser um número inteiro".into())
        }),
    }
}

/// Query-string values by name. A repeated name keeps its first value.
#[derive(Debug, Default)]
pub struct QueryPairs(HashMap<String, String>);

impl QueryPairs {
    #[must_use]
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        let mut values = HashMap::with_capacity(pairs.len());
        for (name, value) in pairs {
            values.entry(name).or_insert(value);
        }
        Self(values)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

/// Handler parameters read from [`QueryPairs`].
pub trait FromQueryPairs: Sized {
    fn from_pairs(pairs: &QueryPairs) -> Self;
}

/// Query extractor whose parameter structs never reject a query string for
/// its shape (repeated or unknown names).
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: FromQueryPairs,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection, "unreadable query string");
                ApiError::Validation("Parâmetros de consulta inválidos".into())
            })?;
        Ok(Self(T::from_pairs(&QueryPairs::new(pairs))))
    }
}

/// Pagination for collections with no other filters.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number, starting at 1 (default 1)
    pub page: Option<String>,
    /// Items per page (default 20)
    pub per_page: Option<String>,
}

impl PageParams {
    #[must_use]
    pub fn page_request(&self) -> PageRequest {
        page_request(self.page.as_deref(), self.per_page.as_deref())
    }
}

#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeputadosParams {
    /// Case-insensitive substring of the deputy's name
    pub nome: Option<String>,
    /// Party abbreviation, exact match
    pub partido: Option<String>,
    /// Two-letter state code, exact match
    pub uf: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProposicoesParams {
    /// Bill type code (PL, PEC, MPV, PLP, PDL)
    pub tipo: Option<String>,
    /// Year the bill was filed; must be an integer
    pub ano: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VotacoesParams {
    /// Body that held the session (e.g. PLEN)
    pub sigla_orgao: Option<String>,
    /// `true` or `false`; other values are ignored
    pub eh_nominal: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VotosParams {
    /// Vote session id (required)
    pub votacao_id: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl FromQueryPairs for PageParams {
    fn from_pairs(pairs: &QueryPairs) -> Self {
        Self {
            page: pairs.get("page"),
            per_page: pairs.get("per_page"),
        }
    }
}

impl FromQueryPairs for DeputadosParams {
    fn from_pairs(pairs: &QueryPairs) -> Self {
        Self {
            nome: pairs.get("nome"),
            partido: pairs.get("partido"),
            uf: pairs.get("uf"),
            page: pairs.get("page"),
            per_page: pairs.get("per_page"),
        }
    }
}

impl FromQueryPairs for ProposicoesParams {
    fn from_pairs(pairs: &QueryPairs) -> Self {
        Self {
            tipo: pairs.get("tipo"),
            ano: pairs.get("ano"),
            page: pairs.get("page"),
            per_page: pairs.get("per_page"),
        }
    }
}

impl FromQueryPairs for VotacoesParams {
    fn from_pairs(pairs: &QueryPairs) -> Self {
        Self {
            sigla_orgao: pairs.get("sigla_orgao"),
            eh_nominal: pairs.get("eh_nominal"),
            page: pairs.get("page"),
            per_page: pairs.get("per_page"),
        }
    }
}

impl FromQueryPairs for VotosParams {
    fn from_pairs(pairs: &QueryPairs) -> Self {
        Self {
            votacao_id: pairs.get("votacao_id"),
            page: pairs.get("page"),
            per_page: pairs.get("per_page"),
        }
    }
}

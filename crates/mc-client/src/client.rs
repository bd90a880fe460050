//! Typed client over a [`Transport`].

use std::sync::Arc;

use bytes::Bytes;
use mc_model::{
    CategoriaCivica, Deputado, Orientacao, Proposicao, ProposicaoCategoria, Votacao,
    VotacaoProposicao, Voto,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::envelope::{parse_paginated, parse_single, ParsedPage};
use crate::error_message::error_message;
use crate::query::{build_path, QueryParams};
use crate::resources::{
    CategoriasCivicasQuery, DeputadoQuery, DeputadosQuery, ListResource, OrientacoesQuery,
    ProposicaoCategoriasQuery, ProposicaoQuery, ProposicoesQuery, SingleResource, VotacaoQuery,
    VotacaoProposicoesQuery, VotacoesQuery, VotosQuery,
};
use crate::transport::{HttpTransport, Transport, TransportError};

/// A `GET` request relative to the API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub path: String,
    pub params: QueryParams,
}

impl ApiRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: QueryParams::new(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// Path plus canonical query string.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        build_path(&self.path, &self.params)
    }
}

/// Errors surfaced by [`ApiClient`].
///
/// `Display` yields display-ready Portuguese text.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Single resource answered 404
    #[error("Recurso não encontrado")]
    NotFound,

    /// Any other non-2xx answer; `message` is already extracted from the body
    #[error("{message}")]
    Status { status: u16, message: String },
}

/// Client for the `/api/v1` surface.
///
/// Cheap to clone; clones share the same transport.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Client issuing real HTTP requests against `base_url`.
    pub fn http(base_url: impl Into<String>) -> Self {
        Self::new(Arc::new(HttpTransport::new(base_url)))
    }

    /// Fetch a collection envelope.
    ///
    /// A 2xx body that is not JSON, or not an envelope, yields an empty page.
    ///
    /// # Errors
    /// Returns `FetchError::Transport` on network failure and
    /// `FetchError::Status` on any non-2xx response.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        error_prefix: &str,
    ) -> Result<ParsedPage<T>, FetchError> {
        let body = self.fetch_body(request, error_prefix, false).await?;
        Ok(parse_paginated(&decode_json(&body)))
    }

    /// Fetch a single-resource envelope.
    ///
    /// # Errors
    /// Returns `FetchError::NotFound` on 404, `FetchError::Status` on any
    /// other non-2xx response and `FetchError::Transport` on network failure.
    pub async fn fetch_one<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        error_prefix: &str,
    ) -> Result<Option<T>, FetchError> {
        let body = self.fetch_body(request, error_prefix, true).await?;
        Ok(parse_single(&decode_json(&body)))
    }

    async fn fetch_body(
        &self,
        request: &ApiRequest,
        error_prefix: &str,
        not_found_is_distinct: bool,
    ) -> Result<Bytes, FetchError> {
        let path = request.path_and_query();
        let response = self.transport.get(&path).await?;

        if response.is_success() {
            return Ok(response.body);
        }
        if not_found_is_distinct && response.status == 404 {
            return Err(FetchError::NotFound);
        }

        let message = error_message(response.status, &response.body, error_prefix);
        tracing::debug!(%path, status = response.status, %message, "request failed");
        Err(FetchError::Status {
            status: response.status,
            message,
        })
    }

    /// Fetch the collection described by `resource`.
    ///
    /// A resource missing its parent id yields an empty page without a request.
    ///
    /// # Errors
    /// See [`ApiClient::fetch_page`].
    pub async fn list<R: ListResource>(
        &self,
        resource: &R,
    ) -> Result<ParsedPage<R::Item>, FetchError> {
        match resource.request() {
            Some(request) => self.fetch_page(&request, R::ERROR_PREFIX).await,
            None => Ok(ParsedPage::default()),
        }
    }

    /// Fetch the single resource described by `resource`.
    ///
    /// # Errors
    /// See [`ApiClient::fetch_one`].
    pub async fn get<R: SingleResource>(&self, resource: &R) -> Result<Option<R::Item>, FetchError> {
        match resource.request() {
            Some(request) => self.fetch_one(&request, R::ERROR_PREFIX).await,
            None => Ok(None),
        }
    }
}

/// Typed endpoint methods.
#[allow(clippy::missing_errors_doc)] // every method fails like `list`/`get`
impl ApiClient {
    pub async fn deputados(
        &self,
        query: &DeputadosQuery,
    ) -> Result<ParsedPage<Deputado>, FetchError> {
        self.list(query).await
    }

    pub async fn deputado(&self, id: u64) -> Result<Option<Deputado>, FetchError> {
        self.get(&DeputadoQuery::new(id)).await
    }

    pub async fn proposicoes(
        &self,
        query: &ProposicoesQuery,
    ) -> Result<ParsedPage<Proposicao>, FetchError> {
        self.list(query).await
    }

    pub async fn proposicao(&self, id: u64) -> Result<Option<Proposicao>, FetchError> {
        self.get(&ProposicaoQuery::new(id)).await
    }

    pub async fn proposicao_categorias(
        &self,
        query: &ProposicaoCategoriasQuery,
    ) -> Result<ParsedPage<ProposicaoCategoria>, FetchError> {
        self.list(query).await
    }

    pub async fn votacoes(&self, query: &VotacoesQuery) -> Result<ParsedPage<Votacao>, FetchError> {
        self.list(query).await
    }

    pub async fn votacao(&self, id: u64) -> Result<Option<Votacao>, FetchError> {
        self.get(&VotacaoQuery::new(id)).await
    }

    pub async fn votacao_proposicoes(
        &self,
        query: &VotacaoProposicoesQuery,
    ) -> Result<ParsedPage<VotacaoProposicao>, FetchError> {
        self.list(query).await
    }

    pub async fn orientacoes(
        &self,
        query: &OrientacoesQuery,
    ) -> Result<ParsedPage<Orientacao>, FetchError> {
        self.list(query).await
    }

    pub async fn votos(&self, query: &VotosQuery) -> Result<ParsedPage<Voto>, FetchError> {
        self.list(query).await
    }

    pub async fn categorias_civicas(
        &self,
        query: &CategoriasCivicasQuery,
    ) -> Result<ParsedPage<CategoriaCivica>, FetchError> {
        self.list(query).await
    }
}

fn decode_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "successful response body is not JSON");
        Value::Null
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;
    use serde_json::json;

    fn client_with(mock: &Arc<MockTransport>) -> ApiClient {
        ApiClient::new(Arc::clone(mock) as Arc<dyn Transport>)
    }

    #[tokio::test]
    async fn list_builds_query_from_resource() {
        let mock = Arc::new(MockTransport::new());
        mock.respond_json(
            "/deputados?uf=RJ&page=2",
            200,
            &json!({"data": [], "pagination": {"page": 2, "per_page": 20, "total": 46}}),
        );
        let client = client_with(&mock);

        let query = DeputadosQuery {
            uf: Some("RJ".into()),
            page: Some(2),
            ..DeputadosQuery::default()
        };
        let page = client.deputados(&query).await.expect("page");

        assert_eq!(page.pagination.map(|p| p.total), Some(46));
        assert_eq!(mock.calls(), vec!["/deputados?uf=RJ&page=2".to_string()]);
    }

    #[tokio::test]
    async fn non_json_success_degrades_to_empty_page() {
        let mock = Arc::new(MockTransport::new());
        mock.respond_raw("/categorias-civicas", 200, "<html>oops</html>");
        let client = client_with(&mock);

        let page = client
            .categorias_civicas(&CategoriasCivicasQuery::default())
            .await
            .expect("degrades instead of failing");
        assert!(page.data.is_empty());
        assert!(page.pagination.is_none());
    }

    #[tokio::test]
    async fn single_resource_404_is_not_found() {
        let mock = Arc::new(MockTransport::new());
        let client = client_with(&mock);

        let result = client.votacao(999_999).await;
        assert!(matches!(result, Err(FetchError::NotFound)));
    }

    #[tokio::test]
    async fn list_404_uses_error_envelope() {
        let mock = Arc::new(MockTransport::new());
        mock.respond_json(
            "/votacoes/5/votos",
            404,
            &json!({"error": {"code": "NOT_FOUND", "message": "Votação não encontrada"}}),
        );
        let client = client_with(&mock);

        let result = client.votos(&VotosQuery::for_votacao(5)).await;
        match result {
            Err(FetchError::Status { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Votação não encontrada");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_parent_skips_request() {
        let mock = Arc::new(MockTransport::new());
        let client = client_with(&mock);

        let page = client.votos(&VotosQuery::default()).await.expect("empty");
        assert!(page.data.is_empty());
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_reported() {
        let mock = Arc::new(MockTransport::new());
        mock.fail("/votacoes", "sem rede");
        let client = client_with(&mock);

        let err = client
            .votacoes(&VotacoesQuery::default())
            .await
            .expect_err("transport failure");
        assert_eq!(err.to_string(), "sem rede");
    }
}

//! Resource descriptors: the inputs of each hook and the request they map to.
//!
//! Descriptors compare by value, so a hook refetches only when a filter,
//! page or parent id actually changes.

use mc_model::{
    CategoriaCivica, Deputado, Orientacao, Proposicao, ProposicaoCategoria, Votacao,
    VotacaoProposicao, Voto,
};
use serde::de::DeserializeOwned;

use crate::client::ApiRequest;
use crate::query::QueryParams;

/// A paginated collection endpoint.
pub trait ListResource: Clone + PartialEq + Send + Sync + 'static {
    type Item: DeserializeOwned + Clone + Send + Sync + 'static;

    /// Prefix of the fallback error message (`"{prefix}: {status}"`).
    const ERROR_PREFIX: &'static str;

    /// Request to issue, or `None` when a required parent id is missing.
    fn request(&self) -> Option<ApiRequest>;
}

/// A single-resource endpoint.
pub trait SingleResource: Clone + PartialEq + Send + Sync + 'static {
    type Item: DeserializeOwned + Clone + Send + Sync + 'static;

    const ERROR_PREFIX: &'static str;

    /// Shown instead of the server message when the resource does not exist.
    const NOT_FOUND_MESSAGE: &'static str;

    fn request(&self) -> Option<ApiRequest>;
}

/// Parent ids follow the frontend convention: missing and zero both mean "none yet".
fn present(id: Option<u64>) -> Option<u64> {
    id.filter(|id| *id > 0)
}

fn paged(page: Option<u32>, per_page: Option<u32>) -> QueryParams {
    QueryParams::new()
        .with("page", page)
        .with("per_page", per_page)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeputadosQuery {
    /// Case-insensitive substring of the name
    pub nome: Option<String>,
    pub partido: Option<String>,
    pub uf: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListResource for DeputadosQuery {
    type Item = Deputado;
    const ERROR_PREFIX: &'static str = "Erro ao carregar deputados";

    fn request(&self) -> Option<ApiRequest> {
        let params = QueryParams::new()
            .with("nome", self.nome.as_deref())
            .with("partido", self.partido.as_deref())
            .with("uf", self.uf.as_deref())
            .with("page", self.page)
            .with("per_page", self.per_page);
        Some(ApiRequest::new("/deputados").with_params(params))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeputadoQuery {
    pub id: Option<u64>,
}

impl DeputadoQuery {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self { id: Some(id) }
    }
}

impl SingleResource for DeputadoQuery {
    type Item = Deputado;
    const ERROR_PREFIX: &'static str = "Erro ao carregar deputado";
    const NOT_FOUND_MESSAGE: &'static str = "Deputado não encontrado";

    fn request(&self) -> Option<ApiRequest> {
        present(self.id).map(|id| ApiRequest::new(format!("/deputados/{id}")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposicoesQuery {
    pub tipo: Option<String>,
    pub ano: Option<i32>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListResource for ProposicoesQuery {
    type Item = Proposicao;
    const ERROR_PREFIX: &'static str = "Erro ao carregar proposições";

    fn request(&self) -> Option<ApiRequest> {
        let params = QueryParams::new()
            .with("tipo", self.tipo.as_deref())
            .with("ano", self.ano)
            .with("page", self.page)
            .with("per_page", self.per_page);
        Some(ApiRequest::new("/proposicoes").with_params(params))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposicaoQuery {
    pub id: Option<u64>,
}

impl ProposicaoQuery {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self { id: Some(id) }
    }
}

impl SingleResource for ProposicaoQuery {
    type Item = Proposicao;
    const ERROR_PREFIX: &'static str = "Erro ao carregar proposição";
    const NOT_FOUND_MESSAGE: &'static str = "Proposição não encontrada";

    fn request(&self) -> Option<ApiRequest> {
        present(self.id).map(|id| ApiRequest::new(format!("/proposicoes/{id}")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposicaoCategoriasQuery {
    pub proposicao_id: Option<u64>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ProposicaoCategoriasQuery {
    #[must_use]
    pub const fn for_proposicao(proposicao_id: u64) -> Self {
        Self {
            proposicao_id: Some(proposicao_id),
            page: None,
            per_page: None,
        }
    }
}

impl ListResource for ProposicaoCategoriasQuery {
    type Item = ProposicaoCategoria;
    const ERROR_PREFIX: &'static str = "Erro ao carregar categorias da proposição";

    fn request(&self) -> Option<ApiRequest> {
        present(self.proposicao_id).map(|id| {
            ApiRequest::new(format!("/proposicoes/{id}/categorias"))
                .with_params(paged(self.page, self.per_page))
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VotacoesQuery {
    pub sigla_orgao: Option<String>,
    pub eh_nominal: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListResource for VotacoesQuery {
    type Item = Votacao;
    const ERROR_PREFIX: &'static str = "Erro ao carregar votações";

    fn request(&self) -> Option<ApiRequest> {
        let params = QueryParams::new()
            .with("sigla_orgao", self.sigla_orgao.as_deref())
            .with("eh_nominal", self.eh_nominal)
            .with("page", self.page)
            .with("per_page", self.per_page);
        Some(ApiRequest::new("/votacoes").with_params(params))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VotacaoQuery {
    pub id: Option<u64>,
}

impl VotacaoQuery {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self { id: Some(id) }
    }
}

impl SingleResource for VotacaoQuery {
    type Item = Votacao;
    const ERROR_PREFIX: &'static str = "Erro ao carregar votação";
    const NOT_FOUND_MESSAGE: &'static str = "Votação não encontrada";

    fn request(&self) -> Option<ApiRequest> {
        present(self.id).map(|id| ApiRequest::new(format!("/votacoes/{id}")))
    }
}

/// Declares a list resource nested under `/votacoes/:id/`.
macro_rules! votacao_child {
    ($name:ident, $item:ty, $segment:literal, $prefix:literal) => {
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            pub votacao_id: Option<u64>,
            pub page: Option<u32>,
            pub per_page: Option<u32>,
        }

        impl $name {
            #[must_use]
            pub const fn for_votacao(votacao_id: u64) -> Self {
                Self {
                    votacao_id: Some(votacao_id),
                    page: None,
                    per_page: None,
                }
            }
        }

        impl ListResource for $name {
            type Item = $item;
            const ERROR_PREFIX: &'static str = $prefix;

            fn request(&self) -> Option<ApiRequest> {
                present(self.votacao_id).map(|id| {
                    ApiRequest::new(format!(concat!("/votacoes/{}/", $segment), id))
                        .with_params(paged(self.page, self.per_page))
                })
            }
        }
    };
}

votacao_child!(
    VotacaoProposicoesQuery,
    VotacaoProposicao,
    "proposicoes",
    "Erro ao carregar proposições da votação"
);
votacao_child!(
    OrientacoesQuery,
    Orientacao,
    "orientacoes",
    "Erro ao carregar orientações"
);
votacao_child!(VotosQuery, Voto, "votos", "Erro ao carregar votos");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoriasCivicasQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListResource for CategoriasCivicasQuery {
    type Item = CategoriaCivica;
    const ERROR_PREFIX: &'static str = "Erro ao carregar categorias cívicas";

    fn request(&self) -> Option<ApiRequest> {
        Some(ApiRequest::new("/categorias-civicas").with_params(paged(self.page, self.per_page)))
    }
}

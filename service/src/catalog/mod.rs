//! Read-only queries over the fixture collections.
//!
//! Handlers never touch the fixture vectors directly: every listing goes
//! through a [`Catalog`] method so filtering and pagination stay identical
//! across endpoints that expose the same data.

mod page;
mod votos;

pub use page::{paginate_iter, PageRequest, DEFAULT_PAGE, DEFAULT_PER_PAGE};
pub use votos::{generate as generate_votos, VotosCache};

use mc_model::{
    CategoriaCivica, Deputado, Orientacao, PaginatedResponse, Proposicao, ProposicaoCategoria,
    Votacao, VotacaoProposicao, Voto,
};

use crate::fixtures::Fixtures;

#[derive(Debug, Clone, Default)]
pub struct DeputadoFilter {
    /// Case-insensitive substring of the name
    pub nome: Option<String>,
    pub partido: Option<String>,
    pub uf: Option<String>,
}

impl DeputadoFilter {
    fn matches(&self, deputado: &Deputado) -> bool {
        let nome_ok = self.nome.as_ref().is_none_or(|needle| {
            deputado
                .nome
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });
        nome_ok
            && self
                .partido
                .as_ref()
                .is_none_or(|p| &deputado.sigla_partido == p)
            && self.uf.as_ref().is_none_or(|uf| &deputado.uf == uf)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProposicaoFilter {
    pub tipo: Option<String>,
    pub ano: Option<i32>,
}

impl ProposicaoFilter {
    fn matches(&self, proposicao: &Proposicao) -> bool {
        self.tipo
            .as_ref()
            .is_none_or(|tipo| proposicao.tipo.as_str() == tipo)
            && self.ano.is_none_or(|ano| proposicao.ano == ano)
    }
}

#[derive(Debug, Clone, Default)]
pub struct VotacaoFilter {
    pub sigla_orgao: Option<String>,
    pub eh_nominal: Option<bool>,
}

impl VotacaoFilter {
    fn matches(&self, votacao: &Votacao) -> bool {
        self.sigla_orgao
            .as_ref()
            .is_none_or(|orgao| votacao.sigla_orgao.as_ref() == Some(orgao))
            && self
                .eh_nominal
                .is_none_or(|nominal| votacao.eh_nominal == Some(nominal))
    }
}

/// Immutable fixtures plus the bounded votos memo.
#[derive(Debug)]
pub struct Catalog {
    fixtures: Fixtures,
    votos: VotosCache,
    seed: u64,
}

impl Catalog {
    #[must_use]
    pub const fn new(fixtures: Fixtures, votos: VotosCache, seed: u64) -> Self {
        Self {
            fixtures,
            votos,
            seed,
        }
    }

    #[must_use]
    pub const fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }

    #[must_use]
    pub const fn votos_cache(&self) -> &VotosCache {
        &self.votos
    }

    #[must_use]
    pub fn deputados(
        &self,
        filter: &DeputadoFilter,
        page: PageRequest,
    ) -> PaginatedResponse<Deputado> {
        let matching = self
            .fixtures
            .deputados
            .iter()
            .filter(|d| filter.matches(d))
            .cloned();
        paginate_iter(matching, page)
    }

    #[must_use]
    pub fn deputado(&self, id: u64) -> Option<&Deputado> {
        self.fixtures.deputados.iter().find(|d| d.id == id)
    }

    #[must_use]
    pub fn proposicoes(
        &self,
        filter: &ProposicaoFilter,
        page: PageRequest,
    ) -> PaginatedResponse<Proposicao> {
        let matching = self
            .fixtures
            .proposicoes
            .iter()
            .filter(|p| filter.matches(p))
            .cloned();
        paginate_iter(matching, page)
    }

    #[must_use]
    pub fn proposicao(&self, id: u64) -> Option<&Proposicao> {
        self.fixtures.proposicoes.iter().find(|p| p.id == id)
    }

    /// Categories linked to a proposition, `None` if the proposition is unknown.
    #[must_use]
    pub fn proposicao_categorias(
        &self,
        proposicao_id: u64,
        page: PageRequest,
    ) -> Option<PaginatedResponse<ProposicaoCategoria>> {
        self.proposicao(proposicao_id)?;
        let links = self
            .fixtures
            .proposicao_categorias
            .iter()
            .filter(|l| l.proposicao_id == proposicao_id)
            .cloned();
        Some(paginate_iter(links, page))
    }

    #[must_use]
    pub fn votacoes(&self, filter: &VotacaoFilter, page: PageRequest) -> PaginatedResponse<Votacao> {
        let matching = self
            .fixtures
            .votacoes
            .iter()
            .filter(|v| filter.matches(v))
            .cloned();
        paginate_iter(matching, page)
    }

    #[must_use]
    pub fn votacao(&self, id: u64) -> Option<&Votacao> {
        self.fixtures.votacoes.iter().find(|v| v.id == id)
    }

    #[must_use]
    pub fn votacao_proposicoes(
        &self,
        votacao_id: u64,
        page: PageRequest,
    ) -> Option<PaginatedResponse<VotacaoProposicao>> {
        self.votacao(votacao_id)?;
        let links = self
            .fixtures
            .votacao_proposicoes
            .iter()
            .filter(|l| l.votacao_id == votacao_id)
            .cloned();
        Some(paginate_iter(links, page))
    }

    #[must_use]
    pub fn orientacoes(
        &self,
        votacao_id: u64,
        page: PageRequest,
    ) -> Option<PaginatedResponse<Orientacao>> {
        self.votacao(votacao_id)?;
        let orientacoes = self
            .fixtures
            .orientacoes
            .iter()
            .filter(|o| o.votacao_id == votacao_id)
            .cloned();
        Some(paginate_iter(orientacoes, page))
    }

    /// Votes of one session. Serves both `/votacoes/{id}/votos` and
    /// `/votos?votacao_id={id}`.
    #[must_use]
    pub fn votos_page(&self, votacao_id: u64, page: PageRequest) -> Option<PaginatedResponse<Voto>> {
        let votacao = self.votacao(votacao_id)?;
        let votos = self
            .votos
            .get_or_generate(votacao, &self.fixtures.deputados, self.seed);
        Some(page.paginate(&votos))
    }

    #[must_use]
    pub fn categorias(&self, page: PageRequest) -> PaginatedResponse<CategoriaCivica> {
        page.paginate(&self.fixtures.categorias)
    }
}

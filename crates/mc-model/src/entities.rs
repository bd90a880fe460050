//! Value records for the Chamber of Deputies voting data.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::kinds::{OrigemClassificacao, ResultadoVotacao, TipoProposicao, TipoVoto};
use crate::placar::Placar;

/// An elected member of the Chamber of Deputies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Deputado {
    /// Stable identifier, referenced by [`Voto::deputado_id`]
    pub id: u64,
    pub nome: String,
    /// Party abbreviation (e.g. "PT", "PL")
    pub sigla_partido: String,
    /// Two-letter state code (e.g. "SP")
    pub uf: String,
    pub foto_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A legislative bill or proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Proposicao {
    pub id: u64,
    pub tipo: TipoProposicao,
    pub numero: u32,
    pub ano: i32,
    pub ementa: String,
    /// Plain-language summary of the ementa
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ementa_simplificada: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autor_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_apresentacao: Option<NaiveDate>,
}

impl Proposicao {
    /// Short reference such as "PL 1234/2023".
    #[must_use]
    pub fn referencia(&self) -> String {
        format!("{} {}/{}", self.tipo, self.numero, self.ano)
    }
}

/// A recorded vote session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Votacao {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposicao_id: Option<u64>,
    pub data_hora: DateTime<Utc>,
    pub resultado: ResultadoVotacao,
    pub placar: Placar,
    /// Whether each deputy's vote was individually recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eh_nominal: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    /// Body that held the session (e.g. "PLEN", "CCJC")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigla_orgao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposicao: Option<Proposicao>,
}

/// One deputy's vote in one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Voto {
    pub id: u64,
    pub votacao_id: u64,
    pub deputado_id: u64,
    pub voto: TipoVoto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deputado: Option<Deputado>,
}

/// A party or bloc's recommended vote for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Orientacao {
    pub id: u64,
    pub votacao_id: u64,
    pub sigla_bancada: String,
    pub orientacao: String,
    pub created_at: DateTime<Utc>,
}

/// Entry in the civic-topic taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoriaCivica {
    pub id: u64,
    /// Unique slug (e.g. "saude")
    pub codigo: String,
    pub nome: String,
    pub descricao: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icone: Option<String>,
}

/// Link between a proposition and a civic category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProposicaoCategoria {
    pub id: u64,
    pub proposicao_id: u64,
    pub categoria_id: u64,
    pub origem: OrigemClassificacao,
    /// Classifier confidence in `0.0..=1.0`, set for automatic links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confianca: Option<f64>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categoria: Option<CategoriaCivica>,
}

/// Link between a vote session and a proposition it decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VotacaoProposicao {
    pub id: u64,
    pub votacao_id: u64,
    pub proposicao_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ementa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo: Option<TipoProposicao>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ano: Option<i32>,
    /// Exactly one link per session is the principal one
    pub eh_principal: bool,
    pub created_at: DateTime<Utc>,
}

//! Shared data model for Memória Cívica
//!
//! This crate holds the value records exchanged between the mock backend and
//! the client library: deputies, propositions, vote sessions, individual
//! votes, party orientations and civic categories, plus the JSON envelopes
//! that wrap them on the wire.
//!
//! Every record is immutable once built. Optional fields are omitted from the
//! JSON output when absent and default to `None` when missing from the input.

mod entities;
mod envelope;
mod kinds;
mod placar;

pub use entities::{
    CategoriaCivica, Deputado, Orientacao, Proposicao, ProposicaoCategoria, Votacao,
    VotacaoProposicao, Voto,
};
pub use envelope::{
    ErrorBody, ErrorCode, ErrorResponse, PaginatedResponse, PaginationMeta, SingleResponse,
};
pub use kinds::{OrigemClassificacao, ResultadoVotacao, TipoProposicao, TipoVoto};
pub use placar::{Placar, PlacarPercentages};

/// Number of seats in the Chamber of Deputies.
pub const TOTAL_DEPUTADOS: u32 = 513;

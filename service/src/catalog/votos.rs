//! Individual votes, generated on demand from a session's placar.

use std::sync::Arc;
use std::time::Duration;

use mc_model::{Deputado, TipoVoto, Votacao, Voto};
use moka::sync::Cache;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Bounded memo of generated vote lists, keyed by votação id.
///
/// Entries expire after the configured TTL and are regenerated identically
/// on the next request, since generation only depends on the seed.
#[derive(Clone)]
pub struct VotosCache {
    cache: Cache<u64, Arc<Vec<Voto>>>,
}

impl VotosCache {
    #[must_use]
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();

        Self { cache }
    }

    /// Cached votes for `votacao`, generating them on a miss.
    pub fn get_or_generate(
        &self,
        votacao: &Votacao,
        deputados: &[Deputado],
        seed: u64,
    ) -> Arc<Vec<Voto>> {
        self.cache.get_with(votacao.id, || {
            tracing::debug!(votacao_id = votacao.id, "generating votos");
            Arc::new(generate(votacao, deputados, seed))
        })
    }

    /// Number of votações currently cached.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for VotosCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VotosCache")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

/// Voto ids per votação: `votacao_id * VOTO_ID_STRIDE + seq`.
const VOTO_ID_STRIDE: u64 = 1_000;

/// Saturates instead of overflowing for ids near `u64::MAX / VOTO_ID_STRIDE`.
#[must_use]
pub const fn voto_id(votacao_id: u64, seq: u64) -> u64 {
    votacao_id.saturating_mul(VOTO_ID_STRIDE).saturating_add(seq)
}

/// One vote per deputy. The placar decides how many of each kind; the seed
/// and votação id decide who casts which.
///
/// A placar covering fewer deputies than the chamber leaves the remainder as
/// abstentions and obstructions, so every deputy still appears exactly once.
/// Symbolic sessions (`eh_nominal == Some(false)`) have no roll call and
/// yield no votes.
#[must_use]
pub fn generate(votacao: &Votacao, deputados: &[Deputado], seed: u64) -> Vec<Voto> {
    if votacao.eh_nominal == Some(false) {
        return Vec::new();
    }

    let n = deputados.len();
    let sim = (votacao.placar.votos_sim as usize).min(n);
    let nao = (votacao.placar.votos_nao as usize).min(n - sim);
    let outros = n - sim - nao;
    let abstencao = outros.div_ceil(2);

    let mut tipos: Vec<TipoVoto> = std::iter::repeat(TipoVoto::Sim)
        .take(sim)
        .chain(std::iter::repeat(TipoVoto::Nao).take(nao))
        .chain(std::iter::repeat(TipoVoto::Abstencao).take(abstencao))
        .chain(std::iter::repeat(TipoVoto::Obstrucao).take(outros - abstencao))
        .collect();

    let mut rng = StdRng::seed_from_u64(seed ^ votacao.id.rotate_left(32));
    tipos.shuffle(&mut rng);

    (1..)
        .zip(deputados.iter().zip(tipos))
        .map(|(seq, (deputado, voto))| Voto {
            id: voto_id(votacao.id, seq),
            votacao_id: votacao.id,
            deputado_id: deputado.id,
            voto,
            deputado: Some(deputado.clone()),
        })
        .collect()
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregated tally of a vote session.
///
/// When fully tallied the three counts add up to the size of the chamber
/// ([`crate::TOTAL_DEPUTADOS`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct Placar {
    pub votos_sim: u32,
    pub votos_nao: u32,
    /// Abstentions, obstructions and absences
    pub votos_outros: u32,
}

/// Whole-number share of each tally bucket, in percent.
///
/// Each share is rounded on its own, so the three values can add up to 99 or
/// 101.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlacarPercentages {
    pub sim: u32,
    pub nao: u32,
    pub outros: u32,
}

impl Placar {
    #[must_use]
    pub const fn new(votos_sim: u32, votos_nao: u32, votos_outros: u32) -> Self {
        Self {
            votos_sim,
            votos_nao,
            votos_outros,
        }
    }

    /// Total votes counted across all buckets.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.votos_sim as u64 + self.votos_nao as u64 + self.votos_outros as u64
    }

    /// Percentages for display. An empty tally yields zero everywhere.
    #[must_use]
    pub fn percentages(&self) -> PlacarPercentages {
        let total = self.total();
        PlacarPercentages {
            sim: share(self.votos_sim, total),
            nao: share(self.votos_nao, total),
            outros: share(self.votos_outros, total),
        }
    }
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)] // counts are bounded by u32 and the result by 100
fn share(count: u32, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(count) * 100.0 / total as f64).round() as u32
}

//! Mock backend for Memória Cívica.
//!
//! Serves deterministic fixtures under `/api/v1` with the same pagination,
//! filtering and error envelopes the client library expects.

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::panic, clippy::unwrap_used))]

pub mod api;
pub mod build_info;
pub mod catalog;
pub mod config;
pub mod fixtures;
pub mod http;

use std::sync::Arc;
use std::time::Duration;

use catalog::{Catalog, VotosCache};
use config::FixturesConfig;
use fixtures::Fixtures;

/// Generate fixtures and the votos cache from configuration.
#[must_use]
pub fn build_catalog(config: &FixturesConfig) -> Arc<Catalog> {
    let votos = VotosCache::new(
        config.votos_cache_capacity,
        Duration::from_secs(config.votos_cache_ttl_secs),
    );
    Arc::new(Catalog::new(
        Fixtures::generate(config.seed),
        votos,
        config.seed,
    ))
}

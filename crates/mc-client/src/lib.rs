//! Client library for the Memória Cívica API.
//!
//! # Architecture
//!
//! - [`query`] - canonical query strings from optional parameters
//! - [`envelope`] - tolerant parsing of `{ data, pagination }` envelopes
//! - [`error_message`] - display text from `{ error: { message } }` bodies
//! - [`Transport`] - trait over HTTP `GET`; [`HttpTransport`] uses reqwest,
//!   [`mock::MockTransport`] scripts responses (behind `test-utils`)
//! - [`ApiClient`] - typed endpoint methods over a transport
//! - [`hooks`] - per-resource fetch state machines with stale-response guards
//!
//! # Example
//!
//! ```ignore
//! use mc_client::{hooks::ListHook, ApiClient, DeputadosQuery};
//!
//! let client = ApiClient::http("http://localhost:8080/api/v1");
//! let hook = ListHook::mounted(client, DeputadosQuery::default()).await;
//! let state = hook.snapshot();
//! if let Some(error) = state.error {
//!     eprintln!("{error}");
//! }
//! ```

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::panic, clippy::unwrap_used))]

mod client;
pub mod envelope;
pub mod error_message;
pub mod hooks;
pub mod query;
mod resources;
mod transport;

pub use client::{ApiClient, ApiRequest, FetchError};
pub use envelope::{parse_paginated, parse_single, ParsedPage};
pub use error_message::error_message;
pub use query::{build_path, QueryParams, QueryValue};
pub use resources::{
    CategoriasCivicasQuery, DeputadoQuery, DeputadosQuery, ListResource, OrientacoesQuery,
    ProposicaoCategoriasQuery, ProposicaoQuery, ProposicoesQuery, SingleResource, VotacaoQuery,
    VotacaoProposicoesQuery, VotacoesQuery, VotosQuery,
};
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::mock;

//! End-to-end tests: `mc-client` hooks against the mock backend over TCP.
//!
//! Each test binds the production router to an ephemeral port and drives it
//! through `HttpTransport`, the same path the `memoria` CLI takes.

mod common;

use std::net::SocketAddr;

use common::app_builder::TestAppBuilder;
use mc_client::hooks::{ListHook, SingleHook};
use mc_client::{
    ApiClient, DeputadoQuery, DeputadosQuery, FetchError, OrientacoesQuery, VotacaoQuery,
    VotosQuery,
};
use tokio::net::TcpListener;

async fn spawn_server() -> String {
    let app = TestAppBuilder::rest_only().build();
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr: SocketAddr = listener.local_addr().expect("addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server");
    });

    format!("http://{addr}/api/v1")
}

#[tokio::test]
async fn test_list_hook_loads_first_page() {
    let client = ApiClient::http(spawn_server().await);

    let hook = ListHook::mounted(client, DeputadosQuery::default()).await;
    let state = hook.snapshot();

    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.data.len(), 20);
    assert_eq!(state.pagination.map(|p| p.total), Some(513));
}

#[tokio::test]
async fn test_set_resource_moves_to_next_page() {
    let client = ApiClient::http(spawn_server().await);
    let hook = ListHook::new(
        client,
        VotosQuery {
            votacao_id: Some(1),
            page: Some(1),
            per_page: Some(100),
        },
    );
    hook.mount().await;
    let first = hook.snapshot();

    hook.set_resource(VotosQuery {
        votacao_id: Some(1),
        page: Some(6),
        per_page: Some(100),
    })
    .await;
    let last = hook.snapshot();

    assert_eq!(first.data.len(), 100);
    assert_eq!(last.data.len(), 13);
    assert_eq!(last.pagination.map(|p| p.page), Some(6));
}

#[tokio::test]
async fn test_single_hook_not_found_message() {
    let client = ApiClient::http(spawn_server().await);

    let hook = SingleHook::mounted(client, VotacaoQuery::new(999_999)).await;
    let state = hook.snapshot();

    assert!(state.data.is_none());
    assert_eq!(state.error.as_deref(), Some("Votação não encontrada"));
}

#[tokio::test]
async fn test_single_hook_loads_deputado() {
    let base_url = spawn_server().await;
    let client = ApiClient::http(base_url);
    let first = client
        .deputados(&DeputadosQuery::default())
        .await
        .expect("list");
    let id = first.data[0].id;

    let hook = SingleHook::mounted(client, DeputadoQuery::new(id)).await;

    assert_eq!(hook.snapshot().data.map(|d| d.id), Some(id));
}

#[tokio::test]
async fn test_nested_not_found_message_reaches_client() {
    let client = ApiClient::http(spawn_server().await);

    let result = client.deputado(0).await;
    // 0 counts as a missing id on the client and never reaches the server
    assert!(matches!(result, Ok(None)));

    let page = client
        .orientacoes(&OrientacoesQuery::for_votacao(999_999))
        .await;
    match page {
        Err(FetchError::Status { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Votação não encontrada");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_votacao_percentages_over_http() {
    let client = ApiClient::http(spawn_server().await);

    let votacao = client.votacao(1).await.expect("fetch").expect("exists");
    let pct = votacao.placar.percentages();

    assert_eq!(votacao.placar.total(), 513);
    let sum = pct.sim + pct.nao + pct.outros;
    assert!((98..=102).contains(&sum), "sum {sum}");
}

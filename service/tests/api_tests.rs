//! REST API tests using TestAppBuilder.
//!
//! These tests drive the `/api/v1` router with `oneshot` and assert on the
//! JSON envelopes: pagination metadata, filters, and 400/404 error bodies.

mod common;

use std::collections::HashSet;

use axum::http::StatusCode;
use common::{app_builder::TestAppBuilder, assert_error, get_json};
use mc_client::{build_path, QueryParams};
use memoria_civica_api::build_info::BuildInfo;
use serde_json::Value;

fn ids(body: &Value) -> Vec<u64> {
    body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|item| item["id"].as_u64().expect("id"))
        .collect()
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_deputados_default_pagination() {
    let app = TestAppBuilder::rest_only().build();
    let (status, body) = get_json(&app, "/api/v1/deputados").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(20));
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["per_page"], 20);
    assert_eq!(body["pagination"]["total"], 513);
}

#[tokio::test]
async fn test_out_of_range_page_returns_empty_data() {
    let app = TestAppBuilder::rest_only().build();
    let (status, body) = get_json(&app, "/api/v1/deputados?page=999&per_page=50").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], serde_json::json!([]));
    assert_eq!(body["pagination"]["page"], 999);
    assert_eq!(body["pagination"]["per_page"], 50);
    assert_eq!(body["pagination"]["total"], 513);
}

#[tokio::test]
async fn test_invalid_pagination_falls_back_to_defaults() {
    let app = TestAppBuilder::rest_only().build();

    for query in [
        "page=abc&per_page=xyz",
        "page=0&per_page=0",
        "page=-1&per_page=-20",
        "page=1.5&per_page=2.5",
        "page=&per_page=",
    ] {
        let (status, body) = get_json(&app, &format!("/api/v1/deputados?{query}")).await;
        assert_eq!(status, StatusCode::OK, "query {query}");
        assert_eq!(body["pagination"]["page"], 1, "query {query}");
        assert_eq!(body["pagination"]["per_page"], 20, "query {query}");
    }
}

#[tokio::test]
async fn test_repeated_pagination_keys_use_first_value() {
    let app = TestAppBuilder::rest_only().build();

    let (status, body) = get_json(&app, "/api/v1/deputados?page=2&page=3&per_page=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["page"], 2);
    assert_eq!(body["pagination"]["per_page"], 5);

    let (status, body) = get_json(&app, "/api/v1/categorias-civicas?page=abc&page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["page"], 1);

    let (status, body) =
        get_json(&app, "/api/v1/votos?votacao_id=3&votacao_id=4&per_page=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["votacao_id"], 3);
}

#[tokio::test]
async fn test_pages_do_not_overlap() {
    let app = TestAppBuilder::rest_only().build();
    let (_, first) = get_json(&app, "/api/v1/deputados?page=1&per_page=30").await;
    let (_, second) = get_json(&app, "/api/v1/deputados?page=2&per_page=30").await;

    let first: HashSet<u64> = ids(&first).into_iter().collect();
    let second: HashSet<u64> = ids(&second).into_iter().collect();
    assert_eq!(first.len(), 30);
    assert_eq!(second.len(), 30);
    assert!(first.is_disjoint(&second));
}

// ============================================================================
// Filters
// ============================================================================

#[tokio::test]
async fn test_deputados_filter_by_uf() {
    let app = TestAppBuilder::rest_only().build();
    let (status, body) = get_json(&app, "/api/v1/deputados?uf=RR&per_page=100").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 8);
    assert!(body["data"]
        .as_array()
        .expect("data")
        .iter()
        .all(|d| d["uf"] == "RR"));
}

#[tokio::test]
async fn test_deputados_filter_by_nome_is_case_insensitive() {
    let (app, catalog) = TestAppBuilder::rest_only().build_with_catalog();
    let target = catalog.fixtures().deputados[10].clone();
    let surname = target.nome.rsplit(' ').next().expect("surname").to_lowercase();

    let (status, body) = get_json(
        &app,
        &format!("/api/v1/deputados?nome={surname}&per_page=600"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(ids(&body).contains(&target.id));
}

#[tokio::test]
async fn test_deputados_filters_combine() {
    let (app, catalog) = TestAppBuilder::rest_only().build_with_catalog();
    let sample = catalog.fixtures().deputados[0].clone();

    let uri = build_path(
        "/api/v1/deputados",
        &QueryParams::new()
            .with("partido", &sample.sigla_partido)
            .with("uf", &sample.uf)
            .with("per_page", 600_u32),
    );
    let (_, body) = get_json(&app, &uri).await;

    let expected = catalog
        .fixtures()
        .deputados
        .iter()
        .filter(|d| d.sigla_partido == sample.sigla_partido && d.uf == sample.uf)
        .count();
    assert_eq!(body["pagination"]["total"], expected);
    assert!(ids(&body).contains(&sample.id));
}

#[tokio::test]
async fn test_proposicoes_invalid_ano_is_400() {
    let app = TestAppBuilder::rest_only().build();
    let (status, body) = get_json(&app, "/api/v1/proposicoes?ano=abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_proposicoes_filter_by_tipo_and_ano() {
    let (app, catalog) = TestAppBuilder::rest_only().build_with_catalog();
    let sample = catalog.fixtures().proposicoes[0].clone();

    let (status, body) = get_json(
        &app,
        &format!(
            "/api/v1/proposicoes?tipo={}&ano={}&per_page=100",
            sample.tipo, sample.ano
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    for item in body["data"].as_array().expect("data") {
        assert_eq!(item["tipo"], sample.tipo.as_str());
        assert_eq!(item["ano"], sample.ano);
    }
    assert!(ids(&body).contains(&sample.id));
}

#[tokio::test]
async fn test_votacoes_eh_nominal_filter() {
    let app = TestAppBuilder::rest_only().build();

    let (_, all) = get_json(&app, "/api/v1/votacoes?per_page=100").await;
    let (_, nominal) = get_json(&app, "/api/v1/votacoes?eh_nominal=true&per_page=100").await;
    let (_, simbolica) = get_json(&app, "/api/v1/votacoes?eh_nominal=false&per_page=100").await;
    let (_, ignored) = get_json(&app, "/api/v1/votacoes?eh_nominal=talvez&per_page=100").await;

    let total = |v: &Value| v["pagination"]["total"].as_u64().expect("total");
    assert_eq!(total(&all), 40);
    assert_eq!(total(&nominal) + total(&simbolica), 40);
    assert_eq!(total(&ignored), 40);
    assert!(nominal["data"]
        .as_array()
        .expect("data")
        .iter()
        .all(|v| v["eh_nominal"] == true));
}

#[tokio::test]
async fn test_votacoes_filter_by_orgao() {
    let app = TestAppBuilder::rest_only().build();
    let (status, body) = get_json(&app, "/api/v1/votacoes?sigla_orgao=PLEN&per_page=100").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]
        .as_array()
        .expect("data")
        .iter()
        .all(|v| v["sigla_orgao"] == "PLEN"));
}

// ============================================================================
// Single resources and id validation
// ============================================================================

#[tokio::test]
async fn test_get_deputado() {
    let (app, catalog) = TestAppBuilder::rest_only().build_with_catalog();
    let sample = catalog.fixtures().deputados[42].clone();

    let (status, body) = get_json(&app, &format!("/api/v1/deputados/{}", sample.id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], sample.id);
    assert_eq!(body["data"]["nome"], sample.nome.as_str());
    assert!(body.get("pagination").is_none());
}

#[tokio::test]
async fn test_malformed_ids_are_400() {
    let app = TestAppBuilder::rest_only().build();

    for path in [
        "/api/v1/deputados/abc",
        "/api/v1/deputados/0",
        "/api/v1/deputados/-3",
        "/api/v1/proposicoes/1.5",
        "/api/v1/votacoes/9007199254740992",
        "/api/v1/votacoes/abc/votos",
        "/api/v1/proposicoes/xyz/categorias",
    ] {
        let (status, body) = get_json(&app, path).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "path {path}");
        assert_error(&body, "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_unknown_ids_are_404() {
    let app = TestAppBuilder::rest_only().build();

    for path in [
        "/api/v1/votacoes/999999",
        "/api/v1/deputados/1",
        "/api/v1/proposicoes/999999",
        "/api/v1/votacoes/999999/orientacoes",
        "/api/v1/votacoes/999999/proposicoes",
        "/api/v1/votacoes/999999/votos",
        "/api/v1/votos?votacao_id=999999",
    ] {
        let (status, body) = get_json(&app, path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "path {path}");
        assert_error(&body, "NOT_FOUND");
    }
}

#[tokio::test]
async fn test_votacao_not_found_message() {
    let app = TestAppBuilder::rest_only().build();
    let (_, body) = get_json(&app, "/api/v1/votacoes/999999").await;
    assert_eq!(body["error"]["message"], "Votação não encontrada");
}

#[tokio::test]
async fn test_votacao_placar_sums_to_chamber() {
    let app = TestAppBuilder::rest_only().build();
    let (status, body) = get_json(&app, "/api/v1/votacoes/1").await;

    assert_eq!(status, StatusCode::OK);
    let placar = &body["data"]["placar"];
    let sum = placar["votos_sim"].as_u64().expect("sim")
        + placar["votos_nao"].as_u64().expect("nao")
        + placar["votos_outros"].as_u64().expect("outros");
    assert_eq!(sum, 513);
}

// ============================================================================
// Votos
// ============================================================================

#[tokio::test]
async fn test_votos_requires_votacao_id() {
    let app = TestAppBuilder::rest_only().build();

    for uri in ["/api/v1/votos", "/api/v1/votos?votacao_id="] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {uri}");
        assert_error(&body, "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_nested_and_flat_votos_agree() {
    let app = TestAppBuilder::rest_only().build();

    let (status_a, nested) = get_json(&app, "/api/v1/votacoes/3/votos?page=2&per_page=25").await;
    let (status_b, flat) = get_json(&app, "/api/v1/votos?votacao_id=3&page=2&per_page=25").await;

    assert_eq!(status_a, StatusCode::OK);
    assert_eq!(status_b, StatusCode::OK);
    assert_eq!(nested, flat);
}

#[tokio::test]
async fn test_votos_cover_each_deputy_once() {
    let app = TestAppBuilder::rest_only().build();
    let (_, body) = get_json(&app, "/api/v1/votacoes/6/votos?per_page=1000").await;

    let votos = body["data"].as_array().expect("data");
    assert_eq!(votos.len(), 513);
    assert_eq!(body["pagination"]["total"], 513);

    let deputies: HashSet<u64> = votos
        .iter()
        .map(|v| v["deputado_id"].as_u64().expect("deputado_id"))
        .collect();
    assert_eq!(deputies.len(), 513);
    assert!(votos.iter().all(|v| v["deputado"]["id"] == v["deputado_id"]));
}

#[tokio::test]
async fn test_votos_match_placar() {
    let app = TestAppBuilder::rest_only().build();
    let (_, votacao) = get_json(&app, "/api/v1/votacoes/7").await;
    let (_, votos) = get_json(&app, "/api/v1/votacoes/7/votos?per_page=1000").await;

    let count = |tipo: &str| {
        votos["data"]
            .as_array()
            .expect("data")
            .iter()
            .filter(|v| v["voto"] == tipo)
            .count() as u64
    };
    let placar = &votacao["data"]["placar"];
    assert_eq!(count("SIM"), placar["votos_sim"].as_u64().expect("sim"));
    assert_eq!(count("NAO"), placar["votos_nao"].as_u64().expect("nao"));
    assert_eq!(
        count("ABSTENCAO") + count("OBSTRUCAO"),
        placar["votos_outros"].as_u64().expect("outros")
    );
}

#[tokio::test]
async fn test_symbolic_votacao_has_no_individual_votos() {
    let app = TestAppBuilder::rest_only().build();
    let (_, votacao) = get_json(&app, "/api/v1/votacoes/5").await;
    assert_eq!(votacao["data"]["eh_nominal"], false);

    for uri in ["/api/v1/votacoes/5/votos", "/api/v1/votos?votacao_id=5"] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["data"], serde_json::json!([]), "{uri}");
        assert_eq!(body["pagination"]["total"], 0, "{uri}");
    }
}

#[tokio::test]
async fn test_votos_survive_tiny_cache() {
    let app = TestAppBuilder::rest_only()
        .with_votos_cache_capacity(1)
        .build();

    let (_, first) = get_json(&app, "/api/v1/votacoes/1/votos?per_page=10").await;
    let _ = get_json(&app, "/api/v1/votacoes/2/votos?per_page=10").await;
    let (_, again) = get_json(&app, "/api/v1/votacoes/1/votos?per_page=10").await;

    assert_eq!(first, again);
}

// ============================================================================
// Links and categories
// ============================================================================

#[tokio::test]
async fn test_votacao_has_one_principal_proposicao() {
    let app = TestAppBuilder::rest_only().build();
    let (status, body) = get_json(&app, "/api/v1/votacoes/4/proposicoes").await;

    assert_eq!(status, StatusCode::OK);
    let principals = body["data"]
        .as_array()
        .expect("data")
        .iter()
        .filter(|l| l["eh_principal"] == true)
        .count();
    assert_eq!(principals, 1);
}

#[tokio::test]
async fn test_orientacoes_belong_to_votacao() {
    let app = TestAppBuilder::rest_only().build();
    let (status, body) = get_json(&app, "/api/v1/votacoes/2/orientacoes?per_page=100").await;

    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().expect("data");
    assert!(!items.is_empty());
    assert!(items.iter().all(|o| o["votacao_id"] == 2));
}

#[tokio::test]
async fn test_proposicao_categorias_nest_categoria() {
    let (app, catalog) = TestAppBuilder::rest_only().build_with_catalog();
    let proposicao = catalog.fixtures().proposicoes[0].id;

    let (status, body) =
        get_json(&app, &format!("/api/v1/proposicoes/{proposicao}/categorias")).await;

    assert_eq!(status, StatusCode::OK);
    for link in body["data"].as_array().expect("data") {
        assert_eq!(link["proposicao_id"], proposicao);
        assert_eq!(link["categoria"]["id"], link["categoria_id"]);
        if link["origem"] == "automatica" {
            assert!(link["confianca"].is_number());
        }
    }
}

#[tokio::test]
async fn test_categorias_civicas() {
    let app = TestAppBuilder::rest_only().build();
    let (status, body) = get_json(&app, "/api/v1/categorias-civicas").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 12);
    let codigos: HashSet<&str> = body["data"]
        .as_array()
        .expect("data")
        .iter()
        .filter_map(|c| c["codigo"].as_str())
        .collect();
    assert_eq!(codigos.len(), 12);
}

// ============================================================================
// Determinism and build info
// ============================================================================

#[tokio::test]
async fn test_same_seed_same_responses() {
    let a = TestAppBuilder::rest_only().with_seed(11).build();
    let b = TestAppBuilder::rest_only().with_seed(11).build();

    let (_, body_a) = get_json(&a, "/api/v1/votacoes?per_page=5").await;
    let (_, body_b) = get_json(&b, "/api/v1/votacoes?per_page=5").await;
    assert_eq!(body_a, body_b);
}

#[tokio::test]
async fn test_build_info_endpoint() {
    let info = BuildInfo::from_lookup(|key| match key {
        "APP_VERSION" => Some("2.0.0".to_string()),
        "GIT_SHA" => Some("cafe123".to_string()),
        _ => None,
    });
    let app = TestAppBuilder::rest_only().with_build_info(info).build();

    let (status, body) = get_json(&app, "/api/v1/build-info").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], "2.0.0");
    assert_eq!(body["git_sha"], "cafe123");
    assert_eq!(body["build_time"], "unknown");
}

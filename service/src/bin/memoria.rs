//! Command-line browser for a running Memória Cívica API.
//!
//! Usage:
//! - `memoria deputados --uf SP --per-page 10`
//! - `memoria votacao 12`
//! - `memoria votos 12 --page 2`

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use anyhow::bail;
use clap::{Parser, Subcommand};
use mc_client::hooks::{ListHook, SingleHook};
use mc_client::{ApiClient, DeputadosQuery, VotacaoQuery, VotosQuery};
use memoria_civica_api::config::Config;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "memoria", version, about = "Consulta votações da Câmara dos Deputados")]
struct Cli {
    /// API base URL (overrides `client.base_url`)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List deputies
    Deputados {
        #[arg(long)]
        nome: Option<String>,
        #[arg(long)]
        partido: Option<String>,
        #[arg(long)]
        uf: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Show a vote session and its tally
    Votacao { id: u64 },
    /// List individual votes of a vote session
    Votos {
        id: u64,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.level)?)
        .with_writer(std::io::stderr)
        .init();

    let base_url = cli.base_url.unwrap_or(config.client.base_url);
    tracing::debug!(%base_url, "using API");
    let client = ApiClient::http(base_url);

    match cli.command {
        Command::Deputados {
            nome,
            partido,
            uf,
            page,
            per_page,
        } => {
            let query = DeputadosQuery {
                nome,
                partido,
                uf,
                page,
                per_page,
            };
            let state = ListHook::mounted(client, query).await.snapshot();
            if let Some(error) = state.error {
                bail!(error);
            }
            for deputado in &state.data {
                println!(
                    "{:>7}  {:<40} {:<14} {}",
                    deputado.id, deputado.nome, deputado.sigla_partido, deputado.uf
                );
            }
            if let Some(meta) = state.pagination {
                println!("página {} ({} por página), total {}", meta.page, meta.per_page, meta.total);
            }
        }
        Command::Votacao { id } => {
            let state = SingleHook::mounted(client, VotacaoQuery::new(id)).await.snapshot();
            if let Some(error) = state.error {
                bail!(error);
            }
            let Some(votacao) = state.data else {
                bail!("Votação não encontrada");
            };
            let pct = votacao.placar.percentages();
            println!("Votação {} ({})", votacao.id, votacao.data_hora.format("%d/%m/%Y %H:%M"));
            if let Some(proposicao) = &votacao.proposicao {
                println!("{}: {}", proposicao.referencia(), proposicao.ementa);
            }
            println!("Resultado: {}", votacao.resultado.label());
            println!("  Sim:    {:>3} ({}%)", votacao.placar.votos_sim, pct.sim);
            println!("  Não:    {:>3} ({}%)", votacao.placar.votos_nao, pct.nao);
            println!("  Outros: {:>3} ({}%)", votacao.placar.votos_outros, pct.outros);
        }
        Command::Votos { id, page, per_page } => {
            let query = VotosQuery {
                votacao_id: Some(id),
                page,
                per_page,
            };
            let state = ListHook::mounted(client, query).await.snapshot();
            if let Some(error) = state.error {
                bail!(error);
            }
            for voto in &state.data {
                let nome = voto.deputado.as_ref().map_or("?", |d| d.nome.as_str());
                println!("{:<40} {}", nome, voto.voto.label());
            }
            if let Some(meta) = state.pagination {
                println!("página {} ({} por página), total {}", meta.page, meta.per_page, meta.total);
            }
        }
    }

    Ok(())
}

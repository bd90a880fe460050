//! Deterministic in-memory fixtures.
//!
//! Every collection is generated once from a seed with [`StdRng`], so two
//! processes started with the same seed serve byte-identical responses.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use mc_model::{
    CategoriaCivica, Deputado, OrigemClassificacao, Orientacao, Placar, Proposicao,
    ProposicaoCategoria, ResultadoVotacao, TipoProposicao, Votacao, VotacaoProposicao,
    TOTAL_DEPUTADOS,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

pub const PROPOSICOES_COUNT: usize = 60;
pub const VOTACOES_COUNT: usize = 40;

const DEPUTADO_ID_BASE: u64 = 204_501;
const PROPOSICAO_ID_BASE: u64 = 2_340_001;
const VOTACAO_ID_BASE: u64 = 1;

/// Seats per state; the counts add up to [`TOTAL_DEPUTADOS`].
const BANCADAS_UF: &[(&str, u32)] = &[
    ("SP", 70),
    ("MG", 53),
    ("RJ", 46),
    ("BA", 39),
    ("RS", 31),
    ("PR", 30),
    ("PE", 25),
    ("CE", 22),
    ("MA", 18),
    ("GO", 17),
    ("PA", 17),
    ("SC", 16),
    ("PB", 12),
    ("ES", 10),
    ("PI", 10),
    ("AL", 9),
    ("AM", 8),
    ("DF", 8),
    ("MS", 8),
    ("MT", 8),
    ("RN", 8),
    ("RO", 8),
    ("SE", 8),
    ("TO", 8),
    ("AC", 8),
    ("AP", 8),
    ("RR", 8),
];

const PARTIDOS: &[&str] = &[
    "PL",
    "PT",
    "UNIÃO",
    "PP",
    "PSD",
    "MDB",
    "REPUBLICANOS",
    "PDT",
    "PSB",
    "PSDB",
    "PSOL",
    "PODE",
    "AVANTE",
    "PCdoB",
    "PV",
    "NOVO",
    "CIDADANIA",
    "SOLIDARIEDADE",
];

const PRENOMES: &[&str] = &[
    "Ana", "Antônio", "Beatriz", "Carlos", "Cláudia", "Daniel", "Eduardo", "Fernanda", "Gabriel",
    "Helena", "Isabel", "João", "José", "Juliana", "Luiz", "Márcia", "Maria", "Paulo", "Pedro",
    "Rafael", "Regina", "Ricardo", "Sônia", "Tereza", "Vinícius",
];

const SOBRENOMES: &[&str] = &[
    "Almeida", "Barbosa", "Cardoso", "Costa", "Dias", "Ferreira", "Gomes", "Lima", "Machado",
    "Martins", "Melo", "Nascimento", "Oliveira", "Pereira", "Ribeiro", "Rocha", "Santos", "Silva",
    "Souza", "Teixeira",
];

const ORGAOS: &[&str] = &["PLEN", "PLEN", "PLEN", "CCJC", "CFT", "CSAUDE"];

const ORIENTACOES: &[&str] = &["Sim", "Não", "Liberado", "Obstrução"];

const BANCADAS_EXTRA: &[&str] = &["GOV.", "Maioria", "Minoria", "Oposição"];

/// `(codigo, nome, descricao, icone)`
const CATEGORIAS: &[(&str, &str, &str, &str)] = &[
    ("saude", "Saúde", "Sistema Único de Saúde, medicamentos e vigilância sanitária", "heart-pulse"),
    ("educacao", "Educação", "Escolas, universidades, financiamento e carreira docente", "book-open"),
    ("seguranca", "Segurança Pública", "Polícias, sistema prisional e combate ao crime", "shield"),
    ("meio-ambiente", "Meio Ambiente", "Florestas, clima, saneamento e licenciamento", "leaf"),
    ("economia", "Economia", "Tributos, orçamento público e política fiscal", "trending-up"),
    ("trabalho", "Trabalho e Emprego", "Direitos trabalhistas, salário mínimo e emprego", "briefcase"),
    ("direitos-humanos", "Direitos Humanos", "Igualdade, minorias e garantias individuais", "users"),
    ("tecnologia", "Tecnologia", "Internet, dados pessoais e inovação", "cpu"),
    ("transporte", "Transporte", "Rodovias, mobilidade urbana e aviação", "bus"),
    ("cultura", "Cultura", "Patrimônio histórico, incentivo à cultura e esporte", "music"),
    ("agricultura", "Agricultura", "Agronegócio, agricultura familiar e reforma agrária", "sprout"),
    ("previdencia", "Previdência", "Aposentadorias, pensões e assistência social", "piggy-bank"),
];

/// `(categoria index, ementa)`
const TEMAS: &[(usize, &str)] = &[
    (0, "Dispõe sobre o atendimento prioritário no Sistema Único de Saúde"),
    (1, "Institui o piso salarial nacional dos profissionais da educação básica"),
    (2, "Altera o Código Penal para agravar penas de crimes cometidos com arma de fogo"),
    (3, "Estabelece normas gerais para o licenciamento ambiental"),
    (4, "Altera a legislação do Imposto sobre a Renda das Pessoas Físicas"),
    (5, "Dispõe sobre a política de valorização do salário mínimo"),
    (6, "Estabelece medidas de combate à discriminação no mercado de trabalho"),
    (7, "Institui a Lei Brasileira de Liberdade, Responsabilidade e Transparência na Internet"),
    (8, "Dispõe sobre o transporte público coletivo urbano"),
    (9, "Institui o marco regulatório do fomento à cultura"),
    (10, "Dispõe sobre o crédito rural para a agricultura familiar"),
    (11, "Altera regras de concessão de benefícios previdenciários"),
];

/// 2023-02-01T00:00:00Z, start of the 57th legislature.
const LEGISLATURA_INICIO: i64 = 1_675_209_600;

/// All collections served by the mock backend.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub deputados: Vec<Deputado>,
    pub proposicoes: Vec<Proposicao>,
    pub votacoes: Vec<Votacao>,
    pub categorias: Vec<CategoriaCivica>,
    pub proposicao_categorias: Vec<ProposicaoCategoria>,
    pub votacao_proposicoes: Vec<VotacaoProposicao>,
    pub orientacoes: Vec<Orientacao>,
}

impl Fixtures {
    /// Generate every collection from `seed`.
    #[must_use]
    pub fn generate(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let deputados = deputados(&mut rng);
        let categorias = categorias();
        let proposicoes = proposicoes(&mut rng, &deputados);
        let votacoes = votacoes(&mut rng, &proposicoes);
        let proposicao_categorias = proposicao_categorias(&mut rng, &proposicoes, &categorias);
        let votacao_proposicoes = votacao_proposicoes(&mut rng, &votacoes, &proposicoes);
        let orientacoes = orientacoes(&mut rng, &votacoes);

        tracing::debug!(
            seed,
            deputados = deputados.len(),
            proposicoes = proposicoes.len(),
            votacoes = votacoes.len(),
            "fixtures generated"
        );

        Self {
            deputados,
            proposicoes,
            votacoes,
            categorias,
            proposicao_categorias,
            votacao_proposicoes,
            orientacoes,
        }
    }
}

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

fn timestamp(offset_secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(LEGISLATURA_INICIO + offset_secs)
}

fn deputados(rng: &mut StdRng) -> Vec<Deputado> {
    let mut out = Vec::with_capacity(TOTAL_DEPUTADOS as usize);
    let seats = BANCADAS_UF
        .iter()
        .flat_map(|(uf, count)| std::iter::repeat(*uf).take(*count as usize));

    for (id, uf) in (DEPUTADO_ID_BASE..).zip(seats) {
        let nome = format!(
            "{} {} {}",
            pick(rng, PRENOMES),
            pick(rng, SOBRENOMES),
            pick(rng, SOBRENOMES)
        );
        let email = rng
            .gen_bool(0.9)
            .then(|| format!("dep.{id}@camara.leg.br"));

        out.push(Deputado {
            id,
            nome,
            sigla_partido: pick(rng, PARTIDOS).to_string(),
            uf: uf.to_string(),
            foto_url: format!("https://www.camara.leg.br/internet/deputado/bandep/{id}.jpg"),
            email,
        });
    }
    out
}

fn categorias() -> Vec<CategoriaCivica> {
    (1..)
        .zip(CATEGORIAS)
        .map(|(id, (codigo, nome, descricao, icone))| CategoriaCivica {
            id,
            codigo: (*codigo).to_string(),
            nome: (*nome).to_string(),
            descricao: (*descricao).to_string(),
            icone: Some((*icone).to_string()),
        })
        .collect()
}

fn tipo_for(index: usize) -> TipoProposicao {
    match index % 10 {
        0 => TipoProposicao::Pec,
        1 => TipoProposicao::Mpv,
        2 => TipoProposicao::Plp,
        3 => TipoProposicao::Pdl,
        _ => TipoProposicao::Pl,
    }
}

fn proposicoes(rng: &mut StdRng, deputados: &[Deputado]) -> Vec<Proposicao> {
    (0..PROPOSICOES_COUNT)
        .zip(PROPOSICAO_ID_BASE..)
        .map(|(index, id)| {
            let (_, ementa) = TEMAS[index % TEMAS.len()];
            let ano = rng.gen_range(2019..=2024);
            let autor = &deputados[rng.gen_range(0..deputados.len())];
            let simplificada = rng.gen_bool(0.7).then(|| {
                format!("Em linguagem simples: {}", ementa.to_lowercase())
            });

            Proposicao {
                id,
                tipo: tipo_for(index),
                numero: rng.gen_range(100..=5000),
                ano,
                ementa: ementa.to_string(),
                ementa_simplificada: simplificada,
                autor_id: Some(autor.id),
                data_apresentacao: NaiveDate::from_ymd_opt(
                    ano,
                    rng.gen_range(1..=12),
                    rng.gen_range(1..=28),
                ),
            }
        })
        .collect()
}

fn placar(rng: &mut StdRng) -> Placar {
    let sim = rng.gen_range(0..=TOTAL_DEPUTADOS);
    let nao = rng.gen_range(0..=TOTAL_DEPUTADOS - sim);
    Placar::new(sim, nao, TOTAL_DEPUTADOS - sim - nao)
}

fn votacoes(rng: &mut StdRng, proposicoes: &[Proposicao]) -> Vec<Votacao> {
    (0..VOTACOES_COUNT)
        .zip(VOTACAO_ID_BASE..)
        .map(|(index, id)| {
            let proposicao = &proposicoes[index % proposicoes.len()];
            let placar = placar(rng);
            let resultado = if placar.votos_sim > placar.votos_nao {
                ResultadoVotacao::Aprovado
            } else {
                ResultadoVotacao::Rejeitado
            };
            let week = i64::try_from(index).unwrap_or_default() * 7 * 86_400;
            let hour = rng.gen_range(14..=22) * 3_600;

            Votacao {
                id,
                proposicao_id: Some(proposicao.id),
                data_hora: timestamp(week + hour),
                resultado,
                placar,
                eh_nominal: Some(index % 5 != 4),
                descricao: Some(format!(
                    "Votação em turno único do {}",
                    proposicao.referencia()
                )),
                sigla_orgao: Some(pick(rng, ORGAOS).to_string()),
                proposicao: Some(proposicao.clone()),
            }
        })
        .collect()
}

fn proposicao_categorias(
    rng: &mut StdRng,
    proposicoes: &[Proposicao],
    categorias: &[CategoriaCivica],
) -> Vec<ProposicaoCategoria> {
    let mut out = Vec::new();

    for (index, proposicao) in proposicoes.iter().enumerate() {
        let (principal, _) = TEMAS[index % TEMAS.len()];
        let extra = rng.gen_range(0..=2);
        let mut chosen = vec![principal];
        for _ in 0..extra {
            let candidate = rng.gen_range(0..categorias.len());
            if !chosen.contains(&candidate) {
                chosen.push(candidate);
            }
        }

        for categoria_index in chosen {
            let categoria = &categorias[categoria_index];
            let automatica = rng.gen_bool(0.5);
            let confianca = automatica.then(|| f64::from(rng.gen_range(50..=99_u32)) / 100.0);
            let origem = if automatica {
                OrigemClassificacao::Automatica
            } else {
                OrigemClassificacao::Manual
            };

            out.push(ProposicaoCategoria {
                id: out.len() as u64 + 1,
                proposicao_id: proposicao.id,
                categoria_id: categoria.id,
                origem,
                confianca,
                created_at: timestamp(rng.gen_range(0..30_000_000)),
                categoria: Some(categoria.clone()),
            });
        }
    }
    out
}

fn link(
    id: u64,
    votacao: &Votacao,
    proposicao: &Proposicao,
    eh_principal: bool,
) -> VotacaoProposicao {
    VotacaoProposicao {
        id,
        votacao_id: votacao.id,
        proposicao_id: proposicao.id,
        titulo: Some(proposicao.referencia()),
        ementa: Some(proposicao.ementa.clone()),
        tipo: Some(proposicao.tipo.clone()),
        numero: Some(proposicao.numero),
        ano: Some(proposicao.ano),
        eh_principal,
        created_at: votacao.data_hora,
    }
}

fn votacao_proposicoes(
    rng: &mut StdRng,
    votacoes: &[Votacao],
    proposicoes: &[Proposicao],
) -> Vec<VotacaoProposicao> {
    let mut out = Vec::new();

    for votacao in votacoes {
        let principal = votacao
            .proposicao_id
            .and_then(|id| proposicoes.iter().find(|p| p.id == id));
        let Some(principal) = principal else {
            continue;
        };
        out.push(link(out.len() as u64 + 1, votacao, principal, true));

        for _ in 0..rng.gen_range(0..=2) {
            let apensada = &proposicoes[rng.gen_range(0..proposicoes.len())];
            let already_linked = out
                .iter()
                .any(|l| l.votacao_id == votacao.id && l.proposicao_id == apensada.id);
            if !already_linked {
                out.push(link(out.len() as u64 + 1, votacao, apensada, false));
            }
        }
    }
    out
}

fn orientacoes(rng: &mut StdRng, votacoes: &[Votacao]) -> Vec<Orientacao> {
    let mut out = Vec::new();
    let bancadas = PARTIDOS.iter().take(9).chain(BANCADAS_EXTRA);

    for votacao in votacoes {
        for bancada in bancadas.clone() {
            out.push(Orientacao {
                id: out.len() as u64 + 1,
                votacao_id: votacao.id,
                sigla_bancada: (*bancada).to_string(),
                orientacao: pick(rng, ORIENTACOES).to_string(),
                created_at: votacao.data_hora,
            });
        }
    }
    out
}

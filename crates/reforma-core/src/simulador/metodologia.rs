use super::consultas::{RegistroConsultas, Tabela};
use super::entrada::SimuladorInput;
use super::resultado::Metodologia;
use crate::dominio::{Confianca, RegimeTributario};
use crate::referencia::TabelasReferencia;

const LIMITACAO_GERAL: &str = "Estimativa simplificada baseada em faixas médias de carga; \
     não substitui análise contábil nem parecer jurídico.";

const LIMITACAO_REGIME_DESCONHECIDO: &str =
    "Regime não informado: a projeção usa a faixa média entre regimes.";

fn fontes_da_tabela(tabela: Tabela) -> &'static [&'static str] {
    match tabela {
        Tabela::Setores => &["LC 214/2025: reduções de alíquota e regimes específicos por setor"],
        Tabela::Regimes => &[
            "Receita Federal, Carga Tributária no Brasil: carga de tributos sobre consumo por regime",
        ],
        Tabela::Icms => &[
            "Alíquotas modais de ICMS por UF (legislação estadual, 2025)",
            "IBGE, Contas Regionais: PIB estadual usado na referência nacional ponderada",
        ],
        Tabela::Cronograma => &["EC 132/2023: cronograma de transição 2026-2033"],
    }
}

fn limitacao_da_tabela(tabela: Tabela) -> Option<&'static str> {
    match tabela {
        Tabela::Setores => Some(
            "O fator de efetividade é uma média setorial e não mede a conformidade da empresa.",
        ),
        Tabela::Regimes => Some(
            "As faixas de carga por regime não consideram benefícios fiscais individuais nem \
             créditos acumulados.",
        ),
        Tabela::Icms => Some(
            "A alíquota modal de ICMS ignora substituição tributária, benefícios e alíquotas \
             diferenciadas por produto.",
        ),
        Tabela::Cronograma => None,
    }
}

/// Confidence from the lookup record.
///
/// `NaoSei` is always `baixa`. Otherwise count the degraded dimensions
/// (sector row, state row when the ICMS table was used, the declared
/// regime's row): none is `alta`, one is `media`, more is `baixa`.
pub fn avaliar_confianca(input: &SimuladorInput, registro: &RegistroConsultas) -> Confianca {
    if input.regime == RegimeTributario::NaoSei {
        return Confianca::Baixa;
    }
    let degradadas = [
        registro.degradou(Tabela::Setores, input.setor.codigo()),
        registro.degradou(Tabela::Icms, input.uf.sigla()),
        registro.degradou(Tabela::Regimes, input.regime.codigo()),
    ]
    .into_iter()
    .filter(|d| *d)
    .count();

    match degradadas {
        0 => Confianca::Alta,
        1 => Confianca::Media,
        _ => Confianca::Baixa,
    }
}

pub fn anotar(
    input: &SimuladorInput,
    registro: &RegistroConsultas,
    tabelas: &TabelasReferencia,
) -> Metodologia {
    let confianca = avaliar_confianca(input, registro);
    let consultadas = registro.tabelas();

    let fontes: Vec<String> = consultadas
        .iter()
        .flat_map(|t| fontes_da_tabela(*t).iter())
        .map(|s| s.to_string())
        .collect();

    let mut limitacoes = vec![LIMITACAO_GERAL.to_string()];
    limitacoes.extend(
        consultadas
            .iter()
            .filter_map(|t| limitacao_da_tabela(*t))
            .map(str::to_string),
    );
    if input.regime == RegimeTributario::NaoSei {
        limitacoes.push(LIMITACAO_REGIME_DESCONHECIDO.to_string());
    }
    limitacoes.extend(
        registro
            .degradadas()
            .filter(|e| e.tabela != Tabela::Regimes || e.chave != RegimeTributario::NaoSei.codigo())
            .map(|e| {
                format!(
                    "Sem dados específicos de {} para '{}'; foi usado o valor padrão.",
                    e.tabela.nome(),
                    e.chave
                )
            }),
    );

    let motivo = match confianca {
        Confianca::Alta => "todas as consultas encontraram dados específicos",
        Confianca::Media => "uma das dimensões usou valor padrão",
        Confianca::Baixa if input.regime == RegimeTributario::NaoSei => "regime tributário não informado",
        Confianca::Baixa => "várias dimensões usaram valores padrão",
    };
    let resumo = format!(
        "Projeção para {} em {} ({}, {}) com as tabelas de referência {}. Confiança {}: {}.",
        input.setor.nome(),
        input.uf.nome(),
        input.regime.nome(),
        input.faturamento.nome(),
        tabelas.versao(),
        confianca.rotulo(),
        motivo
    );

    Metodologia {
        confianca,
        resumo,
        fontes,
        limitacoes,
        ultima_atualizacao: tabelas.atualizado_em(),
    }
}

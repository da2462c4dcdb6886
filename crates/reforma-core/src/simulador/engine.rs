use std::time::Instant;

use super::comparativo::{ajuste_icms, comparar_regimes};
use super::consultas::{RegistroConsultas, Tabela};
use super::efetividade::calcular_efetividade;
use super::entrada::SimuladorInput;
use super::metodologia::anotar;
use super::resultado::SimuladorResult;
use super::risco::{gerar_alertas, impacto_anual, projetar_regime, ContextoAlertas};
use super::timeline::gerar_timeline;
use crate::referencia::{tabelas_atuais, TabelasReferencia};
use crate::types::{with_metadata, ComputationOutput};

/// Run a simulation against the active reference tables.
///
/// Total for every enum-valid input: missing reference rows degrade the
/// confidence tier instead of failing.
pub fn simular(input: &SimuladorInput) -> SimuladorResult {
    let tabelas = tabelas_atuais();
    simular_com(&tabelas, input)
}

/// Run a simulation against an explicit table set.
pub fn simular_com(tabelas: &TabelasReferencia, input: &SimuladorInput) -> SimuladorResult {
    let _span = tracing::debug_span!(
        "simular",
        setor = input.setor.codigo(),
        uf = input.uf.sigla(),
        regime = input.regime.codigo(),
        faixa = input.faturamento.codigo(),
    )
    .entered();

    let mut registro = RegistroConsultas::new();

    let perfil = registro.registrar(
        Tabela::Setores,
        input.setor.codigo(),
        tabelas.perfil_setor(input.setor),
    );

    // Headline projection for the declared regime
    let projecao = projetar_regime(tabelas, input.regime, &perfil, &mut registro);
    let impacto = impacto_anual(&projecao, input.faturamento);

    let efetividade = calcular_efetividade(&projecao.faixa, &perfil, input.regime);

    let comparativo = comparar_regimes(tabelas, &perfil, &mut registro);
    let ajuste = ajuste_icms(tabelas, &perfil, input.uf, &mut registro);

    let timeline = gerar_timeline(tabelas, projecao.nivel, &mut registro);

    let alertas = gerar_alertas(&ContextoAlertas {
        input,
        perfil: &perfil,
        projecao: &projecao,
        registro: &registro,
    });

    let metodologia = anotar(input, &registro, tabelas);

    tracing::debug!(
        nivel = %projecao.nivel,
        confianca = %metodologia.confianca,
        defaulted = registro.degradadas().count(),
        "simulation complete"
    );

    SimuladorResult {
        nivel_risco: projecao.nivel,
        impacto_anual: impacto,
        alertas,
        efetividade_tributaria: efetividade,
        comparativo_regimes: comparativo,
        ajuste_icms: ajuste,
        metodologia,
        timeline,
    }
}

/// [`simular`] wrapped in the standard output envelope. Alerts are repeated
/// as envelope warnings.
pub fn simular_com_metadados(input: &SimuladorInput) -> ComputationOutput<SimuladorResult> {
    let start = Instant::now();
    let tabelas = tabelas_atuais();
    let result = simular_com(&tabelas, input);

    let assumptions = serde_json::json!({
        "regime": input.regime,
        "setor": input.setor,
        "faturamento": input.faturamento,
        "receita_representativa": input.faturamento.receita_representativa().to_string(),
        "uf": input.uf,
        "referencia_icms_nacional": tabelas.referencia_nacional().round_dp(4).to_string(),
        "receita_referencia_efetividade": super::efetividade::RECEITA_REFERENCIA.to_string(),
    });

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Sector-adjusted regime burden ranges, PIB-weighted ICMS reference and \
         effectiveness-gap formalization model",
        &assumptions,
        result.alertas.clone(),
        elapsed,
        tabelas.versao(),
        result,
    )
}

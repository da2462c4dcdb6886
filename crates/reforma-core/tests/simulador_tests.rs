use pretty_assertions::assert_eq;
use reforma_core::dominio::{
    Confianca, DirecaoAjuste, FaixaFaturamento, NivelRisco, RegimeTributario, Setor, UF,
};
use reforma_core::referencia::TabelasReferencia;
use reforma_core::simulador::{simular_com, SimuladorInput, SimuladorResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Helpers
// ===========================================================================

fn entrada(
    regime: RegimeTributario,
    setor: Setor,
    faixa: FaixaFaturamento,
    uf: UF,
) -> SimuladorInput {
    SimuladorInput::new(regime, setor, faixa, uf)
}

fn grade() -> impl Iterator<Item = SimuladorInput> {
    Setor::TODOS.into_iter().flat_map(|setor| {
        UF::TODAS.into_iter().flat_map(move |uf| {
            RegimeTributario::TODOS.into_iter().flat_map(move |regime| {
                FaixaFaturamento::TODAS
                    .into_iter()
                    .map(move |faixa| entrada(regime, setor, faixa, uf))
            })
        })
    })
}

fn sem_setor(setor: Setor) -> TabelasReferencia {
    let mut brutas = TabelasReferencia::padrao().into_brutas();
    brutas.setores.remove(&setor);
    TabelasReferencia::new(brutas).unwrap()
}

// ===========================================================================
// Reference scenarios
// ===========================================================================

#[test]
fn test_simples_varejo_epp_sao_paulo() {
    let t = TabelasReferencia::padrao();
    let r = simular_com(
        &t,
        &entrada(
            RegimeTributario::Simples,
            Setor::Varejo,
            FaixaFaturamento::Epp,
            UF::SP,
        ),
    );

    assert_eq!(r.nivel_risco, NivelRisco::Medio);
    assert_eq!(r.impacto_anual.percentual, dec!(2.5));
    // 0.25 p.p. on R$ 2.4M representative revenue
    assert_eq!(r.impacto_anual.valor_anual, Some(dec!(6000)));
    assert_eq!(r.metodologia.confianca, Confianca::Alta);
    assert!(r.alertas.is_empty());

    assert_eq!(r.comparativo_regimes.len(), 3);
    let regimes: Vec<_> = r.comparativo_regimes.iter().map(|l| l.regime).collect();
    assert_eq!(regimes, RegimeTributario::CONHECIDOS.to_vec());

    let icms = r.ajuste_icms.expect("varejo is in the ICMS base");
    assert_eq!(icms.uf_nome, "São Paulo");
    assert_eq!(icms.icms_rate, dec!(18));
    assert_eq!(icms.icms_referencia, dec!(18.91));
    assert_eq!(icms.direcao, DirecaoAjuste::Favoravel);
    assert!(icms.narrative.contains("São Paulo"));

    assert!(!r.timeline.entries.is_empty());
    assert_eq!(r.metodologia.ultima_atualizacao, t.atualizado_em());
}

#[test]
fn test_unknown_regime_keeps_comparison_and_icms() {
    let t = TabelasReferencia::padrao();
    let conhecido = simular_com(
        &t,
        &entrada(
            RegimeTributario::Simples,
            Setor::Varejo,
            FaixaFaturamento::Epp,
            UF::SP,
        ),
    );
    let r = simular_com(
        &t,
        &entrada(
            RegimeTributario::NaoSei,
            Setor::Varejo,
            FaixaFaturamento::Epp,
            UF::SP,
        ),
    );

    assert_eq!(r.metodologia.confianca, Confianca::Baixa);
    let ultimo = r.alertas.last().expect("advisory alert");
    assert!(ultimo.contains("não informado"));
    assert_eq!(r.comparativo_regimes, conhecido.comparativo_regimes);
    assert_eq!(r.ajuste_icms, conhecido.ajuste_icms);
}

#[test]
fn test_services_presumido_is_critical_with_alerts_in_order() {
    let t = TabelasReferencia::padrao();
    let r = simular_com(
        &t,
        &entrada(
            RegimeTributario::LucroPresumido,
            Setor::Servicos,
            FaixaFaturamento::Medio,
            UF::RJ,
        ),
    );
    assert_eq!(r.nivel_risco, NivelRisco::Critico);
    assert_eq!(r.impacto_anual.percentual, dec!(35));
    assert!(r.ajuste_icms.is_none());
    assert!(r.alertas[0].starts_with("Risco crítico"));
    assert!(r.alertas[1].contains("alíquota padrão"));
}

#[test]
fn test_industry_gets_selective_tax_alert() {
    let t = TabelasReferencia::padrao();
    let r = simular_com(
        &t,
        &entrada(
            RegimeTributario::LucroPresumido,
            Setor::Industria,
            FaixaFaturamento::Medio,
            UF::SP,
        ),
    );
    assert_eq!(r.alertas.len(), 1);
    assert!(r.alertas[0].contains("Imposto Seletivo"));

    let simples = simular_com(
        &t,
        &entrada(
            RegimeTributario::Simples,
            Setor::Industria,
            FaixaFaturamento::Grande,
            UF::SP,
        ),
    );
    let posicao = |trecho: &str| simples.alertas.iter().position(|a| a.contains(trecho));
    assert_eq!(posicao("Imposto Seletivo"), Some(0));
    assert_eq!(posicao("teto do Simples"), Some(1));
}

#[test]
fn test_simples_above_ceiling_is_flagged() {
    let t = TabelasReferencia::padrao();
    let r = simular_com(
        &t,
        &entrada(
            RegimeTributario::Simples,
            Setor::Varejo,
            FaixaFaturamento::Grande,
            UF::SP,
        ),
    );
    assert!(r.alertas.iter().any(|a| a.contains("teto do Simples")));
}

#[test]
fn test_mei_has_no_annual_value() {
    let t = TabelasReferencia::padrao();
    let r = simular_com(
        &t,
        &entrada(
            RegimeTributario::Simples,
            Setor::Varejo,
            FaixaFaturamento::Mei,
            UF::SP,
        ),
    );
    assert_eq!(r.impacto_anual.valor_anual, None);
    let json = serde_json::to_value(&r).unwrap();
    assert!(json["impactoAnual"].get("valorAnual").is_none());
}

// ===========================================================================
// Degraded reference data
// ===========================================================================

#[test]
fn test_missing_sector_row_degrades_to_media() {
    let t = sem_setor(Setor::Varejo);
    let r = simular_com(
        &t,
        &entrada(
            RegimeTributario::LucroReal,
            Setor::Varejo,
            FaixaFaturamento::Epp,
            UF::SP,
        ),
    );
    assert_eq!(r.metodologia.confianca, Confianca::Media);
    assert!(r
        .alertas
        .iter()
        .any(|a| a.contains("Dados de referência ausentes")));
}

#[test]
fn test_missing_sector_and_regime_rows_degrade_to_baixa() {
    let mut brutas = TabelasReferencia::padrao().into_brutas();
    brutas.setores.remove(&Setor::Varejo);
    brutas.regimes.remove(&RegimeTributario::LucroReal);
    let t = TabelasReferencia::new(brutas).unwrap();
    let r = simular_com(
        &t,
        &entrada(
            RegimeTributario::LucroReal,
            Setor::Varejo,
            FaixaFaturamento::Epp,
            UF::AC,
        ),
    );
    assert_eq!(r.metodologia.confianca, Confianca::Baixa);
    // the default profile sits outside the ICMS base
    assert!(r.ajuste_icms.is_none());
}

#[test]
fn test_missing_state_row_uses_national_reference() {
    let mut brutas = TabelasReferencia::padrao().into_brutas();
    brutas.icms.remove(&UF::AC);
    let t = TabelasReferencia::new(brutas).unwrap();
    let r = simular_com(
        &t,
        &entrada(
            RegimeTributario::LucroReal,
            Setor::Varejo,
            FaixaFaturamento::Epp,
            UF::AC,
        ),
    );
    assert_eq!(r.metodologia.confianca, Confianca::Media);
    let icms = r.ajuste_icms.expect("varejo is in the ICMS base");
    assert_eq!(icms.icms_rate, icms.icms_referencia);
    assert_eq!(icms.direcao, DirecaoAjuste::Neutro);
}

#[test]
fn test_missing_state_row_ignored_outside_icms_base() {
    let mut brutas = TabelasReferencia::padrao().into_brutas();
    brutas.icms.remove(&UF::AC);
    let t = TabelasReferencia::new(brutas).unwrap();
    let r = simular_com(
        &t,
        &entrada(
            RegimeTributario::LucroReal,
            Setor::Tecnologia,
            FaixaFaturamento::Epp,
            UF::AC,
        ),
    );
    assert_eq!(r.metodologia.confianca, Confianca::Alta);
    assert!(r.ajuste_icms.is_none());
}

// ===========================================================================
// Whole-grid properties
// ===========================================================================

#[test]
fn test_deterministic() {
    let t = TabelasReferencia::padrao();
    for input in grade().step_by(37) {
        assert_eq!(simular_com(&t, &input), simular_com(&t, &input));
    }
}

#[test]
fn test_grid_invariants() {
    let t = TabelasReferencia::padrao();
    let resultados: Vec<(SimuladorInput, SimuladorResult)> =
        grade().map(|i| (i, simular_com(&t, &i))).collect();
    assert_eq!(resultados.len(), 12 * 27 * 4 * 5);

    for (input, r) in &resultados {
        assert_eq!(
            r.ajuste_icms.is_some(),
            t.setor_tributado_icms(input.setor),
            "ICMS presence for {input:?}"
        );
        assert_eq!(r.comparativo_regimes.len(), 3);
        assert_eq!(
            r.impacto_anual.valor_anual.is_none(),
            input.faturamento == FaixaFaturamento::Mei
        );
        assert!(r.efetividade_tributaria.impacto_formalizacao >= Decimal::ZERO);
        assert!(r.efetividade_tributaria.fator_efetividade > Decimal::ZERO);
        assert!(r.efetividade_tributaria.fator_efetividade <= Decimal::ONE);
        let esperado = if input.regime == RegimeTributario::NaoSei {
            Confianca::Baixa
        } else {
            Confianca::Alta
        };
        assert_eq!(r.metodologia.confianca, esperado);
        if input.regime == RegimeTributario::NaoSei {
            assert!(!r.alertas.is_empty());
        }
    }
}

#[test]
fn test_risk_level_monotonic_in_percentual() {
    let t = TabelasReferencia::padrao();
    let mut pares: Vec<(Decimal, NivelRisco)> = grade()
        .map(|i| simular_com(&t, &i))
        .flat_map(|r| {
            let mut v = vec![(r.impacto_anual.percentual, r.nivel_risco)];
            v.extend(r.comparativo_regimes.iter().map(|l| (l.percentual, l.risco)));
            v
        })
        .collect();
    pares.sort();
    for janela in pares.windows(2) {
        assert!(janela[0].1 <= janela[1].1, "{:?} then {:?}", janela[0], janela[1]);
    }
}

#[test]
fn test_result_json_shape() {
    let t = TabelasReferencia::padrao();
    let r = simular_com(
        &t,
        &entrada(
            RegimeTributario::LucroReal,
            Setor::Industria,
            FaixaFaturamento::Grande,
            UF::MG,
        ),
    );
    let json = serde_json::to_value(&r).unwrap();
    for chave in [
        "nivelRisco",
        "impactoAnual",
        "alertas",
        "efetividadeTributaria",
        "comparativoRegimes",
        "ajusteIcms",
        "metodologia",
        "timeline",
    ] {
        assert!(json.get(chave).is_some(), "missing {chave}");
    }
    assert_eq!(json["ajusteIcms"]["uf"], "MG");
    let de_volta: SimuladorResult = serde_json::from_value(json).unwrap();
    assert_eq!(de_volta, r);
}

#[test]
fn test_icms_direction_monotonic_across_states() {
    let t = TabelasReferencia::padrao();
    let mut ajustes: Vec<_> = UF::TODAS
        .into_iter()
        .filter_map(|uf| {
            simular_com(
                &t,
                &entrada(
                    RegimeTributario::LucroReal,
                    Setor::Atacado,
                    FaixaFaturamento::Medio,
                    uf,
                ),
            )
            .ajuste_icms
        })
        .collect();
    assert_eq!(ajustes.len(), UF::TODAS.len());
    ajustes.sort_by(|a, b| a.ajuste_pp.cmp(&b.ajuste_pp));
    for par in ajustes.windows(2) {
        assert!(par[0].direcao.ordem() <= par[1].direcao.ordem());
    }
}

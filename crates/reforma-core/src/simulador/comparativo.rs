use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::consultas::{RegistroConsultas, Tabela};
use super::formato;
use super::resultado::{AjusteIcms, LinhaComparativo};
use super::risco::projetar_regime;
use crate::dominio::{DirecaoAjuste, RegimeTributario, UF};
use crate::referencia::{PerfilSetor, TabelasReferencia};
use crate::types::Pct;

/// Half-width of the band, in percentage points, where a state's ICMS rate
/// counts as equal to the national reference.
pub const EPSILON_NEUTRO: Pct = dec!(0.3);

// ---------------------------------------------------------------------------
// Regime comparison
// ---------------------------------------------------------------------------

/// One row per concrete regime, whatever regime the caller declared.
pub fn comparar_regimes(
    tabelas: &TabelasReferencia,
    perfil: &PerfilSetor,
    registro: &mut RegistroConsultas,
) -> Vec<LinhaComparativo> {
    RegimeTributario::CONHECIDOS
        .iter()
        .map(|regime| {
            let p = projetar_regime(tabelas, *regime, perfil, registro);
            LinhaComparativo {
                regime: *regime,
                regime_nome: regime.nome().to_string(),
                carga_atual_min: p.faixa.atual_min.round_dp(2),
                carga_atual_max: p.faixa.atual_max.round_dp(2),
                carga_nova_min: p.faixa.projetada_min.round_dp(2),
                carga_nova_max: p.faixa.projetada_max.round_dp(2),
                risco: p.nivel,
                percentual: p.percentual.round_dp(2),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// ICMS adjustment
// ---------------------------------------------------------------------------

/// Classify a state rate's distance from the national reference.
pub fn classificar_direcao(ajuste_pp: Pct) -> DirecaoAjuste {
    if ajuste_pp.abs() <= EPSILON_NEUTRO {
        DirecaoAjuste::Neutro
    } else if ajuste_pp < Decimal::ZERO {
        DirecaoAjuste::Favoravel
    } else {
        DirecaoAjuste::Desfavoravel
    }
}

/// `None` for sectors outside the ICMS base; the ICMS table is not consulted
/// for them at all.
pub fn ajuste_icms(
    tabelas: &TabelasReferencia,
    perfil: &PerfilSetor,
    uf: UF,
    registro: &mut RegistroConsultas,
) -> Option<AjusteIcms> {
    if !perfil.tributado_icms {
        return None;
    }

    let aliquota = registro.registrar(Tabela::Icms, uf.sigla(), tabelas.icms_modal(uf));
    let referencia = tabelas.referencia_nacional();
    let ajuste_pp = aliquota.aliquota - referencia;
    let direcao = classificar_direcao(ajuste_pp);
    let efeito_valor_agregado = ajuste_pp.abs() * perfil.margem_bruta;

    let conclusao = match direcao {
        DirecaoAjuste::Favoravel => format!(
            "A base estadual mais leve deixa a empresa em posição favorável na transição para o IBS \
             (cerca de {} da receita, considerando margem bruta de {}).",
            formato::pp(efeito_valor_agregado),
            formato::pct(perfil.margem_bruta * dec!(100))
        ),
        DirecaoAjuste::Desfavoravel => format!(
            "A base estadual mais pesada torna a transição para o IBS desfavorável até a extinção \
             do ICMS em 2033 (cerca de {} da receita, considerando margem bruta de {}).",
            formato::pp(efeito_valor_agregado),
            formato::pct(perfil.margem_bruta * dec!(100))
        ),
        DirecaoAjuste::Neutro => format!(
            "A diferença está dentro da faixa de neutralidade de ±{}.",
            formato::pp(EPSILON_NEUTRO)
        ),
    };
    let posicao = if ajuste_pp.round_dp(2).is_zero() {
        "igual à".to_string()
    } else if ajuste_pp < Decimal::ZERO {
        format!("{} abaixo da", formato::pp(ajuste_pp.abs()))
    } else {
        format!("{} acima da", formato::pp(ajuste_pp.abs()))
    };
    let narrative = format!(
        "Em {}, a alíquota modal de ICMS ({}) está {} referência nacional ({}). {}",
        uf.nome(),
        formato::pct(aliquota.aliquota),
        posicao,
        formato::pct(referencia),
        conclusao
    );

    Some(AjusteIcms {
        uf,
        uf_nome: uf.nome().to_string(),
        icms_rate: aliquota.aliquota.round_dp(2),
        icms_referencia: referencia.round_dp(2),
        margem_bruta: perfil.margem_bruta,
        ajuste_pp: ajuste_pp.round_dp(2),
        direcao,
        narrative,
        fonte: aliquota.fonte,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dominio::Setor;

    fn perfil(t: &TabelasReferencia, setor: Setor) -> PerfilSetor {
        t.perfil_setor(setor).valor
    }

    #[test]
    fn test_always_three_rows_in_fixed_order() {
        let t = TabelasReferencia::padrao();
        let mut r = RegistroConsultas::new();
        let linhas = comparar_regimes(&t, &perfil(&t, Setor::Tecnologia), &mut r);
        let regimes: Vec<_> = linhas.iter().map(|l| l.regime).collect();
        assert_eq!(regimes, RegimeTributario::CONHECIDOS.to_vec());
    }

    #[test]
    fn test_direction_band() {
        assert_eq!(classificar_direcao(dec!(0.3)), DirecaoAjuste::Neutro);
        assert_eq!(classificar_direcao(dec!(-0.3)), DirecaoAjuste::Neutro);
        assert_eq!(classificar_direcao(dec!(0.31)), DirecaoAjuste::Desfavoravel);
        assert_eq!(classificar_direcao(dec!(-0.31)), DirecaoAjuste::Favoravel);
    }

    #[test]
    fn test_sao_paulo_is_favorable() {
        let t = TabelasReferencia::padrao();
        let mut r = RegistroConsultas::new();
        let a = ajuste_icms(&t, &perfil(&t, Setor::Varejo), UF::SP, &mut r).unwrap();
        assert_eq!(a.uf_nome, "São Paulo");
        assert_eq!(a.icms_rate, dec!(18));
        assert_eq!(a.icms_referencia, dec!(18.91));
        assert_eq!(a.ajuste_pp, dec!(-0.91));
        assert_eq!(a.direcao, DirecaoAjuste::Favoravel);
        assert!(a.narrative.starts_with("Em São Paulo"));
    }

    #[test]
    fn test_rio_is_unfavorable_and_goias_neutral() {
        let t = TabelasReferencia::padrao();
        let mut r = RegistroConsultas::new();
        let p = perfil(&t, Setor::Industria);
        let rj = ajuste_icms(&t, &p, UF::RJ, &mut r).unwrap();
        assert_eq!(rj.direcao, DirecaoAjuste::Desfavoravel);
        let go = ajuste_icms(&t, &p, UF::GO, &mut r).unwrap();
        assert_eq!(go.direcao, DirecaoAjuste::Neutro);
    }

    #[test]
    fn test_state_at_reference_reads_as_equal() {
        let mut brutas = TabelasReferencia::padrao().into_brutas();
        brutas.icms.remove(&UF::AC);
        let t = TabelasReferencia::new(brutas).unwrap();
        let mut r = RegistroConsultas::new();
        let a = ajuste_icms(&t, &perfil(&t, Setor::Varejo), UF::AC, &mut r).unwrap();
        assert_eq!(a.ajuste_pp, Decimal::ZERO);
        assert!(a.narrative.contains("está igual à referência nacional"));
        assert!(!a.narrative.contains("acima"));
        assert!(!a.narrative.contains("abaixo"));
    }

    #[test]
    fn test_narrative_states_the_gap() {
        let t = TabelasReferencia::padrao();
        let mut r = RegistroConsultas::new();
        let sp = ajuste_icms(&t, &perfil(&t, Setor::Varejo), UF::SP, &mut r).unwrap();
        assert!(sp.narrative.contains("0,91 p.p. abaixo da referência nacional"));
        let rj = ajuste_icms(&t, &perfil(&t, Setor::Varejo), UF::RJ, &mut r).unwrap();
        assert!(rj.narrative.contains("acima da referência nacional"));
    }

    #[test]
    fn test_service_sector_skips_icms_table() {
        let t = TabelasReferencia::padrao();
        let mut r = RegistroConsultas::new();
        assert!(ajuste_icms(&t, &perfil(&t, Setor::Saude), UF::SP, &mut r).is_none());
        assert!(!r.consultou(Tabela::Icms));
    }
}

//! Legal vs. effective burden.
//!
//! Today part of the legally owed tax is never collected. Split payment and
//! the unified CBS/IBS base shrink that gap, so a business that pays less
//! than the legal burden faces an extra increase on top of the rate change.
//! The model expresses both effects in money on a fixed reference revenue.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::formato;
use super::resultado::EfetividadeTributaria;
use crate::dominio::{PressaoFormalizacao, RegimeTributario};
use crate::referencia::{FaixaCarga, PerfilSetor};
use crate::types::{Money, Rate};

/// Revenue the monetary deltas are expressed on.
pub const RECEITA_REFERENCIA: Money = dec!(1_000_000);

/// Share of today's compliance gap closed under the new enforcement.
pub const CONVERGENCIA_FORMALIZACAO: Rate = dec!(0.6);

pub const FATOR_EFETIVIDADE_MINIMO: Rate = dec!(0.01);

/// Gap (1 - factor) above which pressure is at least `moderada`.
pub const LIMIAR_PRESSAO_MODERADA: Rate = dec!(0.05);
pub const LIMIAR_PRESSAO_ALTA: Rate = dec!(0.15);
pub const LIMIAR_PRESSAO_MUITO_ALTA: Rate = dec!(0.25);

/// Regime multiplier on the sector effectiveness factor.
pub fn ajuste_regime(regime: RegimeTributario) -> Rate {
    match regime {
        RegimeTributario::Simples => dec!(0.95),
        RegimeTributario::LucroPresumido => dec!(1.00),
        RegimeTributario::LucroReal => dec!(1.05),
        RegimeTributario::NaoSei => dec!(1.00),
    }
}

/// Sector factor times regime multiplier, clamped to (0, 1].
pub fn fator_efetividade(perfil: &PerfilSetor, regime: RegimeTributario) -> Rate {
    (perfil.fator_efetividade * ajuste_regime(regime)).clamp(FATOR_EFETIVIDADE_MINIMO, Decimal::ONE)
}

pub fn classificar_pressao(lacuna: Rate) -> PressaoFormalizacao {
    if lacuna > LIMIAR_PRESSAO_MUITO_ALTA {
        PressaoFormalizacao::MuitoAlta
    } else if lacuna > LIMIAR_PRESSAO_ALTA {
        PressaoFormalizacao::Alta
    } else if lacuna > LIMIAR_PRESSAO_MODERADA {
        PressaoFormalizacao::Moderada
    } else {
        PressaoFormalizacao::Baixa
    }
}

/// Factor after the reform closes part of the gap. Never below `fator`.
pub fn fator_pos_reforma(fator: Rate) -> Rate {
    fator + (Decimal::ONE - fator) * CONVERGENCIA_FORMALIZACAO
}

/// `faixa` is the sector-adjusted range of the simulated regime.
pub fn calcular_efetividade(
    faixa: &FaixaCarga,
    perfil: &PerfilSetor,
    regime: RegimeTributario,
) -> EfetividadeTributaria {
    let fator = fator_efetividade(perfil, regime);
    let carga_legal = faixa.atual_media();
    let carga_nova = faixa.projetada_media();
    let carga_efetiva = carga_legal * fator;

    let impacto_aliquota = RECEITA_REFERENCIA * (carga_nova - carga_legal) / dec!(100) * fator;
    let ganho_formalizacao = (fator_pos_reforma(fator) - fator).max(Decimal::ZERO);
    let impacto_formalizacao =
        (RECEITA_REFERENCIA * carga_nova.max(Decimal::ZERO) / dec!(100) * ganho_formalizacao)
            .max(Decimal::ZERO);
    let impacto_total = impacto_aliquota + impacto_formalizacao;
    let pressao = classificar_pressao(Decimal::ONE - fator);

    let narrative = narrativa(
        carga_legal,
        carga_efetiva,
        fator,
        impacto_aliquota,
        impacto_formalizacao,
        impacto_total,
        pressao,
    );

    EfetividadeTributaria {
        fator_efetividade: fator.round_dp(4),
        carga_efetiva_pct: carga_efetiva.round_dp(2),
        carga_legal_pct: carga_legal.round_dp(2),
        impacto_aliquota: impacto_aliquota.round_dp(2),
        impacto_formalizacao: impacto_formalizacao.round_dp(2),
        impacto_total: impacto_total.round_dp(2),
        pressao_formalizacao: pressao,
        narrative,
    }
}

fn narrativa(
    carga_legal: Decimal,
    carga_efetiva: Decimal,
    fator: Rate,
    impacto_aliquota: Money,
    impacto_formalizacao: Money,
    impacto_total: Money,
    pressao: PressaoFormalizacao,
) -> String {
    let efeito_aliquota = if impacto_aliquota < Decimal::ZERO {
        format!("reduz a carga em {}", formato::moeda(impacto_aliquota.abs()))
    } else {
        format!("acrescenta {}", formato::moeda(impacto_aliquota))
    };
    format!(
        "A carga legal estimada é de {} da receita, mas a carga efetivamente recolhida hoje é de {} \
         (efetividade de {}). Para cada {} de receita, a mudança de alíquota {} e a formalização \
         induzida pelo split payment acrescenta {}, resultando em {}. Pressão de formalização: {}.",
        formato::pct(carga_legal),
        formato::pct(carga_efetiva),
        formato::pct(fator * dec!(100)),
        formato::moeda(RECEITA_REFERENCIA),
        efeito_aliquota,
        formato::moeda(impacto_formalizacao),
        formato::moeda(impacto_total),
        pressao.rotulo()
    )
}

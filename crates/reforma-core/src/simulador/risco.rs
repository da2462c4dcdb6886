use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::consultas::{RegistroConsultas, Tabela};
use super::entrada::SimuladorInput;
use super::formato;
use super::resultado::ImpactoAnual;
use crate::dominio::{FaixaFaturamento, NivelRisco, RegimeTributario};
use crate::referencia::{FaixaCarga, PerfilSetor, TabelasReferencia};
use crate::types::Pct;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Burden changes up to +1% (and every decrease) are `baixo`.
pub const LIMIAR_RISCO_MEDIO: Pct = dec!(1);
/// Above +5% is `alto`.
pub const LIMIAR_RISCO_ALTO: Pct = dec!(5);
/// Above +15% is `critico`.
pub const LIMIAR_RISCO_CRITICO: Pct = dec!(15);

/// Map a signed change in burden (% of current burden) to a risk level.
pub fn classificar_risco(percentual: Pct) -> NivelRisco {
    if percentual > LIMIAR_RISCO_CRITICO {
        NivelRisco::Critico
    } else if percentual > LIMIAR_RISCO_ALTO {
        NivelRisco::Alto
    } else if percentual > LIMIAR_RISCO_MEDIO {
        NivelRisco::Medio
    } else {
        NivelRisco::Baixo
    }
}

// ---------------------------------------------------------------------------
// Burden projection
// ---------------------------------------------------------------------------

/// Sector-adjusted burden range of one regime and its classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjecaoCarga {
    pub regime: RegimeTributario,
    pub faixa: FaixaCarga,
    /// Unrounded change in burden, % of the current burden
    pub percentual: Pct,
    pub nivel: NivelRisco,
}

impl ProjecaoCarga {
    /// Projected minus current midpoint, in percentage points of revenue.
    pub fn delta_pp(&self) -> Pct {
        self.faixa.projetada_media() - self.faixa.atual_media()
    }
}

/// Change of the projected midpoint over the current midpoint, in percent.
pub fn variacao_percentual(faixa: &FaixaCarga) -> Pct {
    let atual = faixa.atual_media();
    (faixa.projetada_media() - atual)
        .checked_div(atual)
        .map(|r| r * dec!(100))
        .unwrap_or(Decimal::ZERO)
}

/// Look up a regime's range and apply the sector multiplier. Simples
/// Nacional keeps its unified collection, so the sector profile does not
/// move its projection.
pub fn faixa_ajustada(
    tabelas: &TabelasReferencia,
    regime: RegimeTributario,
    perfil: &PerfilSetor,
    registro: &mut RegistroConsultas,
) -> FaixaCarga {
    let faixa = registro.registrar(Tabela::Regimes, regime.codigo(), tabelas.faixa_carga(regime));
    match regime {
        RegimeTributario::Simples => faixa,
        _ => faixa.ajustada(perfil.fator_nova_carga),
    }
}

pub fn projetar_regime(
    tabelas: &TabelasReferencia,
    regime: RegimeTributario,
    perfil: &PerfilSetor,
    registro: &mut RegistroConsultas,
) -> ProjecaoCarga {
    let faixa = faixa_ajustada(tabelas, regime, perfil, registro);
    let percentual = variacao_percentual(&faixa);
    ProjecaoCarga {
        regime,
        faixa,
        percentual,
        nivel: classificar_risco(percentual),
    }
}

/// Headline impact. The money figure uses the bracket's own representative
/// revenue; there is no interpolation across brackets.
pub fn impacto_anual(projecao: &ProjecaoCarga, faixa: FaixaFaturamento) -> ImpactoAnual {
    let valor_anual = match faixa {
        // MEI pays a fixed monthly amount, not a share of revenue.
        FaixaFaturamento::Mei => None,
        _ => Some((faixa.receita_representativa() * projecao.delta_pp() / dec!(100)).round_dp(2)),
    };
    ImpactoAnual {
        percentual: projecao.percentual.round_dp(2),
        valor_anual,
    }
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

/// Everything the alert rules may read.
pub struct ContextoAlertas<'a> {
    pub input: &'a SimuladorInput,
    pub perfil: &'a PerfilSetor,
    pub projecao: &'a ProjecaoCarga,
    pub registro: &'a RegistroConsultas,
}

type Regra = fn(&ContextoAlertas<'_>) -> Option<String>;

/// Rules in descending severity. Each one is independent.
const REGRAS: [Regra; 6] = [
    alerta_risco_critico,
    alerta_aliquota_plena,
    alerta_imposto_seletivo,
    alerta_teto_simples,
    alerta_dados_padrao,
    alerta_regime_desconhecido,
];

pub fn gerar_alertas(ctx: &ContextoAlertas<'_>) -> Vec<String> {
    REGRAS.iter().filter_map(|regra| regra(ctx)).collect()
}

fn alerta_risco_critico(ctx: &ContextoAlertas<'_>) -> Option<String> {
    (ctx.projecao.nivel == NivelRisco::Critico).then(|| {
        format!(
            "Risco crítico: a carga projetada sobe {} em relação à atual. Revise preços e \
             contratos antes de 2027, quando a CBS entra em vigor plena.",
            formato::pct(ctx.projecao.percentual)
        )
    })
}

fn alerta_aliquota_plena(ctx: &ContextoAlertas<'_>) -> Option<String> {
    (ctx.perfil.aliquota_plena() && ctx.projecao.nivel >= NivelRisco::Alto).then(|| {
        format!(
            "{} paga CBS e IBS pela alíquota padrão, sem redução nem regime específico: \
             o aumento de carga não tem atenuante setorial.",
            ctx.input.setor.nome()
        )
    })
}

fn alerta_imposto_seletivo(ctx: &ContextoAlertas<'_>) -> Option<String> {
    ctx.perfil.sujeito_seletivo.then(|| {
        format!(
            "Parte da produção de {} pode estar sujeita ao Imposto Seletivo a partir de 2027.",
            ctx.input.setor.nome().to_lowercase()
        )
    })
}

fn alerta_teto_simples(ctx: &ContextoAlertas<'_>) -> Option<String> {
    (ctx.input.regime == RegimeTributario::Simples && ctx.input.faturamento.excede_teto_simples())
        .then(|| {
            format!(
                "A faixa {} excede o teto do Simples Nacional ({}): confirme o enquadramento, \
                 pois a simulação pode não refletir o regime real.",
                ctx.input.faturamento.nome(),
                formato::moeda(crate::dominio::TETO_SIMPLES)
            )
        })
}

fn alerta_dados_padrao(ctx: &ContextoAlertas<'_>) -> Option<String> {
    let faltantes: Vec<String> = ctx
        .registro
        .degradadas()
        .filter(|e| e.tabela != Tabela::Regimes)
        .map(|e| format!("{} ({})", e.tabela.nome(), e.chave))
        .collect();
    (!faltantes.is_empty()).then(|| {
        format!(
            "Dados de referência ausentes para {}; foram usados valores padrão.",
            faltantes.join(", ")
        )
    })
}

fn alerta_regime_desconhecido(ctx: &ContextoAlertas<'_>) -> Option<String> {
    (ctx.input.regime == RegimeTributario::NaoSei).then(|| {
        "Regime tributário não informado: a projeção usa uma faixa média de carga. \
         Informe o regime para um resultado mais preciso."
            .to_string()
    })
}

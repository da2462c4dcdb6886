use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dominio::{
    Confianca, DirecaoAjuste, NivelRisco, PressaoFormalizacao, RegimeTributario, UF,
};
use crate::referencia::MarcoTransicao;
use crate::types::{Money, Pct, Rate};

/// Headline projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactoAnual {
    /// Change in consumption-tax burden, % of the current burden
    pub percentual: Pct,
    /// Annual amount for the bracket's representative revenue. Absent for MEI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valor_anual: Option<Money>,
}

/// Legal vs. effective burden and the formalization estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfetividadeTributaria {
    pub fator_efetividade: Rate,
    pub carga_efetiva_pct: Pct,
    pub carga_legal_pct: Pct,
    /// Delta from the rate change alone, on the reference revenue
    pub impacto_aliquota: Money,
    /// Delta from enforcement-driven formalization; never negative
    pub impacto_formalizacao: Money,
    pub impacto_total: Money,
    pub pressao_formalizacao: PressaoFormalizacao,
    pub narrative: String,
}

/// One row of the regime comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinhaComparativo {
    pub regime: RegimeTributario,
    pub regime_nome: String,
    pub carga_atual_min: Pct,
    pub carga_atual_max: Pct,
    pub carga_nova_min: Pct,
    pub carga_nova_max: Pct,
    pub risco: NivelRisco,
    pub percentual: Pct,
}

/// State ICMS position relative to the national reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AjusteIcms {
    pub uf: UF,
    pub uf_nome: String,
    pub icms_rate: Pct,
    pub icms_referencia: Pct,
    pub margem_bruta: Rate,
    pub ajuste_pp: Pct,
    pub direcao: DirecaoAjuste,
    pub narrative: String,
    pub fonte: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metodologia {
    pub confianca: Confianca,
    pub resumo: String,
    pub fontes: Vec<String>,
    pub limitacoes: Vec<String>,
    pub ultima_atualizacao: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub entries: Vec<MarcoTransicao>,
    pub narrative: String,
}

/// Complete engine output. A snapshot of the input and the reference tables
/// it was computed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimuladorResult {
    pub nivel_risco: NivelRisco,
    pub impacto_anual: ImpactoAnual,
    /// Most severe first
    pub alertas: Vec<String>,
    pub efetividade_tributaria: EfetividadeTributaria,
    pub comparativo_regimes: Vec<LinhaComparativo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ajuste_icms: Option<AjusteIcms>,
    pub metodologia: Metodologia,
    pub timeline: Timeline,
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dominio::{RegimeTributario, Setor, UF};
use crate::error::ReformaError;
use crate::types::{midpoint, Pct, Rate};
use crate::ReformaResult;

// ---------------------------------------------------------------------------
// Lookup outcome
// ---------------------------------------------------------------------------

/// Whether a lookup hit an explicit row or fell back to the documented
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Desfecho {
    Exato,
    Padrao,
}

/// A lookup result tagged with its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Consulta<T> {
    pub valor: T,
    pub desfecho: Desfecho,
}

impl<T> Consulta<T> {
    fn exata(valor: T) -> Self {
        Consulta {
            valor,
            desfecho: Desfecho::Exato,
        }
    }

    fn padrao(valor: T) -> Self {
        Consulta {
            valor,
            desfecho: Desfecho::Padrao,
        }
    }

    pub fn is_padrao(&self) -> bool {
        self.desfecho == Desfecho::Padrao
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One state's legacy ICMS data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinhaIcms {
    /// Modal (general) internal rate, in percentage points
    pub aliquota_modal: Pct,
    /// Share of national GDP used as the weight of the national reference
    pub peso_pib: Decimal,
    /// Provenance of the rate
    pub fonte: String,
}

/// ICMS rate resolved for a state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliquotaIcms {
    pub aliquota: Pct,
    pub fonte: String,
}

/// Source string attached to the national-reference fallback.
pub const FONTE_REFERENCIA_NACIONAL: &str = "Referência nacional ponderada pelo PIB";

/// Sector profile under the new CBS/IBS rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerfilSetor {
    /// Legacy state ICMS applies (goods or interstate transport)
    pub tributado_icms: bool,
    /// Multiplier on the projected burden range: credit profile times the
    /// sector's rate reduction
    pub fator_nova_carga: Rate,
    /// Legal CBS/IBS rate reduction (0.60 = 60% off the standard rate)
    pub reducao_aliquota: Rate,
    /// Sector falls under a specific regime (regime específico)
    pub regime_especifico: bool,
    /// Part of the sector's output is subject to the Imposto Seletivo
    pub sujeito_seletivo: bool,
    /// Typical gross margin, used to translate ICMS deltas into value added
    pub margem_bruta: Rate,
    /// Share of legally owed tax that is actually collected today, in (0, 1]
    pub fator_efetividade: Rate,
}

impl PerfilSetor {
    pub const PADRAO: PerfilSetor = PerfilSetor {
        tributado_icms: false,
        fator_nova_carga: dec!(1),
        reducao_aliquota: dec!(0),
        regime_especifico: false,
        sujeito_seletivo: false,
        margem_bruta: dec!(0.30),
        fator_efetividade: dec!(0.85),
    };

    /// Sector pays the standard CBS/IBS rate with no reduction and no
    /// specific regime.
    pub fn aliquota_plena(&self) -> bool {
        self.reducao_aliquota.is_zero() && !self.regime_especifico
    }
}

/// Current and projected consumption-tax burden, as % of revenue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaixaCarga {
    pub atual_min: Pct,
    pub atual_max: Pct,
    pub projetada_min: Pct,
    pub projetada_max: Pct,
}

impl FaixaCarga {
    /// Range used when the regime is unknown or has no row.
    pub const PADRAO: FaixaCarga = FaixaCarga {
        atual_min: dec!(9.0),
        atual_max: dec!(17.0),
        projetada_min: dec!(9.0),
        projetada_max: dec!(17.5),
    };

    pub fn atual_media(&self) -> Pct {
        midpoint(self.atual_min, self.atual_max)
    }

    pub fn projetada_media(&self) -> Pct {
        midpoint(self.projetada_min, self.projetada_max)
    }

    /// Scale the projected side by a sector multiplier. The current side is
    /// left untouched.
    pub fn ajustada(&self, fator: Rate) -> FaixaCarga {
        FaixaCarga {
            projetada_min: self.projetada_min * fator,
            projetada_max: self.projetada_max * fator,
            ..*self
        }
    }
}

/// One milestone of the 2026-2033 transition calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarcoTransicao {
    pub ano: i32,
    pub descricao: String,
}

// ---------------------------------------------------------------------------
// Table set
// ---------------------------------------------------------------------------

/// Raw, unvalidated shape of a reference table set, as stored in JSON/YAML.
/// Build a [`TabelasReferencia`] from it with [`TabelasReferencia::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabelasBrutas {
    pub versao: String,
    pub atualizado_em: NaiveDate,
    pub icms: BTreeMap<UF, LinhaIcms>,
    pub setores: BTreeMap<Setor, PerfilSetor>,
    pub regimes: BTreeMap<RegimeTributario, FaixaCarga>,
    pub cronograma: Vec<MarcoTransicao>,
}

/// Immutable, validated reference data. The national ICMS reference is
/// derived from the state rows when the set is built and cannot be set
/// directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TabelasBrutas", into = "TabelasBrutas")]
pub struct TabelasReferencia {
    versao: String,
    atualizado_em: NaiveDate,
    icms: BTreeMap<UF, LinhaIcms>,
    setores: BTreeMap<Setor, PerfilSetor>,
    regimes: BTreeMap<RegimeTributario, FaixaCarga>,
    cronograma: Vec<MarcoTransicao>,
    referencia_nacional: Pct,
}

impl TryFrom<TabelasBrutas> for TabelasReferencia {
    type Error = ReformaError;

    fn try_from(brutas: TabelasBrutas) -> Result<Self, Self::Error> {
        TabelasReferencia::new(brutas)
    }
}

impl From<TabelasReferencia> for TabelasBrutas {
    fn from(tabelas: TabelasReferencia) -> Self {
        tabelas.into_brutas()
    }
}

impl TabelasReferencia {
    /// Validate a raw table set and derive the national reference rate.
    pub fn new(brutas: TabelasBrutas) -> ReformaResult<Self> {
        validar(&brutas)?;
        let referencia_nacional = media_ponderada_pib(&brutas.icms).ok_or_else(|| {
            ReformaError::InvalidReferenceData(
                "ICMS table needs at least one state with a positive GDP weight".into(),
            )
        })?;
        Ok(Self::montar(brutas, referencia_nacional))
    }

    /// Built-in 2025 table set.
    pub fn padrao() -> Self {
        let brutas = super::dados::tabelas_brutas_padrao();
        let referencia_nacional =
            media_ponderada_pib(&brutas.icms).unwrap_or(REFERENCIA_NACIONAL_FALLBACK);
        Self::montar(brutas, referencia_nacional)
    }

    /// Parse and validate a JSON table set.
    pub fn from_json(json: &str) -> ReformaResult<Self> {
        let brutas: TabelasBrutas = serde_json::from_str(json)?;
        Self::new(brutas)
    }

    fn montar(brutas: TabelasBrutas, referencia_nacional: Pct) -> Self {
        TabelasReferencia {
            versao: brutas.versao,
            atualizado_em: brutas.atualizado_em,
            icms: brutas.icms,
            setores: brutas.setores,
            regimes: brutas.regimes,
            cronograma: brutas.cronograma,
            referencia_nacional,
        }
    }

    /// Back to the editable raw shape. Rebuilding with [`Self::new`]
    /// recomputes the national reference.
    pub fn into_brutas(self) -> TabelasBrutas {
        TabelasBrutas {
            versao: self.versao,
            atualizado_em: self.atualizado_em,
            icms: self.icms,
            setores: self.setores,
            regimes: self.regimes,
            cronograma: self.cronograma,
        }
    }

    pub fn versao(&self) -> &str {
        &self.versao
    }

    pub fn atualizado_em(&self) -> NaiveDate {
        self.atualizado_em
    }

    /// PIB-weighted mean of the state ICMS modal rates.
    pub fn referencia_nacional(&self) -> Pct {
        self.referencia_nacional
    }

    pub fn linhas_icms(&self) -> impl Iterator<Item = (&UF, &LinhaIcms)> {
        self.icms.iter()
    }

    pub fn perfis_setoriais(&self) -> impl Iterator<Item = (&Setor, &PerfilSetor)> {
        self.setores.iter()
    }

    pub fn faixas_regime(&self) -> impl Iterator<Item = (&RegimeTributario, &FaixaCarga)> {
        self.regimes.iter()
    }

    pub fn cronograma(&self) -> &[MarcoTransicao] {
        &self.cronograma
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// State modal ICMS rate. Falls back to the national reference.
    pub fn icms_modal(&self, uf: UF) -> Consulta<AliquotaIcms> {
        match self.icms.get(&uf) {
            Some(linha) => Consulta::exata(AliquotaIcms {
                aliquota: linha.aliquota_modal,
                fonte: linha.fonte.clone(),
            }),
            None => {
                tracing::debug!(uf = %uf, "no ICMS row, using national reference");
                Consulta::padrao(AliquotaIcms {
                    aliquota: self.referencia_nacional,
                    fonte: FONTE_REFERENCIA_NACIONAL.to_string(),
                })
            }
        }
    }

    /// Sector profile. Falls back to [`PerfilSetor::PADRAO`].
    pub fn perfil_setor(&self, setor: Setor) -> Consulta<PerfilSetor> {
        match self.setores.get(&setor) {
            Some(perfil) => Consulta::exata(*perfil),
            None => {
                tracing::debug!(setor = setor.codigo(), "no sector row, using default profile");
                Consulta::padrao(PerfilSetor::PADRAO)
            }
        }
    }

    pub fn setor_tributado_icms(&self, setor: Setor) -> bool {
        self.perfil_setor(setor).valor.tributado_icms
    }

    /// Burden range of a regime. `NaoSei` and missing rows fall back to
    /// [`FaixaCarga::PADRAO`].
    pub fn faixa_carga(&self, regime: RegimeTributario) -> Consulta<FaixaCarga> {
        match self.regimes.get(&regime) {
            Some(faixa) if regime.is_conhecido() => Consulta::exata(*faixa),
            _ => {
                tracing::debug!(regime = regime.codigo(), "no regime row, using default range");
                Consulta::padrao(FaixaCarga::PADRAO)
            }
        }
    }
}

impl Default for TabelasReferencia {
    fn default() -> Self {
        Self::padrao()
    }
}

// ---------------------------------------------------------------------------
// Derivation and validation
// ---------------------------------------------------------------------------

/// Only reached if the built-in ICMS table were emptied.
const REFERENCIA_NACIONAL_FALLBACK: Pct = dec!(19);

/// PIB-weighted mean of the state rates, or `None` when no state carries a
/// positive weight.
pub fn media_ponderada_pib(icms: &BTreeMap<UF, LinhaIcms>) -> Option<Pct> {
    let peso_total: Decimal = icms.values().map(|l| l.peso_pib).sum();
    if peso_total <= Decimal::ZERO {
        return None;
    }
    let soma: Decimal = icms.values().map(|l| l.aliquota_modal * l.peso_pib).sum();
    Some(soma / peso_total)
}

/// GDP weights are shares of national GDP, in percent.
pub const PESO_PIB_MAXIMO: Pct = dec!(100);
/// Burden ranges are percent of revenue.
pub const CARGA_MAXIMA: Pct = dec!(100);
pub const FATOR_NOVA_CARGA_MAXIMO: Rate = dec!(10);

fn invalid(msg: String) -> ReformaError {
    ReformaError::InvalidReferenceData(msg)
}

fn validar(brutas: &TabelasBrutas) -> ReformaResult<()> {
    for (uf, linha) in &brutas.icms {
        if linha.aliquota_modal < Decimal::ZERO || linha.aliquota_modal > dec!(100) {
            return Err(invalid(format!(
                "ICMS rate for {uf} must be between 0 and 100, got {}",
                linha.aliquota_modal
            )));
        }
        if linha.peso_pib < Decimal::ZERO || linha.peso_pib > PESO_PIB_MAXIMO {
            return Err(invalid(format!(
                "GDP weight for {uf} must be between 0 and {PESO_PIB_MAXIMO}, got {}",
                linha.peso_pib
            )));
        }
    }

    for (setor, perfil) in &brutas.setores {
        let codigo = setor.codigo();
        if perfil.fator_efetividade <= Decimal::ZERO || perfil.fator_efetividade > Decimal::ONE {
            return Err(invalid(format!(
                "fator_efetividade for {codigo} must be in (0, 1], got {}",
                perfil.fator_efetividade
            )));
        }
        if perfil.margem_bruta < Decimal::ZERO || perfil.margem_bruta > Decimal::ONE {
            return Err(invalid(format!("margem_bruta for {codigo} must be in [0, 1]")));
        }
        if perfil.reducao_aliquota < Decimal::ZERO || perfil.reducao_aliquota > Decimal::ONE {
            return Err(invalid(format!("reducao_aliquota for {codigo} must be in [0, 1]")));
        }
        if perfil.fator_nova_carga < Decimal::ZERO || perfil.fator_nova_carga > FATOR_NOVA_CARGA_MAXIMO {
            return Err(invalid(format!(
                "fator_nova_carga for {codigo} must be between 0 and {FATOR_NOVA_CARGA_MAXIMO}, got {}",
                perfil.fator_nova_carga
            )));
        }
    }

    for (regime, faixa) in &brutas.regimes {
        let codigo = regime.codigo();
        if !regime.is_conhecido() {
            return Err(invalid(format!(
                "regime '{codigo}' cannot carry a burden row; it always uses the default range"
            )));
        }
        if faixa.atual_min < Decimal::ZERO || faixa.projetada_min < Decimal::ZERO {
            return Err(invalid(format!("burden range for {codigo} must be non-negative")));
        }
        if faixa.atual_max > CARGA_MAXIMA || faixa.projetada_max > CARGA_MAXIMA {
            return Err(invalid(format!(
                "burden range for {codigo} cannot exceed {CARGA_MAXIMA}% of revenue"
            )));
        }
        if faixa.atual_min > faixa.atual_max || faixa.projetada_min > faixa.projetada_max {
            return Err(invalid(format!("burden range for {codigo} has min > max")));
        }
        if faixa.atual_media().is_zero() {
            return Err(invalid(format!("current burden for {codigo} cannot be zero")));
        }
    }

    if brutas
        .cronograma
        .windows(2)
        .any(|par| par[0].ano >= par[1].ano)
    {
        return Err(invalid("transition calendar years must be strictly increasing".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal, label: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tolerance,
            "{label}: expected ~{expected}, got {actual} (diff {diff} > tolerance {tolerance})"
        );
    }

    #[test]
    fn test_builtin_tables_cover_every_key() {
        let t = TabelasReferencia::padrao();
        for uf in UF::TODAS {
            assert!(!t.icms_modal(uf).is_padrao(), "missing ICMS row for {uf}");
        }
        for setor in Setor::TODOS {
            assert!(!t.perfil_setor(setor).is_padrao(), "missing profile for {setor}");
        }
        for regime in RegimeTributario::CONHECIDOS {
            assert!(!t.faixa_carga(regime).is_padrao(), "missing range for {regime}");
        }
    }

    #[test]
    fn test_builtin_tables_pass_validation() {
        let brutas = TabelasReferencia::padrao().into_brutas();
        assert!(TabelasReferencia::new(brutas).is_ok());
    }

    #[test]
    fn test_national_reference_is_weighted_mean() {
        let t = TabelasReferencia::padrao();
        // Hand-computed from the 2025 table: 1890.85 / 100
        assert_close(t.referencia_nacional(), dec!(18.9085), dec!(0.0001), "reference");
    }

    #[test]
    fn test_nao_sei_always_defaults() {
        let t = TabelasReferencia::padrao();
        let c = t.faixa_carga(RegimeTributario::NaoSei);
        assert!(c.is_padrao());
        assert_eq!(c.valor, FaixaCarga::PADRAO);
    }

    #[test]
    fn test_missing_state_falls_back_to_reference() {
        let mut brutas = TabelasReferencia::padrao().into_brutas();
        brutas.icms.remove(&UF::AC);
        let t = TabelasReferencia::new(brutas).unwrap();
        let c = t.icms_modal(UF::AC);
        assert!(c.is_padrao());
        assert_eq!(c.valor.aliquota, t.referencia_nacional());
        assert_eq!(c.valor.fonte, FONTE_REFERENCIA_NACIONAL);
    }

    #[test]
    fn test_editing_a_rate_recomputes_reference() {
        let base = TabelasReferencia::padrao();
        let antes = base.referencia_nacional();
        let mut brutas = base.into_brutas();
        if let Some(linha) = brutas.icms.get_mut(&UF::SP) {
            linha.aliquota_modal = dec!(20);
        }
        let t = TabelasReferencia::new(brutas).unwrap();
        // SP weight 30.6 over a total of 100: +2pp on SP moves the mean by 0.612
        assert_close(t.referencia_nacional() - antes, dec!(0.612), dec!(0.0001), "shift");
    }

    #[test]
    fn test_rejects_effectiveness_above_one() {
        let mut brutas = TabelasReferencia::padrao().into_brutas();
        if let Some(p) = brutas.setores.get_mut(&Setor::Varejo) {
            p.fator_efetividade = dec!(1.2);
        }
        let err = TabelasReferencia::new(brutas).unwrap_err();
        assert!(matches!(err, ReformaError::InvalidReferenceData(_)));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let mut brutas = TabelasReferencia::padrao().into_brutas();
        brutas.regimes.insert(
            RegimeTributario::LucroReal,
            FaixaCarga {
                atual_min: dec!(20),
                atual_max: dec!(10),
                projetada_min: dec!(10),
                projetada_max: dec!(12),
            },
        );
        assert!(TabelasReferencia::new(brutas).is_err());
    }

    #[test]
    fn test_rejects_oversized_gdp_weight() {
        let mut brutas = TabelasReferencia::padrao().into_brutas();
        if let Some(linha) = brutas.icms.get_mut(&UF::SP) {
            linha.peso_pib = Decimal::MAX;
        }
        let err = TabelasReferencia::new(brutas).unwrap_err();
        assert!(matches!(err, ReformaError::InvalidReferenceData(_)));
    }

    #[test]
    fn test_rejects_oversized_sector_multiplier() {
        let mut brutas = TabelasReferencia::padrao().into_brutas();
        if let Some(p) = brutas.setores.get_mut(&Setor::Servicos) {
            p.fator_nova_carga = dec!(1000);
        }
        assert!(TabelasReferencia::new(brutas).is_err());
    }

    #[test]
    fn test_rejects_range_above_full_revenue() {
        let mut brutas = TabelasReferencia::padrao().into_brutas();
        if let Some(f) = brutas.regimes.get_mut(&RegimeTributario::LucroReal) {
            f.projetada_max = dec!(1_000_000_000_000_000_000_000_000);
        }
        assert!(TabelasReferencia::new(brutas).is_err());
    }

    #[test]
    fn test_rejects_nao_sei_row() {
        let mut brutas = TabelasReferencia::padrao().into_brutas();
        brutas
            .regimes
            .insert(RegimeTributario::NaoSei, FaixaCarga::PADRAO);
        assert!(TabelasReferencia::new(brutas).is_err());
    }

    #[test]
    fn test_rejects_zero_total_weight() {
        let mut brutas = TabelasReferencia::padrao().into_brutas();
        for linha in brutas.icms.values_mut() {
            linha.peso_pib = Decimal::ZERO;
        }
        assert!(TabelasReferencia::new(brutas).is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_derived_reference() {
        let t = TabelasReferencia::padrao();
        let json = serde_json::to_string(&t).unwrap();
        assert!(!json.contains("referencia_nacional"));
        let back = TabelasReferencia::from_json(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_sector_adjustment_only_touches_projection() {
        let f = FaixaCarga {
            atual_min: dec!(10),
            atual_max: dec!(14),
            projetada_min: dec!(10),
            projetada_max: dec!(20),
        };
        let a = f.ajustada(dec!(0.5));
        assert_eq!(a.atual_media(), dec!(12));
        assert_eq!(a.projetada_min, dec!(5));
        assert_eq!(a.projetada_max, dec!(10));
    }
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ReformaError;
use crate::types::Money;

// ---------------------------------------------------------------------------
// Regime tributário
// ---------------------------------------------------------------------------

/// Tax-accounting regime. `NaoSei` is an explicit "unknown" answer and is a
/// valid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegimeTributario {
    Simples,
    LucroPresumido,
    LucroReal,
    NaoSei,
}

impl RegimeTributario {
    pub const TODOS: [RegimeTributario; 4] = [
        RegimeTributario::Simples,
        RegimeTributario::LucroPresumido,
        RegimeTributario::LucroReal,
        RegimeTributario::NaoSei,
    ];

    /// The three concrete regimes, in comparison-table order.
    pub const CONHECIDOS: [RegimeTributario; 3] = [
        RegimeTributario::Simples,
        RegimeTributario::LucroPresumido,
        RegimeTributario::LucroReal,
    ];

    pub fn codigo(&self) -> &'static str {
        match self {
            RegimeTributario::Simples => "simples",
            RegimeTributario::LucroPresumido => "lucro_presumido",
            RegimeTributario::LucroReal => "lucro_real",
            RegimeTributario::NaoSei => "nao_sei",
        }
    }

    pub fn nome(&self) -> &'static str {
        match self {
            RegimeTributario::Simples => "Simples Nacional",
            RegimeTributario::LucroPresumido => "Lucro Presumido",
            RegimeTributario::LucroReal => "Lucro Real",
            RegimeTributario::NaoSei => "Regime não informado",
        }
    }

    pub fn is_conhecido(&self) -> bool {
        !matches!(self, RegimeTributario::NaoSei)
    }
}

impl fmt::Display for RegimeTributario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nome())
    }
}

impl FromStr for RegimeTributario {
    type Err = ReformaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalizado = s.trim().to_lowercase().replace('-', "_");
        match normalizado.as_str() {
            "simples" | "simples_nacional" => Ok(RegimeTributario::Simples),
            "lucro_presumido" | "presumido" => Ok(RegimeTributario::LucroPresumido),
            "lucro_real" | "real" => Ok(RegimeTributario::LucroReal),
            "nao_sei" => Ok(RegimeTributario::NaoSei),
            _ => Err(ReformaError::invalid_input(
                "regime",
                format!(
                    "'{s}' is not a known regime (expected simples, lucro_presumido, lucro_real or nao_sei)"
                ),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Faixa de faturamento
// ---------------------------------------------------------------------------

/// Annual revenue bracket, ordered from smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaixaFaturamento {
    Mei,
    Me,
    Epp,
    Medio,
    Grande,
}

/// Simples Nacional annual revenue ceiling (LC 123/2006, art. 3º).
pub const TETO_SIMPLES: Money = dec!(4_800_000);

impl FaixaFaturamento {
    pub const TODAS: [FaixaFaturamento; 5] = [
        FaixaFaturamento::Mei,
        FaixaFaturamento::Me,
        FaixaFaturamento::Epp,
        FaixaFaturamento::Medio,
        FaixaFaturamento::Grande,
    ];

    pub fn codigo(&self) -> &'static str {
        match self {
            FaixaFaturamento::Mei => "mei",
            FaixaFaturamento::Me => "me",
            FaixaFaturamento::Epp => "epp",
            FaixaFaturamento::Medio => "medio",
            FaixaFaturamento::Grande => "grande",
        }
    }

    pub fn nome(&self) -> &'static str {
        match self {
            FaixaFaturamento::Mei => "MEI (até R$ 81 mil)",
            FaixaFaturamento::Me => "Microempresa (até R$ 360 mil)",
            FaixaFaturamento::Epp => "EPP (até R$ 4,8 milhões)",
            FaixaFaturamento::Medio => "Média empresa (até R$ 78 milhões)",
            FaixaFaturamento::Grande => "Grande empresa (acima de R$ 78 milhões)",
        }
    }

    /// Upper bound of the bracket. `None` for the open-ended top bracket.
    pub fn teto(&self) -> Option<Money> {
        match self {
            FaixaFaturamento::Mei => Some(dec!(81_000)),
            FaixaFaturamento::Me => Some(dec!(360_000)),
            FaixaFaturamento::Epp => Some(TETO_SIMPLES),
            FaixaFaturamento::Medio => Some(dec!(78_000_000)),
            FaixaFaturamento::Grande => None,
        }
    }

    /// Fixed revenue used to turn percentage impacts into money. Every
    /// business in the bracket gets the same figure.
    pub fn receita_representativa(&self) -> Money {
        match self {
            FaixaFaturamento::Mei => dec!(60_000),
            FaixaFaturamento::Me => dec!(240_000),
            FaixaFaturamento::Epp => dec!(2_400_000),
            FaixaFaturamento::Medio => dec!(20_000_000),
            FaixaFaturamento::Grande => dec!(150_000_000),
        }
    }

    /// Brackets whose revenue exceeds the Simples Nacional ceiling.
    pub fn excede_teto_simples(&self) -> bool {
        match self.teto() {
            Some(teto) => teto > TETO_SIMPLES,
            None => true,
        }
    }

    /// Bracket containing an annual revenue figure. Boundary values belong to
    /// the lower bracket (the ceiling is inclusive).
    pub fn from_receita(receita: Money) -> FaixaFaturamento {
        FaixaFaturamento::TODAS
            .iter()
            .copied()
            .find(|faixa| faixa.teto().is_some_and(|teto| receita <= teto))
            .unwrap_or(FaixaFaturamento::Grande)
    }
}

impl fmt::Display for FaixaFaturamento {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nome())
    }
}

impl FromStr for FaixaFaturamento {
    type Err = ReformaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalizado = s.trim().to_lowercase();
        if let Some(faixa) = FaixaFaturamento::TODAS
            .iter()
            .copied()
            .find(|f| f.codigo() == normalizado)
        {
            return Ok(faixa);
        }
        // A plain number is accepted as an annual revenue figure.
        match normalizado.replace('_', "").parse::<Decimal>() {
            Ok(receita) if receita >= Decimal::ZERO => Ok(FaixaFaturamento::from_receita(receita)),
            _ => Err(ReformaError::invalid_input(
                "faturamento",
                format!("'{s}' is neither a revenue bracket (mei, me, epp, medio, grande) nor a non-negative amount"),
            )),
        }
    }
}

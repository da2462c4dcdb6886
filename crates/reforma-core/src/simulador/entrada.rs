use serde::{Deserialize, Serialize};

use crate::dominio::{FaixaFaturamento, RegimeTributario, Setor, UF};
use crate::ReformaResult;

/// Engine input. Every field is a closed enum, so any value that
/// deserializes is a valid simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimuladorInput {
    pub regime: RegimeTributario,
    pub setor: Setor,
    pub faturamento: FaixaFaturamento,
    pub uf: UF,
}

impl SimuladorInput {
    pub fn new(
        regime: RegimeTributario,
        setor: Setor,
        faturamento: FaixaFaturamento,
        uf: UF,
    ) -> Self {
        SimuladorInput {
            regime,
            setor,
            faturamento,
            uf,
        }
    }

    /// Boundary validation for free-form strings (form fields, query
    /// parameters). Fails on the first invalid field.
    pub fn from_raw(regime: &str, setor: &str, faturamento: &str, uf: &str) -> ReformaResult<Self> {
        Ok(SimuladorInput {
            regime: regime.parse()?,
            setor: setor.parse()?,
            faturamento: faturamento.parse()?,
            uf: uf.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReformaError;

    #[test]
    fn test_from_raw_accepts_valid_strings() {
        let input = SimuladorInput::from_raw("simples", "varejo", "epp", "sp").unwrap();
        assert_eq!(
            input,
            SimuladorInput::new(
                RegimeTributario::Simples,
                Setor::Varejo,
                FaixaFaturamento::Epp,
                UF::SP
            )
        );
    }

    #[test]
    fn test_from_raw_names_the_bad_field() {
        let err = SimuladorInput::from_raw("simples", "varejo", "epp", "ZZ").unwrap_err();
        match err {
            ReformaError::InvalidInput { field, .. } => assert_eq!(field, "uf"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_deserialize_rejects_unknown_sector() {
        let json = r#"{"regime":"simples","setor":"cassino","faturamento":"epp","uf":"SP"}"#;
        assert!(serde_json::from_str::<SimuladorInput>(json).is_err());
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Headline risk level. Variants are declared in ascending severity, so the
/// derived `Ord` is the severity order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NivelRisco {
    Baixo,
    Medio,
    Alto,
    Critico,
}

impl NivelRisco {
    pub fn rotulo(&self) -> &'static str {
        match self {
            NivelRisco::Baixo => "baixo",
            NivelRisco::Medio => "médio",
            NivelRisco::Alto => "alto",
            NivelRisco::Critico => "crítico",
        }
    }
}

impl fmt::Display for NivelRisco {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rotulo())
    }
}

/// Confidence tier attached to every result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confianca {
    Baixa,
    Media,
    Alta,
}

impl Confianca {
    pub fn rotulo(&self) -> &'static str {
        match self {
            Confianca::Baixa => "baixa",
            Confianca::Media => "média",
            Confianca::Alta => "alta",
        }
    }
}

impl fmt::Display for Confianca {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rotulo())
    }
}

/// Direction of the state ICMS adjustment relative to the national reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirecaoAjuste {
    Favoravel,
    Neutro,
    Desfavoravel,
}

impl DirecaoAjuste {
    /// Lower is more favorable.
    pub fn ordem(&self) -> u8 {
        match self {
            DirecaoAjuste::Favoravel => 0,
            DirecaoAjuste::Neutro => 1,
            DirecaoAjuste::Desfavoravel => 2,
        }
    }

    pub fn rotulo(&self) -> &'static str {
        match self {
            DirecaoAjuste::Favoravel => "favorável",
            DirecaoAjuste::Neutro => "neutro",
            DirecaoAjuste::Desfavoravel => "desfavorável",
        }
    }
}

impl fmt::Display for DirecaoAjuste {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rotulo())
    }
}

/// Pressure to formalize created by the new collection mechanisms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressaoFormalizacao {
    Baixa,
    Moderada,
    Alta,
    MuitoAlta,
}

impl PressaoFormalizacao {
    pub fn rotulo(&self) -> &'static str {
        match self {
            PressaoFormalizacao::Baixa => "baixa",
            PressaoFormalizacao::Moderada => "moderada",
            PressaoFormalizacao::Alta => "alta",
            PressaoFormalizacao::MuitoAlta => "muito alta",
        }
    }
}

impl fmt::Display for PressaoFormalizacao {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rotulo())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_levels_are_ordered_by_severity() {
        assert!(NivelRisco::Baixo < NivelRisco::Medio);
        assert!(NivelRisco::Medio < NivelRisco::Alto);
        assert!(NivelRisco::Alto < NivelRisco::Critico);
    }

    #[test]
    fn test_confidence_ordering() {
        assert!(Confianca::Alta > Confianca::Media);
        assert!(Confianca::Media > Confianca::Baixa);
    }

    #[test]
    fn test_serde_values() {
        assert_eq!(
            serde_json::to_string(&PressaoFormalizacao::MuitoAlta).unwrap(),
            "\"muito_alta\""
        );
        assert_eq!(
            serde_json::to_string(&DirecaoAjuste::Desfavoravel).unwrap(),
            "\"desfavoravel\""
        );
        assert_eq!(serde_json::to_string(&NivelRisco::Critico).unwrap(), "\"critico\"");
    }
}

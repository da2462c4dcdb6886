use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ReformaError;

/// Business sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Setor {
    Varejo,
    Atacado,
    Industria,
    Servicos,
    Tecnologia,
    Saude,
    Educacao,
    Construcao,
    Agronegocio,
    Transporte,
    Alimentacao,
    Imobiliario,
}

impl Setor {
    pub const TODOS: [Setor; 12] = [
        Setor::Varejo,
        Setor::Atacado,
        Setor::Industria,
        Setor::Servicos,
        Setor::Tecnologia,
        Setor::Saude,
        Setor::Educacao,
        Setor::Construcao,
        Setor::Agronegocio,
        Setor::Transporte,
        Setor::Alimentacao,
        Setor::Imobiliario,
    ];

    /// Machine code, identical to the serialized form.
    pub fn codigo(&self) -> &'static str {
        match self {
            Setor::Varejo => "varejo",
            Setor::Atacado => "atacado",
            Setor::Industria => "industria",
            Setor::Servicos => "servicos",
            Setor::Tecnologia => "tecnologia",
            Setor::Saude => "saude",
            Setor::Educacao => "educacao",
            Setor::Construcao => "construcao",
            Setor::Agronegocio => "agronegocio",
            Setor::Transporte => "transporte",
            Setor::Alimentacao => "alimentacao",
            Setor::Imobiliario => "imobiliario",
        }
    }

    /// Human-readable name used in narratives and page titles.
    pub fn nome(&self) -> &'static str {
        match self {
            Setor::Varejo => "Comércio varejista",
            Setor::Atacado => "Comércio atacadista",
            Setor::Industria => "Indústria",
            Setor::Servicos => "Serviços",
            Setor::Tecnologia => "Tecnologia",
            Setor::Saude => "Saúde",
            Setor::Educacao => "Educação",
            Setor::Construcao => "Construção civil",
            Setor::Agronegocio => "Agronegócio",
            Setor::Transporte => "Transporte",
            Setor::Alimentacao => "Bares e restaurantes",
            Setor::Imobiliario => "Imobiliário",
        }
    }
}

impl fmt::Display for Setor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nome())
    }
}

impl FromStr for Setor {
    type Err = ReformaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalizado = s.trim().to_lowercase().replace('-', "_");
        Setor::TODOS
            .iter()
            .copied()
            .find(|setor| setor.codigo() == normalizado)
            .ok_or_else(|| {
                ReformaError::invalid_input(
                    "setor",
                    format!(
                        "'{s}' is not a known sector (expected one of: {})",
                        Setor::TODOS.map(|x| x.codigo()).join(", ")
                    ),
                )
            })
    }
}

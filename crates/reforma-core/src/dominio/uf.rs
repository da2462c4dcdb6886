use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ReformaError;

/// Brazilian federative unit (26 states plus the Federal District).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UF {
    AC,
    AL,
    AP,
    AM,
    BA,
    CE,
    DF,
    ES,
    GO,
    MA,
    MT,
    MS,
    MG,
    PA,
    PB,
    PR,
    PE,
    PI,
    RJ,
    RN,
    RS,
    RO,
    RR,
    SC,
    SP,
    SE,
    TO,
}

impl UF {
    pub const TODAS: [UF; 27] = [
        UF::AC,
        UF::AL,
        UF::AP,
        UF::AM,
        UF::BA,
        UF::CE,
        UF::DF,
        UF::ES,
        UF::GO,
        UF::MA,
        UF::MT,
        UF::MS,
        UF::MG,
        UF::PA,
        UF::PB,
        UF::PR,
        UF::PE,
        UF::PI,
        UF::RJ,
        UF::RN,
        UF::RS,
        UF::RO,
        UF::RR,
        UF::SC,
        UF::SP,
        UF::SE,
        UF::TO,
    ];

    pub fn sigla(&self) -> &'static str {
        match self {
            UF::AC => "AC",
            UF::AL => "AL",
            UF::AP => "AP",
            UF::AM => "AM",
            UF::BA => "BA",
            UF::CE => "CE",
            UF::DF => "DF",
            UF::ES => "ES",
            UF::GO => "GO",
            UF::MA => "MA",
            UF::MT => "MT",
            UF::MS => "MS",
            UF::MG => "MG",
            UF::PA => "PA",
            UF::PB => "PB",
            UF::PR => "PR",
            UF::PE => "PE",
            UF::PI => "PI",
            UF::RJ => "RJ",
            UF::RN => "RN",
            UF::RS => "RS",
            UF::RO => "RO",
            UF::RR => "RR",
            UF::SC => "SC",
            UF::SP => "SP",
            UF::SE => "SE",
            UF::TO => "TO",
        }
    }

    pub fn nome(&self) -> &'static str {
        match self {
            UF::AC => "Acre",
            UF::AL => "Alagoas",
            UF::AP => "Amapá",
            UF::AM => "Amazonas",
            UF::BA => "Bahia",
            UF::CE => "Ceará",
            UF::DF => "Distrito Federal",
            UF::ES => "Espírito Santo",
            UF::GO => "Goiás",
            UF::MA => "Maranhão",
            UF::MT => "Mato Grosso",
            UF::MS => "Mato Grosso do Sul",
            UF::MG => "Minas Gerais",
            UF::PA => "Pará",
            UF::PB => "Paraíba",
            UF::PR => "Paraná",
            UF::PE => "Pernambuco",
            UF::PI => "Piauí",
            UF::RJ => "Rio de Janeiro",
            UF::RN => "Rio Grande do Norte",
            UF::RS => "Rio Grande do Sul",
            UF::RO => "Rondônia",
            UF::RR => "Roraima",
            UF::SC => "Santa Catarina",
            UF::SP => "São Paulo",
            UF::SE => "Sergipe",
            UF::TO => "Tocantins",
        }
    }
}

impl fmt::Display for UF {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sigla())
    }
}

impl FromStr for UF {
    type Err = ReformaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sigla = s.trim().to_uppercase();
        UF::TODAS
            .iter()
            .copied()
            .find(|uf| uf.sigla() == sigla)
            .ok_or_else(|| {
                ReformaError::invalid_input("uf", format!("'{s}' is not a Brazilian state code"))
            })
    }
}

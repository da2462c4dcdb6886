use serde::{Deserialize, Serialize};

use crate::dominio::{FaixaFaturamento, RegimeTributario, Setor, UF};
use crate::referencia::tabelas_atuais;
use crate::simulador::{simular_com, SimuladorInput, SimuladorResult};

/// Dimensions held fixed while the others are enumerated. Missing fields
/// deserialize to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParametrosPaginas {
    /// Regime used on sector x state pages
    pub regime: RegimeTributario,
    /// Revenue bracket used on every page
    pub faixa: FaixaFaturamento,
    /// State used on sector x regime pages
    pub uf: UF,
}

impl Default for ParametrosPaginas {
    fn default() -> Self {
        ParametrosPaginas {
            regime: RegimeTributario::LucroPresumido,
            faixa: FaixaFaturamento::Epp,
            uf: UF::SP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoPagina {
    SetorUf,
    SetorRegime,
}

/// One statically generated page and the input it renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagina {
    pub tipo: TipoPagina,
    pub slug: String,
    pub titulo: String,
    pub input: SimuladorInput,
}

fn slug(partes: &[&str]) -> String {
    partes
        .iter()
        .map(|p| p.to_lowercase().replace('_', "-"))
        .collect::<Vec<_>>()
        .join("-")
}

/// Every (sector, state) pair, sector-major.
pub fn combinacoes_setor_uf(parametros: ParametrosPaginas) -> impl Iterator<Item = Pagina> {
    Setor::TODOS.into_iter().flat_map(move |setor| {
        UF::TODAS.into_iter().map(move |uf| Pagina {
            tipo: TipoPagina::SetorUf,
            slug: slug(&[setor.codigo(), uf.sigla()]),
            titulo: format!("Reforma tributária: {} em {}", setor.nome(), uf.nome()),
            input: SimuladorInput::new(parametros.regime, setor, parametros.faixa, uf),
        })
    })
}

/// Every (sector, concrete regime) pair, sector-major.
pub fn combinacoes_setor_regime(parametros: ParametrosPaginas) -> impl Iterator<Item = Pagina> {
    Setor::TODOS.into_iter().flat_map(move |setor| {
        RegimeTributario::CONHECIDOS.into_iter().map(move |regime| Pagina {
            tipo: TipoPagina::SetorRegime,
            slug: slug(&[setor.codigo(), regime.codigo()]),
            titulo: format!("Reforma tributária: {} no {}", setor.nome(), regime.nome()),
            input: SimuladorInput::new(regime, setor, parametros.faixa, parametros.uf),
        })
    })
}

/// Pair each page with its result. All pages share one snapshot of the
/// reference tables, taken when this is called.
pub fn gerar_paginas<I>(paginas: I) -> impl Iterator<Item = (Pagina, SimuladorResult)>
where
    I: IntoIterator<Item = Pagina>,
{
    let tabelas = tabelas_atuais();
    paginas.into_iter().map(move |pagina| {
        let result = simular_com(&tabelas, &pagina.input);
        (pagina, result)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_setor_uf_count_and_unique_slugs() {
        let paginas: Vec<_> = combinacoes_setor_uf(ParametrosPaginas::default()).collect();
        assert_eq!(paginas.len(), Setor::TODOS.len() * UF::TODAS.len());
        let slugs: HashSet<_> = paginas.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs.len(), paginas.len());
        assert_eq!(paginas[0].slug, "varejo-ac");
    }

    #[test]
    fn test_setor_regime_uses_known_regimes_only() {
        let paginas: Vec<_> = combinacoes_setor_regime(ParametrosPaginas::default()).collect();
        assert_eq!(paginas.len(), Setor::TODOS.len() * 3);
        assert!(paginas
            .iter()
            .all(|p| p.input.regime != RegimeTributario::NaoSei));
        assert!(paginas.iter().any(|p| p.slug == "varejo-lucro-presumido"));
    }

    #[test]
    fn test_fixed_dimensions_come_from_parameters() {
        let parametros = ParametrosPaginas {
            regime: RegimeTributario::LucroReal,
            faixa: FaixaFaturamento::Grande,
            uf: UF::BA,
        };
        assert!(combinacoes_setor_uf(parametros)
            .all(|p| p.input.regime == RegimeTributario::LucroReal
                && p.input.faturamento == FaixaFaturamento::Grande));
        assert!(combinacoes_setor_regime(parametros).all(|p| p.input.uf == UF::BA));
    }

    #[test]
    fn test_titles() {
        let p = combinacoes_setor_uf(ParametrosPaginas::default())
            .find(|p| p.slug == "saude-sp")
            .unwrap();
        assert_eq!(p.titulo, "Reforma tributária: Saúde em São Paulo");
    }
}

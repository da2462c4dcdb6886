//! Lookup accumulator.
//!
//! Every reference-table lookup made during a simulation goes through a
//! [`RegistroConsultas`], which records the table, the key and whether the
//! row was found or defaulted. The confidence tier and the source list are
//! computed from this record alone.

use serde::{Deserialize, Serialize};

use crate::referencia::{Consulta, Desfecho};

/// Reference tables, in the order their provenance is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tabela {
    Setores,
    Regimes,
    Icms,
    Cronograma,
}

impl Tabela {
    pub fn nome(&self) -> &'static str {
        match self {
            Tabela::Setores => "perfil setorial",
            Tabela::Regimes => "faixa de carga do regime",
            Tabela::Icms => "ICMS estadual",
            Tabela::Cronograma => "cronograma de transição",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistroConsulta {
    pub tabela: Tabela,
    pub chave: String,
    pub desfecho: Desfecho,
}

#[derive(Debug, Clone, Default)]
pub struct RegistroConsultas {
    entradas: Vec<RegistroConsulta>,
}

impl RegistroConsultas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a lookup and hand back its value. Repeated lookups of the same
    /// key are recorded once.
    pub fn registrar<T>(&mut self, tabela: Tabela, chave: &str, consulta: Consulta<T>) -> T {
        self.marcar(tabela, chave, consulta.desfecho);
        consulta.valor
    }

    pub fn marcar(&mut self, tabela: Tabela, chave: &str, desfecho: Desfecho) {
        if self.desfecho(tabela, chave).is_none() {
            self.entradas.push(RegistroConsulta {
                tabela,
                chave: chave.to_string(),
                desfecho,
            });
        }
    }

    pub fn desfecho(&self, tabela: Tabela, chave: &str) -> Option<Desfecho> {
        self.entradas
            .iter()
            .find(|e| e.tabela == tabela && e.chave == chave)
            .map(|e| e.desfecho)
    }

    /// `true` when the lookup was made and fell back to a default.
    pub fn degradou(&self, tabela: Tabela, chave: &str) -> bool {
        self.desfecho(tabela, chave) == Some(Desfecho::Padrao)
    }

    pub fn consultou(&self, tabela: Tabela) -> bool {
        self.entradas.iter().any(|e| e.tabela == tabela)
    }

    /// Tables consulted, deduplicated, in reporting order.
    pub fn tabelas(&self) -> Vec<Tabela> {
        let mut tabelas: Vec<Tabela> = self.entradas.iter().map(|e| e.tabela).collect();
        tabelas.sort();
        tabelas.dedup();
        tabelas
    }

    pub fn degradadas(&self) -> impl Iterator<Item = &RegistroConsulta> {
        self.entradas
            .iter()
            .filter(|e| e.desfecho == Desfecho::Padrao)
    }

    pub fn entradas(&self) -> &[RegistroConsulta] {
        &self.entradas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dominio::{RegimeTributario, Setor, UF};
    use crate::referencia::TabelasReferencia;

    #[test]
    fn test_records_outcomes_per_key() {
        let t = TabelasReferencia::padrao();
        let mut r = RegistroConsultas::new();
        r.registrar(Tabela::Setores, "varejo", t.perfil_setor(Setor::Varejo));
        r.registrar(Tabela::Regimes, "nao_sei", t.faixa_carga(RegimeTributario::NaoSei));
        r.registrar(Tabela::Icms, "SP", t.icms_modal(UF::SP));

        assert_eq!(r.desfecho(Tabela::Setores, "varejo"), Some(Desfecho::Exato));
        assert!(r.degradou(Tabela::Regimes, "nao_sei"));
        assert!(!r.degradou(Tabela::Icms, "SP"));
        assert_eq!(r.degradadas().count(), 1);
    }

    #[test]
    fn test_repeated_lookup_is_recorded_once() {
        let t = TabelasReferencia::padrao();
        let mut r = RegistroConsultas::new();
        for _ in 0..3 {
            r.registrar(Tabela::Regimes, "simples", t.faixa_carga(RegimeTributario::Simples));
        }
        assert_eq!(r.entradas().len(), 1);
    }

    #[test]
    fn test_tables_in_reporting_order() {
        let mut r = RegistroConsultas::new();
        r.marcar(Tabela::Cronograma, "2026-2033", Desfecho::Exato);
        r.marcar(Tabela::Icms, "RJ", Desfecho::Exato);
        r.marcar(Tabela::Setores, "industria", Desfecho::Exato);
        assert_eq!(r.tabelas(), vec![Tabela::Setores, Tabela::Icms, Tabela::Cronograma]);
        assert!(!r.consultou(Tabela::Regimes));
    }
}

use clap::{Args, ValueEnum};
use serde_json::{json, Value};

use reforma_core::referencia::{substituir_tabelas, tabelas_atuais, TabelasReferencia};

use crate::input;

/// Arguments for the reference table dump
#[derive(Args)]
pub struct TabelasArgs {
    /// Show one table only
    #[arg(long, value_enum)]
    pub secao: Option<Secao>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Secao {
    Icms,
    Setores,
    Regimes,
}

/// Load a table set from disk and make it the active one.
pub fn carregar(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let tabelas: TabelasReferencia = input::file::read_structured(path)?;
    tracing::debug!(path, versao = tabelas.versao(), "loaded reference tables");
    substituir_tabelas(tabelas);
    Ok(())
}

pub fn run_tabelas(args: TabelasArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let t = tabelas_atuais();
    let value = match args.secao {
        None => json!({
            "result": {
                "versao": t.versao(),
                "atualizadoEm": t.atualizado_em(),
                "referenciaNacional": t.referencia_nacional().round_dp(4),
                "estados": t.linhas_icms().count(),
                "setores": t.perfis_setoriais().count(),
                "regimes": t.faixas_regime().count(),
                "marcos": t.cronograma().len(),
            }
        }),
        Some(Secao::Icms) => Value::Array(
            t.linhas_icms()
                .map(|(uf, l)| {
                    json!({
                        "uf": uf,
                        "nome": uf.nome(),
                        "aliquotaModal": l.aliquota_modal,
                        "pesoPib": l.peso_pib,
                        "fonte": l.fonte,
                    })
                })
                .collect(),
        ),
        Some(Secao::Setores) => Value::Array(
            t.perfis_setoriais()
                .map(|(setor, p)| {
                    json!({
                        "setor": setor,
                        "nome": setor.nome(),
                        "tributadoIcms": p.tributado_icms,
                        "fatorNovaCarga": p.fator_nova_carga,
                        "reducaoAliquota": p.reducao_aliquota,
                        "regimeEspecifico": p.regime_especifico,
                        "sujeitoSeletivo": p.sujeito_seletivo,
                        "margemBruta": p.margem_bruta,
                        "fatorEfetividade": p.fator_efetividade,
                    })
                })
                .collect(),
        ),
        Some(Secao::Regimes) => Value::Array(
            t.faixas_regime()
                .map(|(regime, f)| {
                    json!({
                        "regime": regime,
                        "nome": regime.nome(),
                        "atualMin": f.atual_min,
                        "atualMax": f.atual_max,
                        "projetadaMin": f.projetada_min,
                        "projetadaMax": f.projetada_max,
                    })
                })
                .collect(),
        ),
    };
    Ok(value)
}

pub fn run_cronograma() -> Result<Value, Box<dyn std::error::Error>> {
    let t = tabelas_atuais();
    Ok(serde_json::to_value(t.cronograma())?)
}

use clap::{Args, Subcommand};
use serde_json::{json, Value};

use reforma_core::dominio::{FaixaFaturamento, RegimeTributario, UF};
use reforma_core::paginas::{
    combinacoes_setor_regime, combinacoes_setor_uf, gerar_lote_paralelo, gerar_paginas,
    todas_entradas, Pagina, ParametrosPaginas, ResumoLote,
};
use reforma_core::simulador::{SimuladorInput, SimuladorResult};

/// Arguments for page generation
#[derive(Args)]
pub struct PaginasArgs {
    #[command(subcommand)]
    pub tipo: TipoPaginas,
}

#[derive(Subcommand)]
pub enum TipoPaginas {
    /// One page per sector and state
    SetorUf(FixosArgs),
    /// One page per sector and tax regime
    SetorRegime(FixosArgs),
    /// Every sector, state, regime and bracket combination, in parallel
    Lote(LoteArgs),
}

/// Dimensions held fixed while the others vary
#[derive(Args)]
pub struct FixosArgs {
    /// Regime used on sector x state pages
    #[arg(long, default_value = "lucro_presumido")]
    pub regime: String,

    /// Revenue bracket used on every page
    #[arg(long, default_value = "epp")]
    pub faturamento: String,

    /// State used on sector x regime pages
    #[arg(long, default_value = "SP")]
    pub uf: String,

    /// Include the full simulation result of each page
    #[arg(long)]
    pub completo: bool,
}

#[derive(Args)]
pub struct LoteArgs {
    /// One row per combination instead of the summary
    #[arg(long)]
    pub detalhado: bool,
}

pub fn run_paginas(args: PaginasArgs) -> Result<Value, Box<dyn std::error::Error>> {
    match args.tipo {
        TipoPaginas::SetorUf(fixos) => {
            let completo = fixos.completo;
            let paginas = gerar_paginas(combinacoes_setor_uf(parametros(&fixos)?));
            Ok(Value::Array(
                paginas.map(|(p, r)| linha_pagina(&p, &r, completo)).collect(),
            ))
        }
        TipoPaginas::SetorRegime(fixos) => {
            let completo = fixos.completo;
            let paginas = gerar_paginas(combinacoes_setor_regime(parametros(&fixos)?));
            Ok(Value::Array(
                paginas.map(|(p, r)| linha_pagina(&p, &r, completo)).collect(),
            ))
        }
        TipoPaginas::Lote(lote) => {
            let entradas: Vec<SimuladorInput> = todas_entradas().collect();
            let resultados = gerar_lote_paralelo(&entradas);
            if lote.detalhado {
                Ok(Value::Array(
                    resultados.iter().map(|(i, r)| linha_lote(i, r)).collect(),
                ))
            } else {
                Ok(json!({
                    "result": ResumoLote::from_resultados(&resultados),
                    "methodology": "Full Setor x UF x Regime x Faixa grid against one table snapshot",
                }))
            }
        }
    }
}

fn parametros(fixos: &FixosArgs) -> Result<ParametrosPaginas, Box<dyn std::error::Error>> {
    Ok(ParametrosPaginas {
        regime: fixos.regime.parse::<RegimeTributario>()?,
        faixa: fixos.faturamento.parse::<FaixaFaturamento>()?,
        uf: fixos.uf.parse::<UF>()?,
    })
}

fn linha_lote(input: &SimuladorInput, r: &SimuladorResult) -> Value {
    json!({
        "setor": input.setor,
        "uf": input.uf,
        "regime": input.regime,
        "faturamento": input.faturamento,
        "nivelRisco": r.nivel_risco,
        "percentual": r.impacto_anual.percentual,
        "confianca": r.metodologia.confianca,
    })
}

fn linha_pagina(p: &Pagina, r: &SimuladorResult, completo: bool) -> Value {
    let mut linha = json!({
        "slug": p.slug,
        "titulo": p.titulo,
    });
    if let (Value::Object(destino), Value::Object(origem)) = (&mut linha, linha_lote(&p.input, r)) {
        destino.extend(origem);
        if completo {
            destino.insert("resultado".into(), json!(r));
        }
    }
    linha
}

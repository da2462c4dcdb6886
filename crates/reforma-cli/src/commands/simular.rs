use clap::Args;
use serde_json::Value;

use reforma_core::simulador::{simular_com_metadados, SimuladorInput};

use crate::input;

/// Arguments for a single simulation
#[derive(Args)]
pub struct SimularArgs {
    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Tax regime: simples, lucro_presumido, lucro_real or nao_sei
    #[arg(long)]
    pub regime: Option<String>,

    /// Economic sector, e.g. varejo, servicos, tecnologia
    #[arg(long)]
    pub setor: Option<String>,

    /// Revenue bracket (mei, me, epp, medio, grande) or annual revenue in R$
    #[arg(long)]
    pub faturamento: Option<String>,

    /// State code, e.g. SP
    #[arg(long)]
    pub uf: Option<String>,
}

impl SimularArgs {
    fn tem_flags(&self) -> bool {
        self.regime.is_some() || self.setor.is_some() || self.faturamento.is_some() || self.uf.is_some()
    }
}

/// Input from `--input`, then individual flags, then piped stdin.
pub fn ler_entrada(args: &SimularArgs) -> Result<SimuladorInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_structured(path);
    }
    if !args.tem_flags() {
        if let Some(entrada) = input::stdin::read_stdin()? {
            return Ok(entrada);
        }
    }

    let entrada = SimuladorInput::from_raw(
        args.regime
            .as_deref()
            .ok_or("--regime is required (or provide --input)")?,
        args.setor
            .as_deref()
            .ok_or("--setor is required (or provide --input)")?,
        args.faturamento
            .as_deref()
            .ok_or("--faturamento is required (or provide --input)")?,
        args.uf
            .as_deref()
            .ok_or("--uf is required (or provide --input)")?,
    )?;
    Ok(entrada)
}

pub fn run_simular(args: SimularArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let entrada = ler_entrada(&args)?;
    let output = simular_com_metadados(&entrada);
    Ok(serde_json::to_value(output)?)
}

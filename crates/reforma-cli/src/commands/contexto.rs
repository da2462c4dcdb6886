use serde_json::{json, Value};

use reforma_core::simulador::{simular, ContextoAssistente};

use super::simular::{ler_entrada, SimularArgs};

pub fn run_contexto(args: SimularArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let entrada = ler_entrada(&args)?;
    let result = simular(&entrada);
    let contexto = ContextoAssistente::from_result(&entrada, &result);
    Ok(json!({
        "result": contexto,
        "prompt": contexto.to_prompt(),
    }))
}

use napi::Result as NapiResult;
use napi_derive::napi;
use serde_json::json;

use reforma_core::paginas::{
    combinacoes_setor_regime, combinacoes_setor_uf, gerar_paginas, Pagina, ParametrosPaginas,
};
use reforma_core::referencia::{substituir_tabelas, tabelas_atuais, TabelasReferencia};
use reforma_core::simulador::{
    simular as simular_core, simular_com_metadados, ContextoAssistente, SimuladorInput,
};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parametros(params_json: Option<String>) -> NapiResult<ParametrosPaginas> {
    match params_json.as_deref().map(str::trim) {
        None | Some("") => Ok(ParametrosPaginas::default()),
        Some(json) => serde_json::from_str(json).map_err(to_napi_error),
    }
}

fn paginas_json<I: IntoIterator<Item = Pagina>>(paginas: I) -> NapiResult<String> {
    let linhas: Vec<_> = gerar_paginas(paginas)
        .map(|(pagina, resultado)| json!({ "pagina": pagina, "resultado": resultado }))
        .collect();
    serde_json::to_string(&linhas).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

#[napi]
pub fn simular(input_json: String) -> NapiResult<String> {
    let input: SimuladorInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = simular_com_metadados(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn contexto_assistente(input_json: String) -> NapiResult<String> {
    let input: SimuladorInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let result = simular_core(&input);
    let contexto = ContextoAssistente::from_result(&input, &result);
    serde_json::to_string(&json!({
        "contexto": contexto,
        "prompt": contexto.to_prompt(),
    }))
    .map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Static pages
// ---------------------------------------------------------------------------

#[napi]
pub fn paginas_setor_uf(params_json: Option<String>) -> NapiResult<String> {
    paginas_json(combinacoes_setor_uf(parametros(params_json)?))
}

#[napi]
pub fn paginas_setor_regime(params_json: Option<String>) -> NapiResult<String> {
    paginas_json(combinacoes_setor_regime(parametros(params_json)?))
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

#[napi]
pub fn tabelas_referencia() -> NapiResult<String> {
    let tabelas = tabelas_atuais();
    serde_json::to_string(&json!({
        "tabelas": tabelas.as_ref(),
        "referenciaNacional": tabelas.referencia_nacional(),
    }))
    .map_err(to_napi_error)
}

/// Validate and activate a JSON table set. Returns the previous version.
#[napi]
pub fn carregar_tabelas(tabelas_json: String) -> NapiResult<String> {
    let tabelas = TabelasReferencia::from_json(&tabelas_json).map_err(to_napi_error)?;
    let anterior = substituir_tabelas(tabelas);
    Ok(anterior.versao().to_string())
}

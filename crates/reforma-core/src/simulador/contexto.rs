//! Compact views of a result for downstream consumers.

use serde::{Deserialize, Serialize};

use super::entrada::SimuladorInput;
use super::formato;
use super::resultado::SimuladorResult;
use crate::dominio::{NivelRisco, PressaoFormalizacao, RegimeTributario, Setor};
use crate::types::Pct;

/// Summary handed to the chat assistant as conversation context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextoAssistente {
    pub setor: Setor,
    pub regime: RegimeTributario,
    pub nivel_risco: NivelRisco,
    pub percentual: Pct,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerta_principal: Option<String>,
    pub pressao_formalizacao: PressaoFormalizacao,
}

impl ContextoAssistente {
    pub fn from_result(input: &SimuladorInput, result: &SimuladorResult) -> Self {
        ContextoAssistente {
            setor: input.setor,
            regime: input.regime,
            nivel_risco: result.nivel_risco,
            percentual: result.impacto_anual.percentual,
            alerta_principal: result.alertas.first().cloned(),
            pressao_formalizacao: result.efetividade_tributaria.pressao_formalizacao,
        }
    }

    /// Plain-text block for a system prompt.
    pub fn to_prompt(&self) -> String {
        let mut linhas = vec![
            format!("Setor: {}", self.setor.nome()),
            format!("Regime: {}", self.regime.nome()),
            format!("Nível de risco: {}", self.nivel_risco.rotulo()),
            format!("Variação da carga: {}", formato::pct(self.percentual)),
            format!("Pressão de formalização: {}", self.pressao_formalizacao.rotulo()),
        ];
        if let Some(alerta) = &self.alerta_principal {
            linhas.push(format!("Alerta principal: {alerta}"));
        }
        linhas.join("\n")
    }
}

/// Readiness-score check: a stored simulation exists.
pub fn possui_simulacao(result: Option<&SimuladorResult>) -> bool {
    result.is_some()
}

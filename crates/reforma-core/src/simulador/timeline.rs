use super::consultas::{RegistroConsultas, Tabela};
use super::resultado::Timeline;
use crate::dominio::NivelRisco;
use crate::referencia::{dados, Desfecho, TabelasReferencia};

const CHAVE_CRONOGRAMA: &str = "2026-2033";

fn narrativa(nivel: NivelRisco) -> &'static str {
    match nivel {
        NivelRisco::Baixo => {
            "A transição tende a manter ou reduzir sua carga. Use 2026, o ano de teste, para \
             ajustar a emissão de notas e aproveitar o crédito amplo da CBS e do IBS."
        }
        NivelRisco::Medio => {
            "A carga projetada sobe pouco. Acompanhe o ano de teste de 2026 e revise a \
             precificação antes da CBS plena em 2027."
        }
        NivelRisco::Alto => {
            "A carga projetada sobe de forma relevante. Planeje repasse de preços e revisão de \
             fornecedores até 2027 e acompanhe a redução gradual do ICMS e do ISS entre 2029 e 2032."
        }
        NivelRisco::Critico => {
            "A carga projetada sobe fortemente. Monte um plano de transição ainda em 2026, com \
             revisão de regime, contratos longos e preços, antes da CBS plena em 2027 e da extinção \
             do ICMS e do ISS em 2033."
        }
    }
}

/// The 2026-2033 calendar is the same for every input; only the narrative
/// depends on the risk level. An empty calendar in custom tables falls back
/// to the built-in one.
pub fn gerar_timeline(
    tabelas: &TabelasReferencia,
    nivel: NivelRisco,
    registro: &mut RegistroConsultas,
) -> Timeline {
    let entries = if tabelas.cronograma().is_empty() {
        registro.marcar(Tabela::Cronograma, CHAVE_CRONOGRAMA, Desfecho::Padrao);
        dados::tabelas_brutas_padrao().cronograma
    } else {
        registro.marcar(Tabela::Cronograma, CHAVE_CRONOGRAMA, Desfecho::Exato);
        tabelas.cronograma().to_vec()
    };
    Timeline {
        entries,
        narrative: narrativa(nivel).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_spans_2026_to_2033() {
        let t = TabelasReferencia::padrao();
        let mut r = RegistroConsultas::new();
        let tl = gerar_timeline(&t, NivelRisco::Medio, &mut r);
        let anos: Vec<i32> = tl.entries.iter().map(|e| e.ano).collect();
        assert_eq!(anos, (2026..=2033).collect::<Vec<_>>());
    }

    #[test]
    fn test_only_narrative_changes_with_risk() {
        let t = TabelasReferencia::padrao();
        let mut r = RegistroConsultas::new();
        let baixo = gerar_timeline(&t, NivelRisco::Baixo, &mut r);
        let critico = gerar_timeline(&t, NivelRisco::Critico, &mut r);
        assert_eq!(baixo.entries, critico.entries);
        assert_ne!(baixo.narrative, critico.narrative);
    }

    #[test]
    fn test_empty_calendar_falls_back() {
        let mut brutas = TabelasReferencia::padrao().into_brutas();
        brutas.cronograma.clear();
        let t = TabelasReferencia::new(brutas).unwrap();
        let mut r = RegistroConsultas::new();
        let tl = gerar_timeline(&t, NivelRisco::Alto, &mut r);
        assert_eq!(tl.entries.len(), 8);
        assert!(r.degradou(Tabela::Cronograma, CHAVE_CRONOGRAMA));
    }
}

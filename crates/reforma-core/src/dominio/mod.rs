//! Closed domain enumerations. Values are fixed by legislation, not by the
//! engine.

pub mod classificacao;
pub mod regime;
pub mod setor;
pub mod uf;

pub use classificacao::{Confianca, DirecaoAjuste, NivelRisco, PressaoFormalizacao};
pub use regime::{FaixaFaturamento, RegimeTributario, TETO_SIMPLES};
pub use setor::Setor;
pub use uf::UF;

//! Batch driver for static page generation. Sits entirely outside the
//! engine: it only builds inputs and calls the public simulation API.

pub mod combinacoes;
pub mod lote;

pub use combinacoes::{
    combinacoes_setor_regime, combinacoes_setor_uf, gerar_paginas, Pagina, ParametrosPaginas,
    TipoPagina,
};
pub use lote::{gerar_lote_paralelo, todas_entradas, ResumoLote};

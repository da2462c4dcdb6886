//! Process-wide reference data.
//!
//! The active table set sits behind an `Arc`. Readers clone the `Arc` and
//! work on that snapshot; a reload replaces the whole `Arc` at once, so a
//! calculation never sees a mix of old and new rows.

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use super::tabelas::TabelasReferencia;

static CATALOGO: LazyLock<RwLock<Arc<TabelasReferencia>>> =
    LazyLock::new(|| RwLock::new(Arc::new(TabelasReferencia::padrao())));

/// Snapshot of the active reference tables.
pub fn tabelas_atuais() -> Arc<TabelasReferencia> {
    CATALOGO
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Atomically replace the active tables. Returns the previous set.
pub fn substituir_tabelas(novas: TabelasReferencia) -> Arc<TabelasReferencia> {
    let novas = Arc::new(novas);
    tracing::info!(versao = novas.versao(), "replacing reference tables");
    let mut guard = CATALOGO.write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *guard, novas)
}

/// Restore the built-in tables. Returns the previous set.
pub fn restaurar_padrao() -> Arc<TabelasReferencia> {
    substituir_tabelas(TabelasReferencia::padrao())
}

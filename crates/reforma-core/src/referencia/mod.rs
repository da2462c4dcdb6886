//! Static reference data: state ICMS rates, sector profiles, regime burden
//! ranges and the transition calendar.

pub mod catalogo;
pub mod dados;
pub mod tabelas;

pub use catalogo::{restaurar_padrao, substituir_tabelas, tabelas_atuais};
pub use tabelas::{
    media_ponderada_pib, AliquotaIcms, Consulta, Desfecho, FaixaCarga, LinhaIcms, MarcoTransicao,
    PerfilSetor, TabelasBrutas, TabelasReferencia, CARGA_MAXIMA, FATOR_NOVA_CARGA_MAXIMO,
    FONTE_REFERENCIA_NACIONAL, PESO_PIB_MAXIMO,
};

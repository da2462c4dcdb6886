pub mod dominio;
pub mod error;
pub mod referencia;
pub mod types;

#[cfg(feature = "simulador")]
pub mod simulador;

#[cfg(feature = "paginas")]
pub mod paginas;

pub use error::ReformaError;
pub use types::*;

/// Standard result type for all reforma computations
pub type ReformaResult<T> = Result<T, ReformaError>;

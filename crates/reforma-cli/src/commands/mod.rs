pub mod contexto;
pub mod paginas;
pub mod simular;
pub mod tabelas;

//! The simulation engine: a pure function from [`SimuladorInput`] to
//! [`SimuladorResult`].

pub mod comparativo;
pub mod consultas;
pub mod contexto;
pub mod efetividade;
pub mod engine;
pub mod entrada;
pub mod formato;
pub mod metodologia;
pub mod resultado;
pub mod risco;
pub mod timeline;

pub use contexto::{possui_simulacao, ContextoAssistente};
pub use engine::{simular, simular_com, simular_com_metadados};
pub use entrada::SimuladorInput;
pub use resultado::{
    AjusteIcms, EfetividadeTributaria, ImpactoAnual, LinhaComparativo, Metodologia,
    SimuladorResult, Timeline,
};

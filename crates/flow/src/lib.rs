//! Crate `flow` — grafo de conversación y su recorrido
//!
//! Este crate define los tipos del grafo (`ConversationFlow`, `FlowStep`,
//! `FlowCondition`), la validación estructural y el recorrido paso a paso
//! (`FlowEngine`), el contrato de catálogo `FlowCatalog` y una implementación
//! en memoria útil para pruebas (`InMemoryFlowCatalog`).
//!
//! Diseño resumido:
//! - El motor es puro: toma el flujo y un contexto de calificación por
//!   referencia, decide transiciones y nunca ejecuta efectos.
//! - La validación devuelve todas las violaciones juntas, nunca corta en la
//!   primera ni se dispara en medio de un recorrido.
//! - Las condiciones con operandos mal tipados abortan con `TypeMismatch`;
//!   no existe la coerción silenciosa.
//!
//! Ejemplo rápido:
//! ```rust
//! use flow::{FlowEngine, FlowStubs};
//! let flow = FlowStubs::lead_qualification();
//! let engine = FlowEngine::new(&flow);
//! assert!(engine.validate().is_ok());
//! ```
pub mod domain;
pub mod engine;
pub mod errors;
pub mod repository;
pub mod service;
pub mod stubs;

pub use domain::*;
pub use engine::*;
pub use errors::*;
pub use repository::*;
pub use service::*;
pub use stubs::*;

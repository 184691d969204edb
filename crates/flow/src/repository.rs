// Archivo: repository.rs
// Propósito: definir el trait `FlowCatalog`, el contrato de consulta y
// registro de definiciones de flujo que consumen la capa de presentación y
// los tests. Las implementaciones concretas (en memoria, o una futura capa
// persistente externa a este crate) deben respetar el orden de registro.
use crate::domain::ConversationFlow;
use crate::errors::Result;

/// Contrato mínimo del catálogo de flujos.
///
/// El catálogo es una superficie de lectura: registra definiciones completas
/// y las devuelve por id o en bloque. No ejecuta flujos ni guarda estado de
/// conversaciones.
pub trait FlowCatalog: Send + Sync {
    /// Registra una definición. Un id ya registrado es `FlowError::Conflict`;
    /// una definición estructuralmente inválida es `FlowError::Invalid` con
    /// la lista completa de violaciones.
    fn register(&self, flow: ConversationFlow) -> Result<()>;

    /// Devuelve la definición con ese id, si existe.
    fn get(&self, flow_id: &str) -> Result<Option<ConversationFlow>>;

    /// Todas las definiciones, en orden de registro.
    fn list(&self) -> Result<Vec<ConversationFlow>>;

    /// Verifica si existe una definición con ese id.
    fn contains(&self, flow_id: &str) -> Result<bool>;

    /// Cantidad de flujos marcados activos.
    fn active_count(&self) -> Result<usize>;
}

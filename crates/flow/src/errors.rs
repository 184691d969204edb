// Archivo: errors.rs
// Propósito: definir los errores del crate y el alias Result<T> usado por
// las APIs. Los problemas estructurales de un flujo no son errores sueltos:
// se reportan completos como lista de `ValidationIssue`.
use thiserror::Error;

/// Errores operativos del crate de flujos.
///
/// - `NotFound`: paso o flujo inexistente.
/// - `TypeMismatch`: operador aplicado sobre operandos de tipo incompatible.
/// - `Invalid`: se intentó registrar un flujo estructuralmente inválido.
/// - `Conflict`: colisión de ids en el catálogo.
/// - `Storage`: error al acceder al almacenamiento en memoria.
#[derive(Error, Debug)]
pub enum FlowError {
    /// Paso o flujo no encontrado.
    #[error("No encontrado: {0}")]
    NotFound(String),
    /// Un operador de condición recibió operandos de tipos incompatibles.
    /// La evaluación de esa lista de condiciones se aborta: nunca se degrada
    /// a un "no coincide" silencioso.
    #[error("Tipo incompatible al evaluar el campo '{field}': {detail}")]
    TypeMismatch { field: String, detail: String },
    /// El flujo no pasó la validación estructural; contiene cada violación.
    #[error("Flujo inválido: {0:?}")]
    Invalid(Vec<ValidationIssue>),
    /// Conflicto de ids (por ejemplo, registrar dos veces el mismo flujo).
    #[error("Conflicto: {0}")]
    Conflict(String),
    /// Error genérico de almacenamiento.
    #[error("Error de almacenamiento: {0}")]
    Storage(String),
    /// Error de serialización JSON.
    #[error("Error de serialización: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Otro tipo de error.
    #[error("Otro: {0}")]
    Other(String),
}

/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, FlowError>;

/// Violación estructural detectada por `FlowEngine::validate`. La validación
/// reporta todas las violaciones encontradas, no sólo la primera, cada una
/// etiquetada con el paso ofensor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// La colección de pasos está vacía.
    #[error("El flujo no contiene pasos")]
    EmptyFlow,
    /// Dos pasos comparten el mismo id.
    #[error("Id de paso duplicado: {step_id}")]
    DuplicateStepId { step_id: String },
    /// Un `next_step` o el destino de una condición no existe en el flujo.
    #[error("El paso {step_id} referencia un paso inexistente: {target}")]
    DanglingReference { step_id: String, target: String },
}

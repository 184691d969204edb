// Archivo: service.rs
// Propósito: implementar `FlowService`, una capa fina que combina el
// catálogo con el motor para exponer operaciones de alto nivel (validar una
// definición registrada, avanzar un cursor). Pensada para ser invocada desde
// una capa de presentación.
use crate::engine::FlowEngine;
use crate::errors::{FlowError, Result, ValidationIssue};
use crate::repository::FlowCatalog;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Servicio de alto nivel sobre un catálogo de flujos.
pub struct FlowService<C>
    where C: FlowCatalog
{
    catalog: Arc<C>,
}

impl<C> FlowService<C> where C: FlowCatalog
{
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Valida la definición registrada bajo `flow_id` y devuelve la lista de
    /// violaciones (vacía si el flujo es íntegro). `NotFound` si el id no
    /// está en el catálogo.
    pub fn validate(&self, flow_id: &str) -> Result<Vec<ValidationIssue>> {
        let flow = self.catalog
                       .get(flow_id)?
                       .ok_or_else(|| FlowError::NotFound(format!("flujo {}", flow_id)))?;
        match FlowEngine::new(&flow).validate() {
            Ok(()) => Ok(Vec::new()),
            Err(issues) => Ok(issues),
        }
    }

    /// Decide la transición desde `current_step` del flujo `flow_id` con el
    /// contexto dado. Devuelve el id del próximo paso, o `None` cuando el
    /// flujo queda detenido (sin coincidencia, o paso `action` delegado al
    /// ejecutor externo).
    pub fn advance(&self, flow_id: &str, current_step: &str, context: &JsonValue) -> Result<Option<String>> {
        let flow = self.catalog
                       .get(flow_id)?
                       .ok_or_else(|| FlowError::NotFound(format!("flujo {}", flow_id)))?;
        let engine = FlowEngine::new(&flow);
        Ok(engine.next_step(current_step, context)?.map(|s| s.to_string()))
    }

    /// Pasos huérfanos de una definición registrada, para advertencias de UI.
    pub fn unreachable_steps(&self, flow_id: &str) -> Result<Vec<String>> {
        let flow = self.catalog
                       .get(flow_id)?
                       .ok_or_else(|| FlowError::NotFound(format!("flujo {}", flow_id)))?;
        let engine = FlowEngine::new(&flow);
        Ok(engine.unreachable_steps().into_iter().map(|s| s.to_string()).collect())
    }
}

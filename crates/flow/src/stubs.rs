// Archivo: stubs.rs
// Propósito: implementación en memoria del catálogo y definiciones de
// ejemplo para pruebas y wiring rápido. Nada de esto es durable.
use crate::domain::{ConditionOperator, ConversationFlow, FlowCondition, FlowStep, StepKind};
use crate::engine::FlowEngine;
use crate::errors::{FlowError, Result};
use crate::repository::FlowCatalog;
use indexmap::IndexMap;
use serde_json::json;
use std::sync::{Mutex, MutexGuard};

/// Catálogo en memoria. Conserva el orden de registro (mapa indexado) y
/// valida cada definición antes de aceptarla.
pub struct InMemoryFlowCatalog {
    flows: Mutex<IndexMap<String, ConversationFlow>>,
}

impl InMemoryFlowCatalog {
    pub fn new() -> Self {
        Self { flows: Mutex::new(IndexMap::new()) }
    }

    /// Helper para mapear `Mutex::lock()` en un `Result` con
    /// `FlowError::Storage`.
    fn lock(&self) -> std::result::Result<MutexGuard<'_, IndexMap<String, ConversationFlow>>, FlowError> {
        self.flows
            .lock()
            .map_err(|e| FlowError::Storage(format!("mutex poisoned: {:?}", e)))
    }
}

impl Default for InMemoryFlowCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowCatalog for InMemoryFlowCatalog {
    fn register(&self, flow: ConversationFlow) -> Result<()> {
        if let Err(issues) = FlowEngine::new(&flow).validate() {
            return Err(FlowError::Invalid(issues));
        }
        let mut flows = self.lock()?;
        if flows.contains_key(&flow.id) {
            return Err(FlowError::Conflict(format!("flujo ya registrado: {}", flow.id)));
        }
        flows.insert(flow.id.clone(), flow);
        Ok(())
    }

    fn get(&self, flow_id: &str) -> Result<Option<ConversationFlow>> {
        Ok(self.lock()?.get(flow_id).cloned())
    }

    fn list(&self) -> Result<Vec<ConversationFlow>> {
        Ok(self.lock()?.values().cloned().collect())
    }

    fn contains(&self, flow_id: &str) -> Result<bool> {
        Ok(self.lock()?.contains_key(flow_id))
    }

    fn active_count(&self) -> Result<usize> {
        Ok(self.lock()?.values().filter(|f| f.is_active).count())
    }
}

pub struct FlowStubs;

impl FlowStubs {
    /// Flujo de calificación de leads: mensaje de apertura, dos preguntas,
    /// una ramificación por presupuesto y las acciones finales.
    pub fn lead_qualification() -> ConversationFlow {
        ConversationFlow {
            id: "lead-qualification".into(),
            name: "Lead Qualification Flow".into(),
            description: "Qualify leads based on budget, authority, need, and timeline".into(),
            category: "Sales".into(),
            is_active: true,
            steps: vec![
                FlowStep { id: "step-1".into(),
                           kind: StepKind::Message { content: "Hi {{name}}! Thanks for your interest in our \
                                                               automation solutions. I'd love to learn more about \
                                                               your business needs."
                                                                                  .into(),
                                                     delay: Some(2),
                                                     next_step: Some("step-2".into()) } },
                FlowStep { id: "step-2".into(),
                           kind: StepKind::Question { content: "What's your current monthly lead volume?".into(),
                                                      options: vec!["0-100".into(),
                                                                    "100-500".into(),
                                                                    "500-1000".into(),
                                                                    "1000+".into()],
                                                      next_step: Some("step-3".into()) } },
                FlowStep { id: "step-3".into(),
                           kind: StepKind::Question { content: "What's your budget range for automation tools?".into(),
                                                      options: vec!["Under $500".into(),
                                                                    "$500-$2000".into(),
                                                                    "$2000-$5000".into(),
                                                                    "$5000+".into()],
                                                      next_step: Some("step-4".into()) } },
                FlowStep { id: "step-4".into(),
                           kind: StepKind::Condition { conditions: vec![
                               FlowCondition { field: "budget".into(),
                                               operator: ConditionOperator::Equals,
                                               value: json!("enterprise"),
                                               next_step: "step-5".into() },
                               FlowCondition { field: "score".into(),
                                               operator: ConditionOperator::Greater,
                                               value: json!(60),
                                               next_step: "step-5".into() },
                           ] } },
                FlowStep { id: "step-5".into(),
                           kind: StepKind::Action { content: "schedule-demo".into(), next_step: None } },
            ],
        }
    }

    /// Secuencia de seguimiento para leads que no respondieron.
    pub fn follow_up_sequence() -> ConversationFlow {
        ConversationFlow {
            id: "follow-up-sequence".into(),
            name: "Follow-up Sequence".into(),
            description: "Automated follow-up for unresponsive leads".into(),
            category: "Nurturing".into(),
            is_active: true,
            steps: vec![
                FlowStep { id: "followup-1".into(),
                           kind: StepKind::Message { content: "Hi {{name}}, just following up on our automation \
                                                               discussion. Have you had a chance to consider how \
                                                               this could benefit {{company}}?"
                                                                                               .into(),
                                                     delay: Some(1440),
                                                     next_step: Some("followup-2".into()) } },
                FlowStep { id: "followup-2".into(),
                           kind: StepKind::Question { content: "Would you like to schedule a quick call?".into(),
                                                      options: vec!["Yes".into(), "Not yet".into()],
                                                      next_step: None } },
            ],
        }
    }

    pub fn sample_flows() -> Vec<ConversationFlow> {
        vec![Self::lead_qualification(), Self::follow_up_sequence()]
    }

    /// Catálogo en memoria pre-poblado con las definiciones de ejemplo.
    pub fn sample_catalog() -> InMemoryFlowCatalog {
        let catalog = InMemoryFlowCatalog::new();
        for flow in Self::sample_flows() {
            catalog.register(flow).expect("las definiciones de ejemplo son válidas");
        }
        catalog
    }
}

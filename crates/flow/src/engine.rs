// Archivo: engine.rs
// Propósito: validación estructural y recorrido paso a paso de un
// `ConversationFlow`. El motor no ejecuta efectos: decide transiciones y
// deja los side-effects (envíos, acciones) a un ejecutor externo.
use crate::domain::{ConversationFlow, FlowStep, StepKind};
use crate::errors::{FlowError, Result, ValidationIssue};
use indexmap::IndexSet;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::collections::VecDeque;

/// Vista indexada de un flujo, con las operaciones de consulta y recorrido.
///
/// El motor toma el flujo por referencia y no lo muta; construirlo es barato
/// (un índice id -> paso). Ante ids duplicados el índice retiene la primera
/// aparición y `validate` reporta el duplicado.
pub struct FlowEngine<'a> {
    flow: &'a ConversationFlow,
    index: HashMap<&'a str, &'a FlowStep>,
}

impl<'a> FlowEngine<'a> {
    pub fn new(flow: &'a ConversationFlow) -> Self {
        let mut index: HashMap<&str, &FlowStep> = HashMap::with_capacity(flow.steps.len());
        for step in &flow.steps {
            index.entry(step.id.as_str()).or_insert(step);
        }
        Self { flow, index }
    }

    pub fn flow(&self) -> &'a ConversationFlow {
        self.flow
    }

    /// Verifica la integridad estructural del grafo y devuelve todas las
    /// violaciones encontradas: pasos duplicados, referencias colgantes y el
    /// caso de flujo vacío. Una lista vacía de violaciones es `Ok(())`.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationIssue>> {
        let mut issues = Vec::new();
        if self.flow.steps.is_empty() {
            issues.push(ValidationIssue::EmptyFlow);
        }

        let mut vistos: IndexSet<&str> = IndexSet::with_capacity(self.flow.steps.len());
        for step in &self.flow.steps {
            if !vistos.insert(step.id.as_str()) {
                issues.push(ValidationIssue::DuplicateStepId { step_id: step.id.clone() });
            }
        }

        for step in &self.flow.steps {
            for target in step.declared_targets() {
                if !vistos.contains(target) {
                    issues.push(ValidationIssue::DanglingReference { step_id: step.id.clone(),
                                                                     target: target.to_string() });
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    pub fn contains_step(&self, step_id: &str) -> bool {
        self.index.contains_key(step_id)
    }

    /// Busca un paso por id.
    pub fn step(&self, step_id: &str) -> Result<&'a FlowStep> {
        self.index
            .get(step_id)
            .copied()
            .ok_or_else(|| FlowError::NotFound(format!("paso {} en el flujo {}", step_id, self.flow.id)))
    }

    /// Decide la transición desde `current_id` dado un contexto de
    /// calificación (objeto JSON campo -> valor).
    ///
    /// - `message` y `question` devuelven su `next_step` estático.
    /// - `condition` evalúa sus condiciones en el orden declarado y devuelve
    ///   el destino de la primera que coincide; sin coincidencia devuelve
    ///   `None` (el flujo queda detenido, no es un error). Un operando mal
    ///   tipado aborta con `TypeMismatch`.
    /// - `action` devuelve `None`: la continuación queda en manos del
    ///   ejecutor externo.
    pub fn next_step(&self, current_id: &str, context: &JsonValue) -> Result<Option<&'a str>> {
        let step = self.step(current_id)?;
        match &step.kind {
            StepKind::Message { next_step, .. } | StepKind::Question { next_step, .. } => Ok(next_step.as_deref()),
            StepKind::Action { .. } => Ok(None),
            StepKind::Condition { conditions } => {
                for condition in conditions {
                    if condition.matches(context)? {
                        return Ok(Some(condition.next_step.as_str()));
                    }
                }
                Ok(None)
            }
        }
    }

    /// Conjunto de pasos alcanzables desde `entry_id` siguiendo todas las
    /// aristas declaradas (BFS). El conjunto conserva el orden de
    /// descubrimiento y la búsqueda termina aunque el grafo tenga ciclos.
    pub fn reachable_from(&self, entry_id: &str) -> IndexSet<&'a str> {
        let mut visitados: IndexSet<&str> = IndexSet::new();
        let mut cola: VecDeque<&str> = VecDeque::new();
        if let Some(step) = self.index.get(entry_id) {
            visitados.insert(step.id.as_str());
            cola.push_back(step.id.as_str());
        }
        while let Some(actual) = cola.pop_front() {
            let step = match self.index.get(actual) {
                Some(s) => *s,
                None => continue,
            };
            for target in step.declared_targets() {
                if let Some(next) = self.index.get(target) {
                    if visitados.insert(next.id.as_str()) {
                        cola.push_back(next.id.as_str());
                    }
                }
            }
        }
        visitados
    }

    /// Alcanzabilidad desde la entrada del flujo (el primer paso).
    pub fn reachable_steps(&self) -> IndexSet<&'a str> {
        match self.flow.entry_step() {
            Some(entry) => self.reachable_from(&entry.id),
            None => IndexSet::new(),
        }
    }

    /// Pasos huérfanos: declarados pero inalcanzables desde la entrada. No
    /// son un error de validación; la capa de presentación los muestra como
    /// advertencia.
    pub fn unreachable_steps(&self) -> Vec<&'a str> {
        let alcanzables = self.reachable_steps();
        self.flow
            .steps
            .iter()
            .map(|s| s.id.as_str())
            .filter(|id| !alcanzables.contains(id))
            .collect()
    }
}

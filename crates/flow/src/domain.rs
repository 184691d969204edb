// Archivo: domain.rs
// Propósito: tipos del grafo de conversación. Un `ConversationFlow` es un
// grafo dirigido de `FlowStep` enlazados por `next_step` y por los destinos
// de sus condiciones. El primer paso de la secuencia es, por convención, la
// entrada del flujo.
use crate::errors::{FlowError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Operador de una condición. `greater` y `less` sólo aplican a números;
/// `contains` sólo a cadenas; `equals` exige que ambos operandos sean del
/// mismo tipo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    Contains,
    Greater,
    Less,
}

/// Condición de ramificación: compara `context[field]` contra `value` y, si
/// coincide, transfiere el control a `next_step`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowCondition {
    pub field: String,
    pub operator: ConditionOperator,
    pub value: JsonValue,
    pub next_step: String,
}

fn json_kind(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

impl FlowCondition {
    /// Evalúa la condición contra un contexto (objeto JSON, típicamente los
    /// datos de calificación de una conversación).
    ///
    /// Un campo ausente del contexto no coincide y no es un error; un campo
    /// presente con tipo incompatible corta la evaluación con
    /// `FlowError::TypeMismatch`.
    pub fn matches(&self, context: &JsonValue) -> Result<bool> {
        let actual = match context.get(&self.field) {
            Some(v) => v,
            None => return Ok(false),
        };
        match self.operator {
            ConditionOperator::Equals => match (actual, &self.value) {
                (JsonValue::String(a), JsonValue::String(b)) => Ok(a == b),
                (JsonValue::Number(_), JsonValue::Number(_)) => self.compare_numbers(actual, &self.value)
                                                                    .map(|ord| ord == std::cmp::Ordering::Equal),
                _ => Err(self.type_mismatch(actual, "equals exige dos cadenas o dos números")),
            },
            ConditionOperator::Contains => match (actual, &self.value) {
                (JsonValue::String(a), JsonValue::String(b)) => Ok(a.contains(b.as_str())),
                _ => Err(self.type_mismatch(actual, "contains exige dos cadenas")),
            },
            ConditionOperator::Greater => self.compare_numbers(actual, &self.value)
                                              .map(|ord| ord == std::cmp::Ordering::Greater),
            ConditionOperator::Less => self.compare_numbers(actual, &self.value)
                                           .map(|ord| ord == std::cmp::Ordering::Less),
        }
    }

    fn compare_numbers(&self, actual: &JsonValue, expected: &JsonValue) -> Result<std::cmp::Ordering> {
        let a = actual.as_f64();
        let b = expected.as_f64();
        match (a, b) {
            (Some(a), Some(b)) => a.partial_cmp(&b)
                                   .ok_or_else(|| self.type_mismatch(actual, "comparación numérica indefinida")),
            _ => Err(self.type_mismatch(actual, "el operador exige dos números")),
        }
    }

    fn type_mismatch(&self, actual: &JsonValue, detail: &str) -> FlowError {
        FlowError::TypeMismatch { field: self.field.clone(),
                                  detail: format!("{} (contexto: {}, condición: {})",
                                                  detail,
                                                  json_kind(actual),
                                                  json_kind(&self.value)) }
    }
}

/// Carga específica de cada clase de paso. El tag `type` viaja en el JSON;
/// una variante desconocida es un error de deserialización, nunca una rama
/// por defecto silenciosa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepKind {
    /// Mensaje saliente. `delay` son minutos de espera antes del envío.
    Message {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delay: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next_step: Option<String>,
    },
    /// Pregunta con opciones seleccionables, en orden.
    Question {
        content: String,
        options: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next_step: Option<String>,
    },
    /// Ramificación: las condiciones se evalúan en el orden declarado y gana
    /// la primera que coincide. Sin coincidencia no hay transición.
    Condition { conditions: Vec<FlowCondition> },
    /// Disparador opaco de un efecto; el `content` es un identificador que
    /// entiende el ejecutor de automatizaciones externo.
    Action {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next_step: Option<String>,
    },
}

/// Nodo del grafo: un id más su carga polimórfica.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowStep {
    pub id: String,
    #[serde(flatten)]
    pub kind: StepKind,
}

impl FlowStep {
    /// Nombre del tag de la variante, útil para listados.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            StepKind::Message { .. } => "message",
            StepKind::Question { .. } => "question",
            StepKind::Condition { .. } => "condition",
            StepKind::Action { .. } => "action",
        }
    }

    /// El `next_step` estático del paso, si la variante lo lleva.
    pub fn static_next(&self) -> Option<&str> {
        match &self.kind {
            StepKind::Message { next_step, .. }
            | StepKind::Question { next_step, .. }
            | StepKind::Action { next_step, .. } => next_step.as_deref(),
            StepKind::Condition { .. } => None,
        }
    }

    /// Todas las aristas declaradas por el paso: el `next_step` estático más
    /// los destinos de cada condición. Es la vista de grafo que usan la
    /// validación y el análisis de alcanzabilidad.
    pub fn declared_targets(&self) -> Vec<&str> {
        match &self.kind {
            StepKind::Condition { conditions } => conditions.iter().map(|c| c.next_step.as_str()).collect(),
            _ => self.static_next().into_iter().collect(),
        }
    }
}

/// Definición con nombre de una secuencia de automatización.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationFlow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub is_active: bool,
    pub steps: Vec<FlowStep>,
}

impl ConversationFlow {
    /// Paso de entrada: el primero de la secuencia, por convención.
    pub fn entry_step(&self) -> Option<&FlowStep> {
        self.steps.first()
    }

    /// Huella canónica de la definición: hash de los pasos ordenados por id,
    /// independiente del orden de declaración de campos. Dos definiciones con
    /// la misma huella son intercambiables.
    pub fn definition_hash(&self) -> Result<String> {
        let mut pasos: Vec<(&str, Vec<u8>)> = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            pasos.push((step.id.as_str(), serde_json::to_vec(&step.kind)?));
        }
        pasos.sort_by(|a, b| a.0.cmp(b.0));
        let mut hasher = blake3::Hasher::new();
        for (id, bytes) in pasos {
            hasher.update(id.as_bytes());
            hasher.update(&bytes);
        }
        Ok(hasher.finalize().to_hex().to_string())
    }

    pub fn is_equivalent(&self, other: &ConversationFlow) -> Result<bool> {
        Ok(self.definition_hash()? == other.definition_hash()?)
    }
}

/// Sustituye los marcadores `{{clave}}` del contenido por los valores del
/// contexto. Claves ausentes quedan tal cual, para que el texto delate el
/// dato faltante en lugar de desaparecer en silencio.
pub fn render_placeholders(content: &str, context: &JsonValue) -> String {
    let map = match context.as_object() {
        Some(m) => m,
        None => return content.to_string(),
    };
    let mut out = content.to_string();
    for (key, value) in map {
        let marker = format!("{{{{{}}}}}", key);
        if !out.contains(&marker) {
            continue;
        }
        let text = match value {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        };
        out = out.replace(&marker, &text);
    }
    out
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn step_kind_round_trip() {
    let step = FlowStep { id: "step-1".into(),
                          kind: StepKind::Message { content: "Hola {{name}}".into(),
                                                    delay: Some(2),
                                                    next_step: Some("step-2".into()) } };
    let raw = serde_json::to_value(&step).expect("serializar");
    assert_eq!(raw["type"], "message");
    assert_eq!(raw["id"], "step-1");
    let back: FlowStep = serde_json::from_value(raw).expect("deserializar");
    assert_eq!(back, step);
  }

  #[test]
  fn unknown_step_type_is_rejected() {
    let raw = json!({"id": "x", "type": "teleport", "content": "?"});
    let parsed: std::result::Result<FlowStep, _> = serde_json::from_value(raw);
    assert!(parsed.is_err());
  }

  #[test]
  fn placeholders_are_rendered() {
    let ctx = json!({"name": "Sarah", "company": "TechCorp"});
    let out = render_placeholders("Hi {{name}}, how is {{company}}?", &ctx);
    assert_eq!(out, "Hi Sarah, how is TechCorp?");
    // clave ausente: el marcador queda visible
    let out = render_placeholders("Hi {{nickname}}", &ctx);
    assert_eq!(out, "Hi {{nickname}}");
  }

  #[test]
  fn definition_hash_ignores_declaration_order() {
    let a = FlowStep { id: "a".into(),
                       kind: StepKind::Message { content: "1".into(), delay: None, next_step: Some("b".into()) } };
    let b = FlowStep { id: "b".into(),
                       kind: StepKind::Action { content: "notify".into(), next_step: None } };
    let f1 = ConversationFlow { id: "f".into(),
                                name: "F".into(),
                                description: String::new(),
                                category: "test".into(),
                                is_active: true,
                                steps: vec![a.clone(), b.clone()] };
    let mut f2 = f1.clone();
    f2.steps = vec![b, a];
    assert!(f1.is_equivalent(&f2).expect("hash"));
  }
}

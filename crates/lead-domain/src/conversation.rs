// conversation.rs
use crate::contact::MAX_LEAD_SCORE;
use crate::{DomainError, Message};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
  Active,
  Paused,
  Completed,
  Failed,
}

impl ConversationStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      ConversationStatus::Active => "active",
      ConversationStatus::Paused => "paused",
      ConversationStatus::Completed => "completed",
      ConversationStatus::Failed => "failed",
    }
  }

  pub fn is_terminal(&self) -> bool {
    matches!(self, ConversationStatus::Completed | ConversationStatus::Failed)
  }
}

impl fmt::Display for ConversationStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Un intercambio en curso con exactamente un contacto (`contact_id` es una
/// referencia propietaria).
///
/// Invariante del cursor: si `current_flow` está presente, `current_step`
/// debe nombrar un paso válido de ese flujo, o ser `None` para indicar que la
/// ejecución todavía no arrancó. La verificación contra la definición del
/// flujo corre del lado del caller (ver `FlowEngine::contains_step` en el
/// crate `flow`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
  id: String,
  contact_id: String,
  status: ConversationStatus,
  current_flow: Option<String>,
  current_step: Option<String>,
  messages: Vec<Message>,
  lead_score: u8,
  qualification_data: IndexMap<String, serde_json::Value>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl Conversation {
  pub fn new(id: &str, contact_id: &str, created_at: DateTime<Utc>) -> Result<Self, DomainError> {
    if id.trim().is_empty() {
      return Err(DomainError::ValidationError("El id de la conversación no puede estar vacío".to_string()));
    }
    if contact_id.trim().is_empty() {
      return Err(DomainError::ValidationError("La conversación debe referenciar un contacto".to_string()));
    }
    Ok(Self { id: id.to_string(),
              contact_id: contact_id.to_string(),
              status: ConversationStatus::Active,
              current_flow: None,
              current_step: None,
              messages: Vec::new(),
              lead_score: 0,
              qualification_data: IndexMap::new(),
              created_at,
              updated_at: created_at })
  }

  pub fn with_status(&self, status: ConversationStatus) -> Self {
    let mut c = self.clone();
    c.status = status;
    c
  }

  /// Posiciona el cursor de ejecución sobre un flujo. `step` en `None`
  /// significa "aún no iniciado".
  pub fn with_flow_cursor(&self, flow_id: impl Into<String>, step: Option<String>) -> Self {
    let mut c = self.clone();
    c.current_flow = Some(flow_id.into());
    c.current_step = step;
    c
  }

  pub fn with_lead_score(&self, score: u8) -> Result<Self, DomainError> {
    if score > MAX_LEAD_SCORE {
      return Err(DomainError::ValidationError(format!("El puntaje del lead debe estar entre 0 y {}: {}",
                                                      MAX_LEAD_SCORE, score)));
    }
    let mut c = self.clone();
    c.lead_score = score;
    Ok(c)
  }

  /// Agrega un mensaje al final del hilo. El mensaje debe pertenecer a esta
  /// conversación y no puede retroceder en el tiempo respecto del último.
  pub fn with_message(&self, message: Message) -> Result<Self, DomainError> {
    if message.conversation_id() != self.id {
      return Err(DomainError::ValidationError(format!("El mensaje {} pertenece a la conversación {}, no a {}",
                                                      message.id(),
                                                      message.conversation_id(),
                                                      self.id)));
    }
    if let Some(last) = self.messages.last() {
      if message.timestamp() < last.timestamp() {
        return Err(DomainError::ValidationError(format!("El mensaje {} rompe el orden cronológico del hilo",
                                                        message.id())));
      }
    }
    let mut c = self.clone();
    c.updated_at = c.updated_at.max(message.timestamp());
    c.messages.push(message);
    Ok(c)
  }

  /// Registra una señal de calificación (presupuesto, urgencia, autoridad...)
  /// recolectada durante el intercambio.
  pub fn with_qualification(&self, key: impl Into<String>, value: serde_json::Value) -> Self {
    let mut c = self.clone();
    c.qualification_data.insert(key.into(), value);
    c
  }

  /// Expone los datos de calificación como objeto JSON, el formato que espera
  /// la evaluación de condiciones del crate `flow`.
  pub fn qualification_context(&self) -> serde_json::Value {
    serde_json::Value::Object(self.qualification_data
                                  .iter()
                                  .map(|(k, v)| (k.clone(), v.clone()))
                                  .collect())
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn contact_id(&self) -> &str {
    &self.contact_id
  }

  pub fn status(&self) -> ConversationStatus {
    self.status
  }

  pub fn current_flow(&self) -> Option<&str> {
    self.current_flow.as_deref()
  }

  pub fn current_step(&self) -> Option<&str> {
    self.current_step.as_deref()
  }

  pub fn messages(&self) -> &[Message] {
    &self.messages
  }

  pub fn last_message(&self) -> Option<&Message> {
    self.messages.last()
  }

  pub fn lead_score(&self) -> u8 {
    self.lead_score
  }

  pub fn qualification_data(&self) -> &IndexMap<String, serde_json::Value> {
    &self.qualification_data
  }

  pub fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  pub fn updated_at(&self) -> DateTime<Utc> {
    self.updated_at
  }
}

impl fmt::Display for Conversation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f,
           "Conversation({}, contacto: {}, estado: {}, mensajes: {})",
           self.id,
           self.contact_id,
           self.status,
           self.messages.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::MessageDirection;
  use chrono::Duration;
  use serde_json::json;

  #[test]
  fn test_conversation_messages_in_order() -> Result<(), DomainError> {
    let t0 = Utc::now();
    let conv = Conversation::new("conv-1", "1", t0)?;
    let m1 = Message::new("msg-1", "conv-1", "Hola", MessageDirection::Sent, t0)?;
    let m2 = Message::new("msg-2", "conv-1", "Buenas", MessageDirection::Received, t0 + Duration::minutes(5))?;
    let conv = conv.with_message(m1)?.with_message(m2)?;
    assert_eq!(conv.messages().len(), 2);
    assert_eq!(conv.last_message().map(|m| m.id()), Some("msg-2"));
    assert_eq!(conv.updated_at(), t0 + Duration::minutes(5));
    Ok(())
  }

  #[test]
  fn test_conversation_rejects_foreign_message() -> Result<(), DomainError> {
    let conv = Conversation::new("conv-1", "1", Utc::now())?;
    let ajeno = Message::new("msg-9", "conv-9", "hola", MessageDirection::Sent, Utc::now())?;
    assert!(conv.with_message(ajeno).is_err());
    Ok(())
  }

  #[test]
  fn test_conversation_rejects_backwards_timestamp() -> Result<(), DomainError> {
    let t0 = Utc::now();
    let conv = Conversation::new("conv-1", "1", t0)?;
    let m1 = Message::new("msg-1", "conv-1", "Hola", MessageDirection::Sent, t0)?;
    let viejo = Message::new("msg-2", "conv-1", "ayer", MessageDirection::Sent, t0 - Duration::hours(1))?;
    let conv = conv.with_message(m1)?;
    assert!(conv.with_message(viejo).is_err());
    Ok(())
  }

  #[test]
  fn test_qualification_context_is_object() -> Result<(), DomainError> {
    let conv = Conversation::new("conv-1", "1", Utc::now())?.with_qualification("budget", json!("enterprise"))
                                                            .with_qualification("score", json!(60));
    let ctx = conv.qualification_context();
    assert_eq!(ctx["budget"], json!("enterprise"));
    assert_eq!(ctx["score"], json!(60));
    Ok(())
  }
}

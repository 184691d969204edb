// message.rs
use crate::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageDirection {
  Sent,
  Received,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
  Text,
  Template,
  Media,
}

/// Unidad atómica de una conversación. Inmutable una vez creada; dentro de
/// una conversación los mensajes se ordenan por timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
  id: String,
  conversation_id: String,
  content: String,
  direction: MessageDirection,
  timestamp: DateTime<Utc>,
  is_automated: bool,
  kind: MessageKind,
}

impl Message {
  pub fn new(id: &str,
             conversation_id: &str,
             content: &str,
             direction: MessageDirection,
             timestamp: DateTime<Utc>)
             -> Result<Self, DomainError> {
    if id.trim().is_empty() {
      return Err(DomainError::ValidationError("El id del mensaje no puede estar vacío".to_string()));
    }
    if conversation_id.trim().is_empty() {
      return Err(DomainError::ValidationError("El mensaje debe referenciar una conversación".to_string()));
    }
    if content.trim().is_empty() {
      return Err(DomainError::ValidationError("El contenido del mensaje no puede estar vacío".to_string()));
    }
    Ok(Self { id: id.to_string(),
              conversation_id: conversation_id.to_string(),
              content: content.to_string(),
              direction,
              timestamp,
              is_automated: false,
              kind: MessageKind::Text })
  }

  pub fn with_kind(&self, kind: MessageKind) -> Self {
    let mut m = self.clone();
    m.kind = kind;
    m
  }

  /// Marca el mensaje como generado por la automatización.
  pub fn automated(&self) -> Self {
    let mut m = self.clone();
    m.is_automated = true;
    m
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn conversation_id(&self) -> &str {
    &self.conversation_id
  }

  pub fn content(&self) -> &str {
    &self.content
  }

  pub fn direction(&self) -> MessageDirection {
    self.direction
  }

  pub fn timestamp(&self) -> DateTime<Utc> {
    self.timestamp
  }

  pub fn is_automated(&self) -> bool {
    self.is_automated
  }

  pub fn kind(&self) -> MessageKind {
    self.kind
  }
}

impl fmt::Display for Message {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let dir = match self.direction {
      MessageDirection::Sent => "->",
      MessageDirection::Received => "<-",
    };
    write!(f, "Message({} {} {})", self.id, dir, self.conversation_id)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_message_creation() -> Result<(), DomainError> {
    let m = Message::new("msg-1", "conv-1", "Hola", MessageDirection::Sent, Utc::now())?.with_kind(MessageKind::Template)
                                                                                       .automated();
    assert!(m.is_automated());
    assert_eq!(m.kind(), MessageKind::Template);
    Ok(())
  }

  #[test]
  fn test_message_requires_conversation() {
    assert!(Message::new("msg-1", "", "Hola", MessageDirection::Sent, Utc::now()).is_err());
    assert!(Message::new("msg-1", "conv-1", "", MessageDirection::Sent, Utc::now()).is_err());
  }
}

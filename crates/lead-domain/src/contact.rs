// contact.rs
use crate::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Puntaje máximo de calificación de un lead.
pub const MAX_LEAD_SCORE: u8 = 100;

/// Estado del lead dentro del embudo de captación.
///
/// `OptedOut` es terminal: el contacto pidió no ser contactado y no se
/// elimina del sistema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
  New,
  Contacted,
  Qualified,
  Cold,
  Followup,
  OptedOut,
}

impl ContactStatus {
  /// Orden canónico de los estados. Las distribuciones para gráficos deben
  /// emitir las categorías siempre en este orden, incluidas las vacías.
  pub const ALL: [ContactStatus; 6] = [ContactStatus::New,
                                       ContactStatus::Contacted,
                                       ContactStatus::Qualified,
                                       ContactStatus::Cold,
                                       ContactStatus::Followup,
                                       ContactStatus::OptedOut];

  pub fn as_str(&self) -> &'static str {
    match self {
      ContactStatus::New => "new",
      ContactStatus::Contacted => "contacted",
      ContactStatus::Qualified => "qualified",
      ContactStatus::Cold => "cold",
      ContactStatus::Followup => "followup",
      ContactStatus::OptedOut => "opted_out",
    }
  }

  pub fn is_terminal(&self) -> bool {
    matches!(self, ContactStatus::OptedOut)
  }
}

impl fmt::Display for ContactStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Un lead captado por algún canal (LinkedIn, web, referidos, etc.).
///
/// El `conversation_id` es una referencia no propietaria: puede apuntar a una
/// conversación que el caller todavía no cargó.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
  id: String,
  name: String,
  phone: String,
  email: Option<String>,
  company: Option<String>,
  status: ContactStatus,
  lead_score: u8,
  last_contact: Option<DateTime<Utc>>,
  next_followup: Option<DateTime<Utc>>,
  tags: Vec<String>,
  conversation_id: Option<String>,
  source: String,
  created_at: DateTime<Utc>,
}

impl Contact {
  /// Crea un contacto nuevo con estado `New` y puntaje 0. El resto de los
  /// campos se completa con los builders `with_*`.
  pub fn new(id: &str, name: &str, phone: &str, source: &str, created_at: DateTime<Utc>) -> Result<Self, DomainError> {
    if id.trim().is_empty() {
      return Err(DomainError::ValidationError("El id del contacto no puede estar vacío".to_string()));
    }
    if name.trim().is_empty() {
      return Err(DomainError::ValidationError("El nombre del contacto no puede estar vacío".to_string()));
    }
    if phone.trim().is_empty() {
      return Err(DomainError::ValidationError("El teléfono del contacto no puede estar vacío".to_string()));
    }
    Ok(Self { id: id.to_string(),
              name: name.to_string(),
              phone: phone.to_string(),
              email: None,
              company: None,
              status: ContactStatus::New,
              lead_score: 0,
              last_contact: None,
              next_followup: None,
              tags: Vec::new(),
              conversation_id: None,
              source: source.to_string(),
              created_at })
  }

  pub fn with_email(&self, email: impl Into<String>) -> Self {
    let mut c = self.clone();
    c.email = Some(email.into());
    c
  }

  pub fn with_company(&self, company: impl Into<String>) -> Self {
    let mut c = self.clone();
    c.company = Some(company.into());
    c
  }

  pub fn with_status(&self, status: ContactStatus) -> Self {
    let mut c = self.clone();
    c.status = status;
    c
  }

  /// Fija el puntaje del lead. Valores fuera de 0..=100 son un error.
  pub fn with_lead_score(&self, score: u8) -> Result<Self, DomainError> {
    if score > MAX_LEAD_SCORE {
      return Err(DomainError::ValidationError(format!("El puntaje del lead debe estar entre 0 y {}: {}",
                                                      MAX_LEAD_SCORE, score)));
    }
    let mut c = self.clone();
    c.lead_score = score;
    Ok(c)
  }

  pub fn with_tags<I>(&self, tags: I) -> Self
    where I: IntoIterator<Item = String>
  {
    let mut c = self.clone();
    c.tags = tags.into_iter().collect();
    c
  }

  pub fn with_conversation(&self, conversation_id: impl Into<String>) -> Self {
    let mut c = self.clone();
    c.conversation_id = Some(conversation_id.into());
    c
  }

  pub fn with_last_contact(&self, at: DateTime<Utc>) -> Self {
    let mut c = self.clone();
    c.last_contact = Some(at);
    c
  }

  pub fn with_next_followup(&self, at: DateTime<Utc>) -> Self {
    let mut c = self.clone();
    c.next_followup = Some(at);
    c
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn phone(&self) -> &str {
    &self.phone
  }

  pub fn email(&self) -> Option<&str> {
    self.email.as_deref()
  }

  pub fn company(&self) -> Option<&str> {
    self.company.as_deref()
  }

  pub fn status(&self) -> ContactStatus {
    self.status
  }

  pub fn lead_score(&self) -> u8 {
    self.lead_score
  }

  pub fn last_contact(&self) -> Option<DateTime<Utc>> {
    self.last_contact
  }

  pub fn next_followup(&self) -> Option<DateTime<Utc>> {
    self.next_followup
  }

  pub fn tags(&self) -> &[String] {
    &self.tags
  }

  pub fn conversation_id(&self) -> Option<&str> {
    self.conversation_id.as_deref()
  }

  pub fn source(&self) -> &str {
    &self.source
  }

  pub fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }
}

impl fmt::Display for Contact {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f,
           "Contact({}, {}, estado: {}, puntaje: {})",
           self.id, self.name, self.status, self.lead_score)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn base() -> Contact {
    Contact::new("1", "Sarah Johnson", "+1-555-0123", "LinkedIn", Utc::now()).unwrap()
  }

  #[test]
  fn test_contact_creation() -> Result<(), DomainError> {
    let c = base().with_company("TechCorp Solutions")
                  .with_status(ContactStatus::Qualified)
                  .with_lead_score(85)?;
    assert_eq!(c.status(), ContactStatus::Qualified);
    assert_eq!(c.lead_score(), 85);
    assert_eq!(c.company(), Some("TechCorp Solutions"));
    Ok(())
  }

  #[test]
  fn test_contact_empty_fields() {
    assert!(Contact::new("", "x", "y", "web", Utc::now()).is_err());
    assert!(Contact::new("1", "", "y", "web", Utc::now()).is_err());
    assert!(Contact::new("1", "x", "  ", "web", Utc::now()).is_err());
  }

  #[test]
  fn test_lead_score_out_of_range() {
    let r = base().with_lead_score(101);
    assert!(r.is_err());
  }

  #[test]
  fn test_status_canonical_order() {
    assert_eq!(ContactStatus::ALL.len(), 6);
    assert_eq!(ContactStatus::ALL[0], ContactStatus::New);
    assert_eq!(ContactStatus::ALL[5], ContactStatus::OptedOut);
    assert!(ContactStatus::OptedOut.is_terminal());
    assert!(!ContactStatus::Cold.is_terminal());
  }
}

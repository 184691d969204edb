// dataset.rs
use crate::{Campaign, Contact, Conversation, DomainError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Instantánea consistente de las colecciones del dominio, pensada para que
/// una capa de presentación o un test consuma todo junto. No hay mutación:
/// el dataset se arma una vez y se consulta por referencia.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadDataset {
  contacts: Vec<Contact>,
  conversations: Vec<Conversation>,
  campaigns: Vec<Campaign>,
}

impl LeadDataset {
  /// Valida la coherencia interna: ids únicos por colección y referencias
  /// propietarias resueltas (conversación -> contacto, campaña -> contactos
  /// objetivo). Las referencias no propietarias, como el `conversation_id`
  /// de un contacto, pueden quedar colgando y no se verifican.
  pub fn new(contacts: Vec<Contact>,
             conversations: Vec<Conversation>,
             campaigns: Vec<Campaign>)
             -> Result<Self, DomainError> {
    let mut ids = HashSet::new();
    for c in &contacts {
      if !ids.insert(c.id()) {
        return Err(DomainError::ValidationError(format!("Id de contacto duplicado: {}", c.id())));
      }
    }
    let contact_ids: HashSet<&str> = contacts.iter().map(|c| c.id()).collect();

    let mut conv_ids = HashSet::new();
    for conv in &conversations {
      if !conv_ids.insert(conv.id()) {
        return Err(DomainError::ValidationError(format!("Id de conversación duplicado: {}", conv.id())));
      }
      if !contact_ids.contains(conv.contact_id()) {
        return Err(DomainError::ValidationError(format!("La conversación {} referencia un contacto inexistente: {}",
                                                        conv.id(),
                                                        conv.contact_id())));
      }
    }

    let mut camp_ids = HashSet::new();
    for camp in &campaigns {
      if !camp_ids.insert(camp.id()) {
        return Err(DomainError::ValidationError(format!("Id de campaña duplicado: {}", camp.id())));
      }
      for target in camp.target_contacts() {
        if !contact_ids.contains(target.as_str()) {
          return Err(DomainError::ValidationError(format!("La campaña {} apunta a un contacto inexistente: {}",
                                                          camp.id(),
                                                          target)));
        }
      }
    }

    Ok(Self { contacts, conversations, campaigns })
  }

  pub fn contacts(&self) -> &[Contact] {
    &self.contacts
  }

  pub fn conversations(&self) -> &[Conversation] {
    &self.conversations
  }

  pub fn campaigns(&self) -> &[Campaign] {
    &self.campaigns
  }

  pub fn contact(&self, id: &str) -> Option<&Contact> {
    self.contacts.iter().find(|c| c.id() == id)
  }

  pub fn conversation(&self, id: &str) -> Option<&Conversation> {
    self.conversations.iter().find(|c| c.id() == id)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Utc;

  #[test]
  fn test_dataset_rejects_dangling_owner() -> Result<(), DomainError> {
    let contact = Contact::new("1", "Ana", "+34-600", "web", Utc::now())?;
    let conv = Conversation::new("conv-1", "99", Utc::now())?;
    assert!(LeadDataset::new(vec![contact], vec![conv], vec![]).is_err());
    Ok(())
  }

  #[test]
  fn test_dataset_rejects_duplicate_ids() -> Result<(), DomainError> {
    let a = Contact::new("1", "Ana", "+34-600", "web", Utc::now())?;
    let b = Contact::new("1", "Otro", "+34-601", "web", Utc::now())?;
    assert!(LeadDataset::new(vec![a, b], vec![], vec![]).is_err());
    Ok(())
  }
}

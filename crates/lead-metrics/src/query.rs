// query.rs
use lead_domain::{Campaign, CampaignStatus, Contact, ContactStatus, Conversation, ConversationStatus};

/// Superficie de consulta de sólo lectura. Todos los filtros preservan el
/// orden de la colección original y nunca deduplican: los consumidores
/// dependen de ese orden estable.

pub fn contacts_by_status<'a>(contacts: &'a [Contact], status: ContactStatus) -> Vec<&'a Contact> {
  contacts.iter().filter(|c| c.status() == status).collect()
}

/// Coincidencia por subcadena, sin distinguir mayúsculas, sobre nombre,
/// empresa y teléfono. El término vacío coincide con todo.
pub fn contacts_by_search_term<'a>(contacts: &'a [Contact], term: &str) -> Vec<&'a Contact> {
  let termino = term.to_lowercase();
  contacts.iter()
          .filter(|c| {
            c.name().to_lowercase().contains(&termino)
            || c.company().map_or(false, |empresa| empresa.to_lowercase().contains(&termino))
            || c.phone().to_lowercase().contains(&termino)
          })
          .collect()
}

pub fn conversations_by_status<'a>(conversations: &'a [Conversation], status: ConversationStatus) -> Vec<&'a Conversation> {
  conversations.iter().filter(|c| c.status() == status).collect()
}

pub fn campaigns_by_status<'a>(campaigns: &'a [Campaign], status: CampaignStatus) -> Vec<&'a Campaign> {
  campaigns.iter().filter(|c| c.status() == status).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Utc;

  fn contact(id: &str, name: &str, company: Option<&str>, status: ContactStatus) -> Contact {
    let c = Contact::new(id, name, "+1-555-0123", "test", Utc::now()).unwrap().with_status(status);
    match company {
      Some(empresa) => c.with_company(empresa),
      None => c,
    }
  }

  #[test]
  fn test_search_is_case_insensitive() {
    let contactos = [contact("1", "Sarah Johnson", Some("TechCorp Solutions"), ContactStatus::Qualified)];
    assert_eq!(contacts_by_search_term(&contactos, "tech").len(), 1);
    assert_eq!(contacts_by_search_term(&contactos, "TECH").len(), 1);
    assert_eq!(contacts_by_search_term(&contactos, "sarah").len(), 1);
    assert_eq!(contacts_by_search_term(&contactos, "555-0123").len(), 1);
    assert_eq!(contacts_by_search_term(&contactos, "acme").len(), 0);
  }

  #[test]
  fn test_empty_term_matches_everything() {
    let contactos = [contact("1", "Ana", None, ContactStatus::New),
                     contact("2", "Luis", None, ContactStatus::Cold)];
    assert_eq!(contacts_by_search_term(&contactos, "").len(), 2);
  }

  #[test]
  fn test_filters_preserve_original_order() {
    let contactos = [contact("3", "Carla", None, ContactStatus::New),
                     contact("1", "Ana", None, ContactStatus::New),
                     contact("2", "Luis", None, ContactStatus::Cold)];
    let nuevos = contacts_by_status(&contactos, ContactStatus::New);
    let ids: Vec<&str> = nuevos.iter().map(|c| c.id()).collect();
    assert_eq!(ids, vec!["3", "1"]);
  }
}

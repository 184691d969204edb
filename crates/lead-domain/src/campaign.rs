// campaign.rs
use crate::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
  Draft,
  Running,
  Paused,
  Completed,
}

impl CampaignStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      CampaignStatus::Draft => "draft",
      CampaignStatus::Running => "running",
      CampaignStatus::Paused => "paused",
      CampaignStatus::Completed => "completed",
    }
  }
}

impl fmt::Display for CampaignStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
  Immediate,
  Daily,
  Weekly,
}

/// Ventana de ejecución de una campaña.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
  start_date: DateTime<Utc>,
  end_date: Option<DateTime<Utc>>,
  frequency: Frequency,
}

impl Schedule {
  pub fn new(start_date: DateTime<Utc>, end_date: Option<DateTime<Utc>>, frequency: Frequency) -> Result<Self, DomainError> {
    if let Some(end) = end_date {
      if end < start_date {
        return Err(DomainError::ValidationError("La fecha de fin no puede ser anterior a la de inicio".to_string()));
      }
    }
    Ok(Self { start_date, end_date, frequency })
  }

  pub fn start_date(&self) -> DateTime<Utc> {
    self.start_date
  }

  pub fn end_date(&self) -> Option<DateTime<Utc>> {
    self.end_date
  }

  pub fn frequency(&self) -> Frequency {
    self.frequency
  }
}

/// Contadores acumulados de una campaña. En un sistema real son monótonos;
/// acá son instantáneas, pero la cadena `delivered <= sent`,
/// `replied <= delivered`, `qualified <= replied` se valida igual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignMetrics {
  sent: u64,
  delivered: u64,
  replied: u64,
  qualified: u64,
}

impl CampaignMetrics {
  pub fn new(sent: u64, delivered: u64, replied: u64, qualified: u64) -> Result<Self, DomainError> {
    if delivered > sent {
      return Err(DomainError::ValidationError(format!("delivered ({}) no puede superar a sent ({})", delivered, sent)));
    }
    if replied > delivered {
      return Err(DomainError::ValidationError(format!("replied ({}) no puede superar a delivered ({})",
                                                      replied, delivered)));
    }
    if qualified > replied {
      return Err(DomainError::ValidationError(format!("qualified ({}) no puede superar a replied ({})",
                                                      qualified, replied)));
    }
    Ok(Self { sent, delivered, replied, qualified })
  }

  pub fn zero() -> Self {
    Self { sent: 0, delivered: 0, replied: 0, qualified: 0 }
  }

  pub fn sent(&self) -> u64 {
    self.sent
  }

  pub fn delivered(&self) -> u64 {
    self.delivered
  }

  pub fn replied(&self) -> u64 {
    self.replied
  }

  pub fn qualified(&self) -> u64 {
    self.qualified
  }
}

/// Aplicación programada de un flujo sobre un conjunto de contactos objetivo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
  id: String,
  name: String,
  description: String,
  flow_id: String,
  target_contacts: Vec<String>,
  status: CampaignStatus,
  schedule: Option<Schedule>,
  metrics: CampaignMetrics,
  created_at: DateTime<Utc>,
}

impl Campaign {
  /// Crea una campaña en borrador sin métricas. Los contactos objetivo se
  /// deduplican preservando el orden de llegada.
  pub fn new<I>(id: &str, name: &str, flow_id: &str, target_contacts: I, created_at: DateTime<Utc>)
                -> Result<Self, DomainError>
    where I: IntoIterator<Item = String>
  {
    if id.trim().is_empty() {
      return Err(DomainError::ValidationError("El id de la campaña no puede estar vacío".to_string()));
    }
    if name.trim().is_empty() {
      return Err(DomainError::ValidationError("El nombre de la campaña no puede estar vacío".to_string()));
    }
    if flow_id.trim().is_empty() {
      return Err(DomainError::ValidationError("La campaña debe referenciar un flujo".to_string()));
    }
    let mut targets: Vec<String> = target_contacts.into_iter().collect();
    let mut seen = HashSet::new();
    targets.retain(|t| seen.insert(t.clone()));
    Ok(Self { id: id.to_string(),
              name: name.to_string(),
              description: String::new(),
              flow_id: flow_id.to_string(),
              target_contacts: targets,
              status: CampaignStatus::Draft,
              schedule: None,
              metrics: CampaignMetrics::zero(),
              created_at })
  }

  pub fn with_description(&self, description: impl Into<String>) -> Self {
    let mut c = self.clone();
    c.description = description.into();
    c
  }

  pub fn with_status(&self, status: CampaignStatus) -> Self {
    let mut c = self.clone();
    c.status = status;
    c
  }

  pub fn with_schedule(&self, schedule: Schedule) -> Self {
    let mut c = self.clone();
    c.schedule = Some(schedule);
    c
  }

  pub fn with_metrics(&self, metrics: CampaignMetrics) -> Self {
    let mut c = self.clone();
    c.metrics = metrics;
    c
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn description(&self) -> &str {
    &self.description
  }

  pub fn flow_id(&self) -> &str {
    &self.flow_id
  }

  pub fn target_contacts(&self) -> &[String] {
    &self.target_contacts
  }

  pub fn status(&self) -> CampaignStatus {
    self.status
  }

  pub fn schedule(&self) -> Option<&Schedule> {
    self.schedule.as_ref()
  }

  pub fn metrics(&self) -> &CampaignMetrics {
    &self.metrics
  }

  pub fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }
}

impl fmt::Display for Campaign {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f,
           "Campaign({}, {}, flujo: {}, objetivos: {})",
           self.id,
           self.name,
           self.flow_id,
           self.target_contacts.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  #[test]
  fn test_campaign_dedupes_targets() -> Result<(), DomainError> {
    let c = Campaign::new("camp-1",
                          "Q4",
                          "lead-qualification",
                          vec!["1".to_string(), "2".to_string(), "1".to_string()],
                          Utc::now())?;
    assert_eq!(c.target_contacts(), ["1".to_string(), "2".to_string()]);
    Ok(())
  }

  #[test]
  fn test_metrics_chain_enforced() {
    // delivered > sent
    assert!(CampaignMetrics::new(10, 11, 0, 0).is_err());
    // replied > delivered
    assert!(CampaignMetrics::new(10, 9, 10, 0).is_err());
    // qualified > replied
    assert!(CampaignMetrics::new(10, 9, 5, 6).is_err());
    assert!(CampaignMetrics::new(150, 145, 48, 12).is_ok());
  }

  #[test]
  fn test_schedule_window() {
    let start = Utc::now();
    assert!(Schedule::new(start, Some(start - Duration::days(1)), Frequency::Daily).is_err());
    assert!(Schedule::new(start, Some(start + Duration::days(30)), Frequency::Daily).is_ok());
    assert!(Schedule::new(start, None, Frequency::Immediate).is_ok());
  }
}

// analytics.rs
use crate::DomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Punto de la serie diaria: cuántos contactos, conversaciones y calificados
/// aparecieron ese día.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMetric {
  pub date: NaiveDate,
  pub contacts: u64,
  pub conversations: u64,
  pub qualified: u64,
}

/// Instantánea derivada y de sólo lectura del estado del embudo. No tiene
/// ciclo de vida propio: se recalcula a partir de las colecciones del caller.
///
/// Las tasas son `Option`: sobre entradas vacías el resultado es indefinido,
/// nunca NaN ni cero silencioso.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
  total_contacts: u64,
  total_conversations: u64,
  qualified_leads: u64,
  conversion_rate: Option<f64>,
  avg_lead_score: Option<f64>,
  active_flows: u64,
  daily_metrics: Vec<DailyMetric>,
}

impl AnalyticsSnapshot {
  /// La serie diaria debe venir ordenada por fecha estrictamente ascendente.
  pub fn new(total_contacts: u64,
             total_conversations: u64,
             qualified_leads: u64,
             conversion_rate: Option<f64>,
             avg_lead_score: Option<f64>,
             active_flows: u64,
             daily_metrics: Vec<DailyMetric>)
             -> Result<Self, DomainError> {
    if qualified_leads > total_contacts {
      return Err(DomainError::ValidationError(format!("qualified_leads ({}) no puede superar el total de contactos ({})",
                                                      qualified_leads, total_contacts)));
    }
    for par in daily_metrics.windows(2) {
      if par[1].date <= par[0].date {
        return Err(DomainError::ValidationError(format!("La serie diaria debe ser estrictamente ascendente: {} luego de {}",
                                                        par[1].date, par[0].date)));
      }
    }
    Ok(Self { total_contacts,
              total_conversations,
              qualified_leads,
              conversion_rate,
              avg_lead_score,
              active_flows,
              daily_metrics })
  }

  pub fn total_contacts(&self) -> u64 {
    self.total_contacts
  }

  pub fn total_conversations(&self) -> u64 {
    self.total_conversations
  }

  pub fn qualified_leads(&self) -> u64 {
    self.qualified_leads
  }

  pub fn conversion_rate(&self) -> Option<f64> {
    self.conversion_rate
  }

  pub fn avg_lead_score(&self) -> Option<f64> {
    self.avg_lead_score
  }

  pub fn active_flows(&self) -> u64 {
    self.active_flows
  }

  pub fn daily_metrics(&self) -> &[DailyMetric] {
    &self.daily_metrics
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
  }

  #[test]
  fn test_snapshot_requires_ascending_dates() {
    let serie = vec![DailyMetric { date: d(2026, 8, 2), contacts: 3, conversations: 1, qualified: 0 },
                     DailyMetric { date: d(2026, 8, 1), contacts: 5, conversations: 2, qualified: 1 }];
    assert!(AnalyticsSnapshot::new(10, 4, 2, None, None, 1, serie).is_err());
  }

  #[test]
  fn test_snapshot_qualified_bounded() {
    assert!(AnalyticsSnapshot::new(5, 4, 6, None, None, 0, vec![]).is_err());
  }

  #[test]
  fn test_snapshot_ok() -> Result<(), DomainError> {
    let serie = vec![DailyMetric { date: d(2026, 8, 1), contacts: 5, conversations: 2, qualified: 1 },
                     DailyMetric { date: d(2026, 8, 2), contacts: 3, conversations: 1, qualified: 0 }];
    let s = AnalyticsSnapshot::new(10, 4, 2, Some(20.0), Some(58.3), 2, serie)?;
    assert_eq!(s.daily_metrics().len(), 2);
    assert_eq!(s.conversion_rate(), Some(20.0));
    Ok(())
  }
}

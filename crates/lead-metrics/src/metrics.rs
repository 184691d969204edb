// metrics.rs
use chrono::NaiveDate;
use lead_domain::{AnalyticsSnapshot, Campaign, CampaignMetrics, Contact, ContactStatus, Conversation, DailyMetric,
                  DomainError};

/// Porcentaje `numerator / denominator * 100`. Con denominador cero el
/// resultado es indefinido y se devuelve `None`: el caller decide cómo
/// mostrarlo, nunca circula un NaN.
pub fn rate(numerator: u64, denominator: u64) -> Option<f64> {
  if denominator == 0 {
    return None;
  }
  Some(numerator as f64 / denominator as f64 * 100.0)
}

/// Promedio del puntaje de lead. `None` sobre una colección vacía.
pub fn average_score(contacts: &[Contact]) -> Option<f64> {
  if contacts.is_empty() {
    return None;
  }
  let suma: f64 = contacts.iter().map(|c| f64::from(c.lead_score())).sum();
  Some(suma / contacts.len() as f64)
}

/// Conteo por estado sobre el orden canónico completo. Los estados sin
/// miembros aparecen con cero, así los gráficos mantienen categorías
/// estables.
pub fn distribution_by_status(contacts: &[Contact]) -> Vec<(ContactStatus, usize)> {
  ContactStatus::ALL.iter()
                    .map(|estado| (*estado, contacts.iter().filter(|c| c.status() == *estado).count()))
                    .collect()
}

/// Banda de puntaje provista por el caller. La pertenencia es
/// `score >= lower && score < upper`; una banda sin `upper` es abierta por
/// arriba (`score >= lower`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBand {
  label: String,
  lower: u8,
  upper: Option<u8>,
}

impl ScoreBand {
  pub fn new(label: impl Into<String>, lower: u8, upper: Option<u8>) -> Result<Self, DomainError> {
    if let Some(u) = upper {
      if u <= lower {
        return Err(DomainError::ValidationError(format!("Banda inválida: el límite superior {} no supera al inferior {}",
                                                        u, lower)));
      }
    }
    Ok(Self { label: label.into(), lower, upper })
  }

  pub fn label(&self) -> &str {
    &self.label
  }

  /// El límite pertenece a la banda cuyo `lower` iguala al puntaje.
  pub fn contains(&self, score: u8) -> bool {
    score >= self.lower && self.upper.map_or(true, |u| score < u)
  }

  /// Las cuatro bandas del panel de analítica, de mayor a menor.
  pub fn default_bands() -> Vec<ScoreBand> {
    vec![ScoreBand { label: "80-100".into(), lower: 80, upper: None },
         ScoreBand { label: "60-79".into(), lower: 60, upper: Some(80) },
         ScoreBand { label: "40-59".into(), lower: 40, upper: Some(60) },
         ScoreBand { label: "0-39".into(), lower: 0, upper: Some(40) }]
  }
}

/// Conteo por banda de puntaje, en el orden de las bandas recibidas.
pub fn distribution_by_score_band<'a>(contacts: &[Contact], bands: &'a [ScoreBand]) -> Vec<(&'a str, usize)> {
  bands.iter()
       .map(|banda| (banda.label(), contacts.iter().filter(|c| banda.contains(c.lead_score())).count()))
       .collect()
}

/// Porcentaje de entregados sobre enviados.
pub fn delivery_rate(metrics: &CampaignMetrics) -> Option<f64> {
  rate(metrics.delivered(), metrics.sent())
}

/// Porcentaje de respuestas sobre enviados.
pub fn response_rate(metrics: &CampaignMetrics) -> Option<f64> {
  rate(metrics.replied(), metrics.sent())
}

/// Porcentaje de calificados sobre enviados.
pub fn qualification_rate(metrics: &CampaignMetrics) -> Option<f64> {
  rate(metrics.qualified(), metrics.sent())
}

pub fn total_sent(campaigns: &[Campaign]) -> u64 {
  campaigns.iter().map(|c| c.metrics().sent()).sum()
}

/// Promedio de la tasa de respuesta entre campañas. Las campañas sin envíos
/// no tienen tasa definida y quedan fuera del promedio; sin ninguna tasa
/// definida el resultado es `None`.
pub fn average_response_rate(campaigns: &[Campaign]) -> Option<f64> {
  let tasas: Vec<f64> = campaigns.iter().filter_map(|c| response_rate(c.metrics())).collect();
  if tasas.is_empty() {
    return None;
  }
  Some(tasas.iter().sum::<f64>() / tasas.len() as f64)
}

/// Arma la instantánea de analítica a partir de las colecciones del caller.
///
/// La serie diaria se deriva de las fechas de creación: nada se sortea ni se
/// estima. La fecha de calificación no se registra en el modelo, así que el
/// conteo diario de calificados usa la fecha de creación de los contactos hoy
/// calificados.
pub fn analytics_snapshot(contacts: &[Contact],
                          conversations: &[Conversation],
                          active_flows: u64,
                          days: &[NaiveDate])
                          -> Result<AnalyticsSnapshot, DomainError> {
  let calificados = contacts.iter().filter(|c| c.status() == ContactStatus::Qualified).count() as u64;
  let serie: Vec<DailyMetric> =
    days.iter()
        .map(|dia| DailyMetric { date: *dia,
                                 contacts: contacts.iter()
                                                   .filter(|c| c.created_at().date_naive() == *dia)
                                                   .count() as u64,
                                 conversations: conversations.iter()
                                                             .filter(|c| c.created_at().date_naive() == *dia)
                                                             .count() as u64,
                                 qualified: contacts.iter()
                                                    .filter(|c| {
                                                      c.status() == ContactStatus::Qualified
                                                      && c.created_at().date_naive() == *dia
                                                    })
                                                    .count() as u64 })
        .collect();
  AnalyticsSnapshot::new(contacts.len() as u64,
                         conversations.len() as u64,
                         calificados,
                         rate(calificados, contacts.len() as u64),
                         average_score(contacts),
                         active_flows,
                         serie)
}

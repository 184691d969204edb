//! lead-metrics: métricas derivadas y consultas de lectura
//!
//! Funciones puras sobre las colecciones de `lead-domain`: distribuciones
//! para gráficos, tasas de campaña, la instantánea de analítica y los
//! filtros que usa la capa de presentación. Nada acá muta sus entradas ni
//! hace I/O; las divisiones indefinidas devuelven `None`, nunca NaN.

mod metrics;
mod query;

pub use metrics::{analytics_snapshot, average_response_rate, average_score, delivery_rate, distribution_by_score_band,
                  distribution_by_status, qualification_rate, rate, response_rate, total_sent, ScoreBand};
pub use query::{campaigns_by_status, contacts_by_search_term, contacts_by_status, conversations_by_status};

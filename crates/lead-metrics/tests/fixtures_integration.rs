// Verifica que el dataset de ejemplo, las definiciones de flujo y las
// métricas encajen entre sí como los consume la capa de presentación.
use chrono::{Duration, Utc};
use flow::repository::FlowCatalog;
use flow::{FlowEngine, FlowStubs};
use lead_domain::{ContactStatus, ConversationStatus, DomainFixtures};
use lead_metrics::{analytics_snapshot, average_response_rate, contacts_by_search_term, contacts_by_status,
                   conversations_by_status, distribution_by_status, response_rate, total_sent};

#[test]
fn campaign_flows_resolve_in_the_catalog() {
  let dataset = DomainFixtures::sample_dataset();
  let catalog = FlowStubs::sample_catalog();
  for campaign in dataset.campaigns() {
    assert!(catalog.contains(campaign.flow_id()).expect("catálogo"),
            "la campaña {} referencia un flujo desconocido: {}",
            campaign.id(),
            campaign.flow_id());
  }
}

#[test]
fn conversation_cursor_points_into_its_flow() {
  let dataset = DomainFixtures::sample_dataset();
  let catalog = FlowStubs::sample_catalog();
  for conv in dataset.conversations() {
    let flow_id = match conv.current_flow() {
      Some(id) => id,
      None => continue,
    };
    let flow = catalog.get(flow_id).expect("catálogo").expect("flujo registrado");
    let engine = FlowEngine::new(&flow);
    if let Some(step) = conv.current_step() {
      assert!(engine.contains_step(step),
              "el cursor {} de {} no existe en el flujo {}",
              step,
              conv.id(),
              flow_id);
    }
  }
}

#[test]
fn qualification_data_drives_the_branching_step() {
  let dataset = DomainFixtures::sample_dataset();
  let conv = dataset.conversation("conv-1").expect("conv-1");
  let flow = FlowStubs::lead_qualification();
  let engine = FlowEngine::new(&flow);
  // con presupuesto enterprise la ramificación llega a la acción final
  let ctx = conv.qualification_context();
  assert_eq!(engine.next_step("step-4", &ctx).expect("evaluación"), Some("step-5"));
}

#[test]
fn dashboard_numbers_over_the_sample_dataset() {
  let dataset = DomainFixtures::sample_dataset();
  let contactos = dataset.contacts();

  assert_eq!(contacts_by_status(contactos, ContactStatus::Qualified).len(), 1);
  assert_eq!(contacts_by_status(contactos, ContactStatus::Followup).len(), 1);
  assert_eq!(contacts_by_search_term(contactos, "TECH").len(), 1);
  assert_eq!(conversations_by_status(dataset.conversations(), ConversationStatus::Active).len(), 1);

  let dist = distribution_by_status(contactos);
  assert_eq!(dist.iter().map(|(_, n)| n).sum::<usize>(), contactos.len());
  // opted_out sin miembros pero presente en la distribución
  assert!(dist.contains(&(ContactStatus::OptedOut, 0)));

  assert_eq!(total_sent(dataset.campaigns()), 225);
  // camp-1: 48/150 = 32%, camp-2: 25/75 = 33.33%
  let promedio = average_response_rate(dataset.campaigns()).expect("definido");
  assert!((promedio - 32.666).abs() < 0.01);
  assert_eq!(response_rate(dataset.campaigns()[0].metrics()), Some(32.0));
}

#[test]
fn analytics_snapshot_over_the_last_week() {
  let dataset = DomainFixtures::sample_dataset();
  let hoy = Utc::now().date_naive();
  let dias: Vec<_> = (0..7).rev().map(|d| hoy - Duration::days(d)).collect();
  let snapshot = analytics_snapshot(dataset.contacts(), dataset.conversations(), 2, &dias).expect("instantánea");

  assert_eq!(snapshot.total_contacts(), 5);
  assert_eq!(snapshot.qualified_leads(), 1);
  assert_eq!(snapshot.conversion_rate(), Some(20.0));
  assert_eq!(snapshot.active_flows(), 2);
  assert_eq!(snapshot.daily_metrics().len(), 7);
  // los contactos creados en la ventana aparecen en la serie
  let en_serie: u64 = snapshot.daily_metrics().iter().map(|d| d.contacts).sum();
  assert!(en_serie >= 3, "al menos los contactos de esta semana: {}", en_serie);
}

#[test]
fn analytics_on_empty_collections_is_undefined_not_nan() {
  let snapshot = analytics_snapshot(&[], &[], 0, &[]).expect("instantánea");
  assert_eq!(snapshot.conversion_rate(), None);
  assert_eq!(snapshot.avg_lead_score(), None);
  assert_eq!(snapshot.total_contacts(), 0);
}

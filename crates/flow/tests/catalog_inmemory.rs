use flow::repository::FlowCatalog;
use flow::{ConversationFlow, FlowError, FlowService, FlowStep, FlowStubs, InMemoryFlowCatalog, StepKind};
use serde_json::json;
use std::sync::Arc;

fn minimal_flow(id: &str, active: bool) -> ConversationFlow {
  ConversationFlow { id: id.into(),
                     name: format!("Flujo {}", id),
                     description: String::new(),
                     category: "test".into(),
                     is_active: active,
                     steps: vec![FlowStep { id: "unico".into(),
                                            kind: StepKind::Message { content: "hola".into(),
                                                                      delay: None,
                                                                      next_step: None } }] }
}

#[test]
fn register_get_and_list_preserve_order() {
  let catalog = InMemoryFlowCatalog::new();
  catalog.register(minimal_flow("b", true)).expect("register b");
  catalog.register(minimal_flow("a", false)).expect("register a");

  let ids: Vec<String> = catalog.list().expect("list").into_iter().map(|f| f.id).collect();
  assert_eq!(ids, vec!["b".to_string(), "a".to_string()]);
  assert!(catalog.get("a").expect("get").is_some());
  assert!(catalog.get("zzz").expect("get").is_none());
  assert!(catalog.contains("b").expect("contains"));
  assert_eq!(catalog.active_count().expect("active"), 1);
}

#[test]
fn duplicate_registration_conflicts() {
  let catalog = InMemoryFlowCatalog::new();
  catalog.register(minimal_flow("x", true)).expect("primer registro");
  let err = catalog.register(minimal_flow("x", true)).unwrap_err();
  assert!(matches!(err, FlowError::Conflict(_)));
}

#[test]
fn invalid_flow_is_rejected_with_issues() {
  let catalog = InMemoryFlowCatalog::new();
  let mut roto = minimal_flow("roto", true);
  roto.steps.clear();
  match catalog.register(roto) {
    Err(FlowError::Invalid(issues)) => assert!(!issues.is_empty()),
    otro => panic!("se esperaba Invalid, llegó {:?}", otro),
  }
  // el flujo rechazado no quedó registrado
  assert!(!catalog.contains("roto").expect("contains"));
}

#[test]
fn sample_catalog_has_the_demo_flows() {
  let catalog = FlowStubs::sample_catalog();
  assert!(catalog.contains("lead-qualification").expect("contains"));
  assert!(catalog.contains("follow-up-sequence").expect("contains"));
  assert_eq!(catalog.active_count().expect("active"), 2);
}

#[test]
fn service_validates_registered_flows() {
  let service = FlowService::new(Arc::new(FlowStubs::sample_catalog()));
  assert!(service.validate("lead-qualification").expect("validate").is_empty());
  assert!(matches!(service.validate("no-existe"), Err(FlowError::NotFound(_))));
}

#[test]
fn service_advances_a_cursor() {
  let service = FlowService::new(Arc::new(FlowStubs::sample_catalog()));
  // paso estático
  let next = service.advance("lead-qualification", "step-1", &json!({})).expect("advance");
  assert_eq!(next.as_deref(), Some("step-2"));
  // la ramificación por presupuesto enterprise llega a la acción final
  let ctx = json!({"budget": "enterprise", "timeline": "immediate"});
  let next = service.advance("lead-qualification", "step-4", &ctx).expect("advance");
  assert_eq!(next.as_deref(), Some("step-5"));
  // sin señales de calificación el flujo queda detenido
  let next = service.advance("lead-qualification", "step-4", &json!({})).expect("advance");
  assert_eq!(next, None);
}

#[test]
fn service_reports_orphan_steps() {
  let catalog = InMemoryFlowCatalog::new();
  let mut flow = minimal_flow("con-huerfano", true);
  flow.steps.push(FlowStep { id: "huerfano".into(),
                             kind: StepKind::Action { content: "noop".into(), next_step: None } });
  catalog.register(flow).expect("register");
  let service = FlowService::new(Arc::new(catalog));
  assert_eq!(service.unreachable_steps("con-huerfano").expect("orphans"),
             vec!["huerfano".to_string()]);
}

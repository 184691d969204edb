// Ejemplo mínimo: validar un flujo de ejemplo y recorrerlo con un contexto
// de calificación.
//
// Ejecutar con: cargo run -p flow --example flow_simple_usage
use flow::{FlowEngine, FlowStubs, render_placeholders, StepKind};
use serde_json::json;

fn main() {
    let flow = FlowStubs::lead_qualification();
    let engine = FlowEngine::new(&flow);

    match engine.validate() {
        Ok(()) => println!("Flujo '{}' válido ({} pasos)", flow.name, flow.steps.len()),
        Err(issues) => {
            eprintln!("Flujo inválido:");
            for issue in issues {
                eprintln!("  - {}", issue);
            }
            return;
        }
    }

    let ctx = json!({"name": "Sarah", "budget": "enterprise"});
    let mut cursor = flow.entry_step().map(|s| s.id.clone());
    while let Some(actual) = cursor {
        let step = engine.step(&actual).expect("paso del recorrido");
        match &step.kind {
            StepKind::Message { content, .. } => {
                println!("[{}] mensaje: {}", step.id, render_placeholders(content, &ctx));
            }
            StepKind::Question { content, options, .. } => {
                println!("[{}] pregunta: {} {:?}", step.id, content, options);
            }
            StepKind::Condition { conditions } => {
                println!("[{}] ramificación con {} condiciones", step.id, conditions.len());
            }
            StepKind::Action { content, .. } => {
                println!("[{}] acción delegada: {}", step.id, content);
            }
        }
        cursor = engine.next_step(&actual, &ctx)
                       .expect("evaluación de condiciones")
                       .map(String::from);
    }
    println!("Recorrido terminado");
}

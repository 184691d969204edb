use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;

use chrono::{Duration, Utc};
use flow::repository::FlowCatalog;
use flow::{FlowEngine, FlowService, FlowStubs};
use lead_domain::DomainFixtures;
use lead_metrics::{analytics_snapshot, average_response_rate, contacts_by_search_term, delivery_rate,
                   distribution_by_score_band, distribution_by_status, response_rate, total_sent, ScoreBand};

/// Pequeño menú interactivo para recorrer el dataset de demo con las
/// operaciones de la librería.
///
/// Opciones soportadas:
/// 1) Ver contactos (tabla con estado y puntaje)
/// 2) Buscar contactos por término
/// 3) Ver flujos registrados y su validación
/// 4) Avanzar el cursor de la conversación de demo
/// 5) Ver métricas de campañas y analítica
/// 6) Salir
fn main() -> Result<(), Box<dyn Error>> {
    let dataset = DomainFixtures::sample_dataset();
    let catalog = Arc::new(FlowStubs::sample_catalog());
    let service = FlowService::new(catalog.clone());

    loop {
        println!("\n== LeadFlow menu ==");
        println!("1) Ver contactos");
        println!("2) Buscar contactos por término");
        println!("3) Ver flujos y su validación");
        println!("4) Avanzar el cursor de la conversación de demo");
        println!("5) Ver métricas");
        println!("6) Salir");
        print!("Elige una opción: ");
        io::stdout().flush().ok();

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;
        match choice.trim() {
            "1" => {
                println!("\nID | NOMBRE               | ESTADO     | PUNTAJE | EMPRESA");
                println!("---------------------------------------------------------------");
                for c in dataset.contacts() {
                    println!("{:<2} | {:<20} | {:<10} | {:>7} | {}",
                             c.id(),
                             c.name(),
                             c.status(),
                             c.lead_score(),
                             c.company().unwrap_or("-"));
                }
            }
            "2" => {
                let term = prompt("Término de búsqueda: ")?;
                let encontrados = contacts_by_search_term(dataset.contacts(), term.trim());
                if encontrados.is_empty() {
                    println!("Sin coincidencias para '{}'", term.trim());
                }
                for c in encontrados {
                    println!("{} ({})", c.name(), c.phone());
                }
            }
            "3" => match catalog.list() {
                Ok(flows) => {
                    for f in flows {
                        let engine = FlowEngine::new(&f);
                        let estado = match engine.validate() {
                            Ok(()) => "válido".to_string(),
                            Err(issues) => format!("{} violaciones", issues.len()),
                        };
                        let huerfanos = engine.unreachable_steps();
                        println!("{} | {} pasos | {} | activo: {} | huérfanos: {:?}",
                                 f.id,
                                 f.steps.len(),
                                 estado,
                                 f.is_active,
                                 huerfanos);
                    }
                }
                Err(e) => eprintln!("Error listando flujos: {}", e),
            },
            "4" => {
                // La conversación de demo quedó detenida en la pregunta de
                // presupuesto del flujo de calificación.
                let conv = match dataset.conversation("conv-1") {
                    Some(c) => c,
                    None => {
                        eprintln!("No hay conversación de demo");
                        continue;
                    }
                };
                let (flujo, paso) = match (conv.current_flow(), conv.current_step()) {
                    (Some(f), Some(p)) => (f, p),
                    _ => {
                        println!("La conversación no tiene cursor de flujo");
                        continue;
                    }
                };
                let ctx = conv.qualification_context();
                match service.advance(flujo, paso, &ctx) {
                    Ok(Some(siguiente)) => println!("{} -> {}", paso, siguiente),
                    Ok(None) => println!("{}: el flujo queda detenido (sin transición)", paso),
                    Err(e) => eprintln!("Error avanzando el cursor: {}", e),
                }
            }
            "5" => {
                println!("\nDistribución por estado:");
                for (estado, cuenta) in distribution_by_status(dataset.contacts()) {
                    println!("  {:<10} {}", estado, cuenta);
                }
                println!("Distribución por banda de puntaje:");
                for (banda, cuenta) in distribution_by_score_band(dataset.contacts(), &ScoreBand::default_bands()) {
                    println!("  {:<7} {}", banda, cuenta);
                }
                println!("Campañas:");
                for campana in dataset.campaigns() {
                    println!("  {} | envíos: {} | entrega: {} | respuesta: {}",
                             campana.name(),
                             campana.metrics().sent(),
                             formato_tasa(delivery_rate(campana.metrics())),
                             formato_tasa(response_rate(campana.metrics())));
                }
                println!("Total enviado: {}", total_sent(dataset.campaigns()));
                println!("Tasa de respuesta promedio: {}",
                         formato_tasa(average_response_rate(dataset.campaigns())));

                let hoy = Utc::now().date_naive();
                let dias: Vec<_> = (0..7).rev().map(|d| hoy - Duration::days(d)).collect();
                let activos = catalog.active_count().unwrap_or(0) as u64;
                match analytics_snapshot(dataset.contacts(), dataset.conversations(), activos, &dias) {
                    Ok(snapshot) => {
                        println!("Analítica: {} contactos, {} conversaciones, {} calificados ({} de conversión)",
                                 snapshot.total_contacts(),
                                 snapshot.total_conversations(),
                                 snapshot.qualified_leads(),
                                 formato_tasa(snapshot.conversion_rate()));
                    }
                    Err(e) => eprintln!("Error armando la analítica: {}", e),
                }
            }
            "6" => {
                println!("Hasta luego");
                break;
            }
            otro => println!("Opción desconocida: {}", otro),
        }
    }

    Ok(())
}

fn prompt(texto: &str) -> Result<String, Box<dyn Error>> {
    print!("{}", texto);
    io::stdout().flush().ok();
    let mut linea = String::new();
    io::stdin().read_line(&mut linea)?;
    Ok(linea)
}

/// Formatea una tasa opcional: las indefinidas se muestran como "n/d" en
/// lugar de un NaN.
fn formato_tasa(tasa: Option<f64>) -> String {
    match tasa {
        Some(valor) => format!("{:.1}%", valor),
        None => "n/d".to_string(),
    }
}

//! Partial-update mechanism
//!
//! Server-rendered fragments arrive as whole [`Region`] values over a
//! channel from a background worker, in place of HTML over the wire. The
//! coordinator never owns the transport; it only reacts to the three
//! lifecycle events emitted around each request. Any backend can sit
//! behind the [`FragmentSource`] trait; [`DemoSource`] ships an
//! in-process one so the panel runs stand-alone.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crate::error::{FlotillaError, Result};
use crate::page::{ItineraryRow, Region, RegionBody, Stat};

/// Region ids the demo backend serves.
pub const REGION_RESUMEN: &str = "resumen";
pub const REGION_ITINERARIOS: &str = "itinerarios";

/// Lifecycle events of the partial-update mechanism.
///
/// `Before`/`AfterRequest` carry an optional target: a request that cannot
/// name its region still completes, and the hooks skip it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    BeforeRequest { target: Option<String> },
    AfterRequest { target: Option<String> },
    AfterSwap { target: String },
}

/// A fragment request: which region to re-render, with an optional search
/// query.
#[derive(Debug, Clone)]
pub struct FragmentRequest {
    pub region: String,
    pub query: Option<String>,
}

/// Worker-to-app message for a completed request.
#[derive(Debug)]
pub enum FragmentMessage {
    Ready(Region),
    Failed { region: String, message: String },
}

/// Anything that can render a region on demand.
pub trait FragmentSource: Send + 'static {
    fn render(&self, request: &FragmentRequest) -> Result<Region>;
}

/// Background worker resolving fragment requests off the UI thread.
pub struct FragmentWorker {
    requests: Sender<FragmentRequest>,
    messages: Receiver<FragmentMessage>,
}

impl FragmentWorker {
    /// Spawn the worker thread over a source.
    pub fn spawn<S: FragmentSource>(source: S) -> Self {
        let (req_tx, req_rx) = channel::<FragmentRequest>();
        let (msg_tx, msg_rx) = channel::<FragmentMessage>();

        thread::spawn(move || {
            while let Ok(request) = req_rx.recv() {
                let message = match source.render(&request) {
                    Ok(region) => FragmentMessage::Ready(region),
                    Err(e) => FragmentMessage::Failed {
                        region: request.region.clone(),
                        message: e.to_string(),
                    },
                };
                if msg_tx.send(message).is_err() {
                    break;
                }
            }
        });

        Self {
            requests: req_tx,
            messages: msg_rx,
        }
    }

    /// Queue a request. Fails only if the worker thread is gone.
    pub fn request(&self, request: FragmentRequest) -> Result<()> {
        self.requests
            .send(request)
            .map_err(|_| FlotillaError::WorkerGone)
    }

    /// Non-blocking poll for a completed fragment.
    pub fn try_recv(&self) -> Option<FragmentMessage> {
        self.messages.try_recv().ok()
    }

    #[cfg(test)]
    fn recv_timeout(&self, timeout: Duration) -> Option<FragmentMessage> {
        self.messages.recv_timeout(timeout).ok()
    }
}

/// Check if a haystack matches a pattern. Supports `*` wildcards
/// (`asun*`, `*ción`, `*del*`) or plain case-insensitive substring.
pub fn matches_pattern(haystack: &str, pattern: &str) -> bool {
    if pattern.is_empty() {
        return true;
    }
    let haystack = haystack.to_lowercase();
    let pattern = pattern.to_lowercase();

    let has_leading_star = pattern.starts_with('*');
    let has_trailing_star = pattern.ends_with('*');

    match (has_leading_star, has_trailing_star) {
        (true, true) if pattern.len() > 2 => haystack.contains(&pattern[1..pattern.len() - 1]),
        (true, true) => true,
        (true, false) => haystack.ends_with(&pattern[1..]),
        (false, true) => haystack.starts_with(&pattern[..pattern.len() - 1]),
        (false, false) => haystack.contains(pattern.as_str()),
    }
}

/// In-process fragment source with canned fleet data and an adjustable
/// latency to make the loading indicator visible.
pub struct DemoSource {
    latency: Duration,
    itinerarios: Vec<ItineraryRow>,
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::with_latency(Duration::from_millis(400))
    }
}

impl DemoSource {
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            itinerarios: demo_itinerarios(),
        }
    }

    fn render_resumen(&self) -> Region {
        let activos = self.itinerarios.len();
        Region {
            id: REGION_RESUMEN.to_string(),
            title: "Resumen".to_string(),
            body: RegionBody::Stats(vec![
                Stat {
                    id: "personas".to_string(),
                    label: "Personas".to_string(),
                    value: "48".to_string(),
                    hint: Some("Personas registradas en el sistema".to_string()),
                },
                Stat {
                    id: "buses".to_string(),
                    label: "Buses activos".to_string(),
                    value: "12".to_string(),
                    hint: Some("Buses en estado activo".to_string()),
                },
                Stat {
                    id: "empresas".to_string(),
                    label: "Empresas".to_string(),
                    value: "3".to_string(),
                    hint: Some("Empresas de transporte".to_string()),
                },
                Stat {
                    id: "itinerarios".to_string(),
                    label: "Itinerarios activos".to_string(),
                    value: activos.to_string(),
                    hint: Some("Itinerarios con ventas abiertas".to_string()),
                },
            ]),
            loading: false,
        }
    }

    fn render_itinerarios(&self, query: Option<&str>) -> Region {
        let pattern = query.unwrap_or("").trim();
        let rows: Vec<ItineraryRow> = self
            .itinerarios
            .iter()
            .filter(|row| {
                matches_pattern(&row.origen, pattern) || matches_pattern(&row.destino, pattern)
            })
            .cloned()
            .collect();
        Region {
            id: REGION_ITINERARIOS.to_string(),
            title: "Itinerarios".to_string(),
            body: RegionBody::Itinerarios(rows),
            loading: false,
        }
    }
}

impl FragmentSource for DemoSource {
    fn render(&self, request: &FragmentRequest) -> Result<Region> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        match request.region.as_str() {
            REGION_RESUMEN => Ok(self.render_resumen()),
            REGION_ITINERARIOS => Ok(self.render_itinerarios(request.query.as_deref())),
            other => Err(FlotillaError::UnknownRegion(other.to_string())),
        }
    }
}

fn demo_itinerarios() -> Vec<ItineraryRow> {
    let rows = [
        ("Asunción", "Encarnación", "2026-09-01 07:30", 120_000),
        ("Asunción", "Ciudad del Este", "2026-09-01 08:00", 110_000),
        ("Encarnación", "Asunción", "2026-09-01 15:45", 120_000),
        ("Ciudad del Este", "Asunción", "2026-09-02 06:15", 110_000),
        ("Asunción", "Concepción", "2026-09-02 21:00", 95_000),
        ("Villarrica", "Asunción", "2026-09-03 05:30", 60_000),
    ];
    rows.iter()
        .map(|(origen, destino, salida, precio)| ItineraryRow {
            origen: origen.to_string(),
            destino: destino.to_string(),
            salida: salida.to_string(),
            precio: *precio,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> DemoSource {
        DemoSource::with_latency(Duration::ZERO)
    }

    #[test]
    fn test_resumen_fragment() {
        let region = source()
            .render(&FragmentRequest {
                region: REGION_RESUMEN.to_string(),
                query: None,
            })
            .unwrap();
        match region.body {
            RegionBody::Stats(stats) => {
                assert_eq!(stats.len(), 4);
                assert!(stats.iter().all(|s| s.hint.is_some()));
            }
            other => panic!("expected stats, got {:?}", other),
        }
    }

    #[test]
    fn test_itinerarios_filtered_by_query() {
        let region = source()
            .render(&FragmentRequest {
                region: REGION_ITINERARIOS.to_string(),
                query: Some("encarna".to_string()),
            })
            .unwrap();
        match region.body {
            RegionBody::Itinerarios(rows) => {
                assert_eq!(rows.len(), 2);
            }
            other => panic!("expected rows, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let region = source()
            .render(&FragmentRequest {
                region: REGION_ITINERARIOS.to_string(),
                query: Some("   ".to_string()),
            })
            .unwrap();
        match region.body {
            RegionBody::Itinerarios(rows) => assert_eq!(rows.len(), 6),
            other => panic!("expected rows, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_region_fails() {
        let err = source()
            .render(&FragmentRequest {
                region: "finanzas".to_string(),
                query: None,
            })
            .unwrap_err();
        assert!(matches!(err, FlotillaError::UnknownRegion(_)));
    }

    #[test]
    fn test_matches_pattern_wildcards() {
        assert!(matches_pattern("Asunción", "asun*"));
        assert!(matches_pattern("Encarnación", "*ción"));
        assert!(matches_pattern("Ciudad del Este", "*del*"));
        assert!(matches_pattern("Villarrica", ""));
        assert!(!matches_pattern("Villarrica", "asun"));
    }

    #[test]
    fn test_worker_round_trip() {
        let worker = FragmentWorker::spawn(source());
        worker
            .request(FragmentRequest {
                region: REGION_RESUMEN.to_string(),
                query: None,
            })
            .unwrap();
        let msg = worker
            .recv_timeout(Duration::from_secs(2))
            .expect("worker should answer");
        assert!(matches!(msg, FragmentMessage::Ready(_)));
    }

    #[test]
    fn test_worker_reports_failures() {
        let worker = FragmentWorker::spawn(source());
        worker
            .request(FragmentRequest {
                region: "encomiendas".to_string(),
                query: None,
            })
            .unwrap();
        match worker.recv_timeout(Duration::from_secs(2)) {
            Some(FragmentMessage::Failed { region, .. }) => assert_eq!(region, "encomiendas"),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}

//! Retained page model
//!
//! The panel's visible content as data: named regions whose bodies can be
//! swapped wholesale by the fragment worker, dismissible alert banners, and
//! search forms. The GUI layer renders this model every frame; the
//! interaction coordinator mutates it.

/// Severity tag shared by alert banners and toast notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    /// Short label for display and logging.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "éxito",
            Severity::Warning => "aviso",
            Severity::Danger => "error",
        }
    }
}

/// A dashboard statistic card. `hint` marks the card for tooltip
/// activation.
#[derive(Debug, Clone)]
pub struct Stat {
    pub id: String,
    pub label: String,
    pub value: String,
    pub hint: Option<String>,
}

/// One row of itinerary search results.
#[derive(Debug, Clone)]
pub struct ItineraryRow {
    pub origen: String,
    pub destino: String,
    /// Departure timestamp as the backend emits it (formatted at render).
    pub salida: String,
    /// Ticket price in Guaraníes.
    pub precio: i64,
}

/// Body of a swappable region.
#[derive(Debug, Clone)]
pub enum RegionBody {
    Stats(Vec<Stat>),
    Itinerarios(Vec<ItineraryRow>),
    Text(String),
    /// Not yet loaded.
    Pendiente,
}

/// A named, swappable section of the page.
#[derive(Debug, Clone)]
pub struct Region {
    pub id: String,
    pub title: String,
    pub body: RegionBody,
    /// Set while a fragment request for this region is in flight.
    pub loading: bool,
}

impl Region {
    pub fn pending(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body: RegionBody::Pendiente,
            loading: false,
        }
    }
}

/// A dismissible alert banner. Hidden rather than deleted so render order
/// stays stable within a frame.
#[derive(Debug, Clone)]
pub struct AlertBanner {
    pub id: String,
    pub severity: Severity,
    pub text: String,
    pub dismissible: bool,
    pub visible: bool,
}

impl AlertBanner {
    pub fn new(id: &str, severity: Severity, text: &str) -> Self {
        Self {
            id: id.to_string(),
            severity,
            text: text.to_string(),
            dismissible: true,
            visible: true,
        }
    }
}

/// Visual state of a search form's submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonFace {
    #[default]
    Idle,
    Busy,
}

/// Submit button adjacent to a search input.
#[derive(Debug, Clone, Default)]
pub struct SubmitButton {
    pub face: ButtonFace,
}

/// A search form: an input, the results region its declarative binding
/// targets, and (usually) a submit button. Forms without a button still
/// exist in the markup; feedback degrades to a no-op for them.
#[derive(Debug, Clone)]
pub struct SearchForm {
    pub input_name: String,
    pub target_region: String,
    pub button: Option<SubmitButton>,
}

/// The whole visible page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub regions: Vec<Region>,
    pub alerts: Vec<AlertBanner>,
    pub forms: Vec<SearchForm>,
}

impl Page {
    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn region_mut(&mut self, id: &str) -> Option<&mut Region> {
        self.regions.iter_mut().find(|r| r.id == id)
    }

    /// Replace a region's body and title with a freshly rendered fragment.
    /// Returns false (and leaves the page untouched) when no region carries
    /// the fragment's id.
    pub fn swap_region(&mut self, fragment: Region) -> bool {
        match self.region_mut(&fragment.id) {
            Some(region) => {
                region.title = fragment.title;
                region.body = fragment.body;
                true
            }
            None => false,
        }
    }

    /// Hide an alert banner. Already-hidden or unknown ids are no-ops.
    pub fn dismiss_alert(&mut self, id: &str) -> bool {
        match self.alerts.iter_mut().find(|a| a.id == id && a.visible) {
            Some(alert) => {
                alert.visible = false;
                true
            }
            None => false,
        }
    }

    pub fn form(&self, input_name: &str) -> Option<&SearchForm> {
        self.forms.iter().find(|f| f.input_name == input_name)
    }

    pub fn form_mut(&mut self, input_name: &str) -> Option<&mut SearchForm> {
        self.forms.iter_mut().find(|f| f.input_name == input_name)
    }

    /// Enumerate tooltip-flagged widgets as (widget id, hint text) pairs.
    /// Widget ids are scoped by region so swapped-in fragments get fresh ids.
    pub fn flagged_widgets(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        for region in &self.regions {
            if let RegionBody::Stats(stats) = &region.body {
                for stat in stats {
                    if let Some(hint) = &stat.hint {
                        out.push((format!("{}/{}", region.id, stat.id), hint.clone()));
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_region(id: &str) -> Region {
        Region {
            id: id.to_string(),
            title: "Resumen".to_string(),
            body: RegionBody::Stats(vec![
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
                    hint: None,
                },
            ]),
            loading: false,
        }
    }

    #[test]
    fn test_swap_region_replaces_body() {
        let mut page = Page {
            regions: vec![Region::pending("resumen", "Resumen")],
            ..Default::default()
        };
        assert!(page.swap_region(stats_region("resumen")));
        assert!(matches!(
            page.region("resumen").unwrap().body,
            RegionBody::Stats(_)
        ));
    }

    #[test]
    fn test_swap_unknown_region_is_noop() {
        let mut page = Page::default();
        assert!(!page.swap_region(stats_region("resumen")));
        assert!(page.regions.is_empty());
    }

    #[test]
    fn test_dismiss_alert_once() {
        let mut page = Page {
            alerts: vec![AlertBanner::new("bienvenida", Severity::Info, "Hola")],
            ..Default::default()
        };
        assert!(page.dismiss_alert("bienvenida"));
        // Second dismissal of the same banner is a no-op.
        assert!(!page.dismiss_alert("bienvenida"));
        assert!(!page.dismiss_alert("inexistente"));
    }

    #[test]
    fn test_flagged_widgets_only_hinted() {
        let page = Page {
            regions: vec![stats_region("resumen")],
            ..Default::default()
        };
        let flagged = page.flagged_widgets();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].0, "resumen/buses");
    }
}

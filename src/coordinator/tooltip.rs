//! Tooltip activation
//!
//! Scans the page for hint-flagged widgets and attaches a controller per
//! widget id. Every activation pass attaches fresh controllers instead of
//! checking for existing ones; the expected usage is to re-run after each
//! fragment swap so newly inserted widgets are covered.

use std::collections::HashMap;

use crate::page::Page;

/// Hover controller for a single flagged widget.
#[derive(Debug, Clone)]
pub struct TooltipController {
    pub text: String,
    /// Activation pass that attached this controller.
    pub pass: u64,
}

/// All attached tooltip controllers, keyed by widget id.
#[derive(Debug, Default)]
pub struct TooltipRegistry {
    controllers: HashMap<String, TooltipController>,
    passes: u64,
}

impl TooltipRegistry {
    /// Attach fresh controllers to every flagged widget currently on the
    /// page. A page without flagged widgets is a no-op.
    pub fn activate(&mut self, page: &Page) {
        self.passes += 1;
        self.controllers.clear();
        for (widget_id, hint) in page.flagged_widgets() {
            self.controllers.insert(
                widget_id,
                TooltipController {
                    text: hint,
                    pass: self.passes,
                },
            );
        }
    }

    /// Hover text for a widget, if a controller is attached.
    pub fn hint_for(&self, widget_id: &str) -> Option<&str> {
        self.controllers.get(widget_id).map(|c| c.text.as_str())
    }

    pub fn controller(&self, widget_id: &str) -> Option<&TooltipController> {
        self.controllers.get(widget_id)
    }

    pub fn attached_count(&self) -> usize {
        self.controllers.len()
    }

    /// Number of activation passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Region, RegionBody, Stat};

    fn page_with_stats(stats: Vec<Stat>) -> Page {
        Page {
            regions: vec![Region {
                id: "resumen".to_string(),
                title: "Resumen".to_string(),
                body: RegionBody::Stats(stats),
                loading: false,
            }],
            ..Default::default()
        }
    }

    fn stat(id: &str, hint: Option<&str>) -> Stat {
        Stat {
            id: id.to_string(),
            label: id.to_string(),
            value: "0".to_string(),
            hint: hint.map(|h| h.to_string()),
        }
    }

    #[test]
    fn test_activate_attaches_flagged_only() {
        let page = page_with_stats(vec![stat("buses", Some("Buses activos")), stat("otros", None)]);
        let mut registry = TooltipRegistry::default();
        registry.activate(&page);
        assert_eq!(registry.attached_count(), 1);
        assert_eq!(registry.hint_for("resumen/buses"), Some("Buses activos"));
        assert_eq!(registry.hint_for("resumen/otros"), None);
    }

    #[test]
    fn test_empty_page_is_noop() {
        let mut registry = TooltipRegistry::default();
        registry.activate(&Page::default());
        assert_eq!(registry.attached_count(), 0);
    }

    #[test]
    fn test_reactivation_covers_swapped_content() {
        let mut page = page_with_stats(vec![stat("buses", Some("antes"))]);
        let mut registry = TooltipRegistry::default();
        registry.activate(&page);

        // Fragment swap brings a new flagged widget.
        page.swap_region(
            page_with_stats(vec![stat("buses", Some("después")), stat("empresas", Some("nuevo"))])
                .regions
                .remove(0),
        );
        registry.activate(&page);

        assert_eq!(registry.attached_count(), 2);
        assert_eq!(registry.hint_for("resumen/buses"), Some("después"));
        assert_eq!(registry.controller("resumen/buses").unwrap().pass, 2);
    }
}

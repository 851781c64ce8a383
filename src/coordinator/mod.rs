//! UI interaction coordinator
//!
//! Composes four independent concerns over the page model: tooltip
//! activation, partial-update lifecycle hooks, debounced search feedback,
//! and alert/toast lifecycles. All timing flows through explicit `Instant`
//! parameters; the GUI layer feeds wall-clock time, tests feed synthetic
//! offsets.

pub mod alert;
pub mod debounce;
pub mod refresh;
pub mod toast;
pub mod tooltip;

use std::collections::HashMap;
use std::time::Instant;

use crate::fragment::LifecycleEvent;
use crate::page::{Page, Severity};

use alert::AlertSchedule;
use debounce::SearchFeedback;
use toast::{Toast, ToastStack};
use tooltip::TooltipRegistry;

/// The coordinator. One instance per page, built once at load.
pub struct Coordinator {
    tooltips: TooltipRegistry,
    /// Feedback state per search input present at load.
    feedback: HashMap<String, SearchFeedback>,
    alerts: AlertSchedule,
    /// Shared toast container, created on first use.
    toasts: Option<ToastStack>,
}

impl Coordinator {
    /// Startup sequence. The four subsystems are order-insensitive; each
    /// initializes against whatever the page holds at this moment.
    pub fn start(page: &Page, now: Instant) -> Self {
        let mut tooltips = TooltipRegistry::default();
        tooltips.activate(page);

        let feedback = page
            .forms
            .iter()
            .map(|f| (f.input_name.clone(), SearchFeedback::default()))
            .collect();

        let alerts = AlertSchedule::capture(page, now);

        Self {
            tooltips,
            feedback,
            alerts,
            toasts: None,
        }
    }

    /// React to a partial-update lifecycle event.
    pub fn on_lifecycle(&mut self, event: &LifecycleEvent, page: &mut Page) {
        refresh::apply(event, page, &mut self.tooltips);
    }

    /// Handle a keystroke in a search input. Inputs not present at load
    /// (or without a form/button) degrade to no-ops.
    pub fn search_input(&mut self, input_name: &str, page: &mut Page, now: Instant) {
        if let Some(feedback) = self.feedback.get_mut(input_name) {
            feedback.on_input(page, input_name, now);
        }
    }

    /// Show a toast. The shared container is created lazily on the first
    /// call and reused for the lifetime of the page.
    pub fn show_toast(&mut self, message: &str, severity: Severity, now: Instant) {
        self.toasts
            .get_or_insert_with(ToastStack::new)
            .show(message, severity, now);
    }

    /// `show_toast` with the default severity.
    pub fn show_toast_info(&mut self, message: &str, now: Instant) {
        self.show_toast(message, Severity::Info, now);
    }

    /// Advance every timer-driven concern to `now`.
    pub fn tick(&mut self, page: &mut Page, now: Instant) {
        for (input_name, feedback) in &mut self.feedback {
            feedback.poll(page, input_name, now);
        }
        self.alerts.sweep(page, now);
        if let Some(stack) = &mut self.toasts {
            stack.sweep(now);
        }
    }

    pub fn tooltips(&self) -> &TooltipRegistry {
        &self.tooltips
    }

    /// Live toasts, oldest first. Empty before the first `show_toast`.
    pub fn toasts(&self) -> &[Toast] {
        self.toasts.as_ref().map(|s| s.toasts()).unwrap_or(&[])
    }

    /// Whether the container has ever been created.
    pub fn toast_container_exists(&self) -> bool {
        self.toasts.is_some()
    }

    /// Deadline of the pending reset for a search input, if any.
    pub fn pending_reset(&self, input_name: &str) -> Option<Instant> {
        self.feedback.get(input_name).and_then(|f| f.pending())
    }

    /// Earliest deadline across all scheduled timers. The GUI uses this to
    /// schedule its next repaint instead of polling every frame.
    pub fn next_deadline(&self) -> Option<Instant> {
        let debounce = self.feedback.values().filter_map(|f| f.pending()).min();
        let alerts = self.alerts.next_deadline();
        let toasts = self.toasts.as_ref().and_then(|s| s.next_deadline());
        [debounce, alerts, toasts].into_iter().flatten().min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::LifecycleEvent;
    use crate::page::{
        AlertBanner, ButtonFace, Region, RegionBody, SearchForm, Stat, SubmitButton,
    };
    use std::time::Duration;

    fn demo_page() -> Page {
        Page {
            regions: vec![Region::pending("resumen", "Resumen")],
            alerts: vec![AlertBanner::new("bienvenida", Severity::Info, "Hola")],
            forms: vec![SearchForm {
                input_name: "search".to_string(),
                target_region: "itinerarios".to_string(),
                button: Some(SubmitButton::default()),
            }],
        }
    }

    fn swapped_fragment() -> Region {
        Region {
            id: "resumen".to_string(),
            title: "Resumen".to_string(),
            body: RegionBody::Stats(vec![Stat {
                id: "buses".to_string(),
                label: "Buses".to_string(),
                value: "12".to_string(),
                hint: Some("Buses activos".to_string()),
            }]),
            loading: false,
        }
    }

    #[test]
    fn test_startup_initializes_all_concerns() {
        let page = demo_page();
        let coordinator = Coordinator::start(&page, Instant::now());
        assert_eq!(coordinator.tooltips().passes(), 1);
        assert!(!coordinator.toast_container_exists());
        assert!(coordinator.next_deadline().is_some(), "alert scheduled");
    }

    #[test]
    fn test_full_request_cycle() {
        let mut page = demo_page();
        let t0 = Instant::now();
        let mut coordinator = Coordinator::start(&page, t0);

        coordinator.on_lifecycle(
            &LifecycleEvent::BeforeRequest {
                target: Some("resumen".to_string()),
            },
            &mut page,
        );
        assert!(page.region("resumen").unwrap().loading);

        page.swap_region(swapped_fragment());
        coordinator.on_lifecycle(
            &LifecycleEvent::AfterRequest {
                target: Some("resumen".to_string()),
            },
            &mut page,
        );
        coordinator.on_lifecycle(
            &LifecycleEvent::AfterSwap {
                target: "resumen".to_string(),
            },
            &mut page,
        );

        assert!(!page.region("resumen").unwrap().loading);
        assert_eq!(
            coordinator.tooltips().hint_for("resumen/buses"),
            Some("Buses activos")
        );
    }

    #[test]
    fn test_toast_container_created_at_most_once() {
        let mut coordinator = Coordinator::start(&Page::default(), Instant::now());
        let t0 = Instant::now();

        coordinator.show_toast("Guardado", Severity::Success, t0);
        coordinator.show_toast("Error", Severity::Danger, t0);
        assert_eq!(coordinator.toasts().len(), 2);

        // Ids keep increasing across calls: same container throughout.
        let ids: Vec<u64> = coordinator.toasts().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let mut page = Page::default();
        coordinator.tick(&mut page, t0 + Duration::from_secs(10));
        assert!(coordinator.toasts().is_empty());
        assert!(coordinator.toast_container_exists());
    }

    #[test]
    fn test_tick_drives_debounce_and_alerts() {
        let mut page = demo_page();
        let t0 = Instant::now();
        let mut coordinator = Coordinator::start(&page, t0);

        coordinator.search_input("search", &mut page, t0);
        assert_eq!(
            page.form("search").unwrap().button.as_ref().unwrap().face,
            ButtonFace::Busy
        );

        coordinator.tick(&mut page, t0 + Duration::from_millis(500));
        assert_eq!(
            page.form("search").unwrap().button.as_ref().unwrap().face,
            ButtonFace::Idle
        );
        assert!(page.alerts[0].visible);

        coordinator.tick(&mut page, t0 + Duration::from_millis(5000));
        assert!(!page.alerts[0].visible);
    }

    #[test]
    fn test_unknown_input_is_noop() {
        let mut page = demo_page();
        let t0 = Instant::now();
        let mut coordinator = Coordinator::start(&page, t0);

        coordinator.search_input("otro", &mut page, t0);
        assert_eq!(coordinator.pending_reset("otro"), None);
        assert_eq!(
            page.form("search").unwrap().button.as_ref().unwrap().face,
            ButtonFace::Idle
        );
    }

    #[test]
    fn test_next_deadline_picks_earliest() {
        let mut page = demo_page();
        let t0 = Instant::now();
        let mut coordinator = Coordinator::start(&page, t0);

        // Only the alert deadline so far (+5000).
        let alert_deadline = coordinator.next_deadline().unwrap();

        coordinator.search_input("search", &mut page, t0);
        let debounce_deadline = coordinator.next_deadline().unwrap();
        assert!(debounce_deadline < alert_deadline);
    }
}

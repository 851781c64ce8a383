//! Alert auto-dismissal
//!
//! Captures the dismissible banners present when the page loads and hides
//! each one a fixed delay later. The capture runs once; banners inserted
//! afterwards are never scheduled. Dismissal is best-effort: a banner that
//! is already gone is simply skipped.

use std::time::{Duration, Instant};

use crate::logging;
use crate::page::Page;

/// Delay between page load and automatic dismissal.
pub const AUTO_DISMISS_DELAY: Duration = Duration::from_millis(5000);

/// One-shot dismissal schedule built at page load.
#[derive(Debug, Default)]
pub struct AlertSchedule {
    scheduled: Vec<(String, Instant)>,
}

impl AlertSchedule {
    /// Schedule every dismissible banner currently visible on the page.
    pub fn capture(page: &Page, now: Instant) -> Self {
        let scheduled = page
            .alerts
            .iter()
            .filter(|a| a.dismissible && a.visible)
            .map(|a| (a.id.clone(), now + AUTO_DISMISS_DELAY))
            .collect();
        Self { scheduled }
    }

    /// Dismiss every banner whose deadline has passed. Returns how many
    /// deadlines fired this call.
    pub fn sweep(&mut self, page: &mut Page, now: Instant) -> usize {
        let mut fired = 0;
        self.scheduled.retain(|(id, deadline)| {
            if now >= *deadline {
                if page.dismiss_alert(id) {
                    logging::log_alert_dismiss(id);
                }
                fired += 1;
                false
            } else {
                true
            }
        });
        fired
    }

    /// Earliest pending deadline, if any banners remain scheduled.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduled.iter().map(|(_, d)| *d).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{AlertBanner, Severity};

    fn page_with_alert(id: &str) -> Page {
        Page {
            alerts: vec![AlertBanner::new(id, Severity::Info, "Bienvenido")],
            ..Default::default()
        }
    }

    #[test]
    fn test_banner_dismissed_after_delay() {
        let mut page = page_with_alert("bienvenida");
        let t0 = Instant::now();
        let mut schedule = AlertSchedule::capture(&page, t0);

        // Just before the deadline nothing happens.
        assert_eq!(schedule.sweep(&mut page, t0 + Duration::from_millis(4999)), 0);
        assert!(page.alerts[0].visible);

        assert_eq!(schedule.sweep(&mut page, t0 + AUTO_DISMISS_DELAY), 1);
        assert!(!page.alerts[0].visible);
        assert_eq!(schedule.next_deadline(), None);
    }

    #[test]
    fn test_later_inserted_banner_never_scheduled() {
        let mut page = page_with_alert("bienvenida");
        let t0 = Instant::now();
        let mut schedule = AlertSchedule::capture(&page, t0);

        page.alerts
            .push(AlertBanner::new("tardio", Severity::Warning, "Nuevo"));

        schedule.sweep(&mut page, t0 + Duration::from_secs(60));
        assert!(!page.alerts[0].visible);
        assert!(page.alerts[1].visible, "dynamically added alert stays");
    }

    #[test]
    fn test_non_dismissible_banner_skipped() {
        let mut page = page_with_alert("fija");
        page.alerts[0].dismissible = false;
        let schedule = AlertSchedule::capture(&page, Instant::now());
        assert_eq!(schedule.next_deadline(), None);
    }

    #[test]
    fn test_vanished_banner_is_best_effort() {
        let mut page = page_with_alert("bienvenida");
        let t0 = Instant::now();
        let mut schedule = AlertSchedule::capture(&page, t0);

        // Something else removed the banner before the deadline.
        page.alerts.clear();
        assert_eq!(schedule.sweep(&mut page, t0 + AUTO_DISMISS_DELAY), 1);
    }
}

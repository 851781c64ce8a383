//! Partial-update lifecycle hooks
//!
//! Three hooks around the fragment mechanism: mark the target region as
//! loading before a request, clear the mark after it completes (success or
//! failure), and re-run tooltip activation after a swap. Events without an
//! identifiable target are skipped, not errors.

use crate::coordinator::tooltip::TooltipRegistry;
use crate::fragment::LifecycleEvent;
use crate::logging;
use crate::page::Page;

/// Apply one lifecycle event to the page.
pub fn apply(event: &LifecycleEvent, page: &mut Page, tooltips: &mut TooltipRegistry) {
    match event {
        LifecycleEvent::BeforeRequest { target } => {
            logging::log_lifecycle("before-request", target.as_deref());
            set_loading(page, target.as_deref(), true);
        }
        LifecycleEvent::AfterRequest { target } => {
            logging::log_lifecycle("after-request", target.as_deref());
            set_loading(page, target.as_deref(), false);
        }
        LifecycleEvent::AfterSwap { target } => {
            logging::log_lifecycle("after-swap", Some(target));
            tooltips.activate(page);
        }
    }
}

fn set_loading(page: &mut Page, target: Option<&str>, loading: bool) {
    let Some(target) = target else { return };
    if let Some(region) = page.region_mut(target) {
        region.loading = loading;
    }
}

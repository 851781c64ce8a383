//! Debounced search feedback
//!
//! On every keystroke the submit button flips to its busy face immediately,
//! and the reset back to idle is (re)scheduled one quiet window out. The
//! deadline lives in an `Option`, so at most one reset is ever pending per
//! input; each keystroke's deadline supersedes the previous one. Actual
//! submission belongs to the page's declarative fragment binding, not here.

use std::time::{Duration, Instant};

use crate::page::{ButtonFace, Page};

/// Quiet window after the last keystroke before the button face resets.
pub const QUIET_WINDOW: Duration = Duration::from_millis(500);

/// Per-input feedback state.
#[derive(Debug, Default)]
pub struct SearchFeedback {
    pending_reset: Option<Instant>,
}

impl SearchFeedback {
    /// Handle a keystroke. Inputs whose form or button is missing degrade
    /// to a no-op.
    pub fn on_input(&mut self, page: &mut Page, input_name: &str, now: Instant) {
        let Some(form) = page.form_mut(input_name) else {
            return;
        };
        let Some(button) = form.button.as_mut() else {
            return;
        };
        button.face = ButtonFace::Busy;
        self.pending_reset = Some(now + QUIET_WINDOW);
    }

    /// Fire the scheduled reset if its deadline has passed. Returns true
    /// when the button face was restored this call.
    pub fn poll(&mut self, page: &mut Page, input_name: &str, now: Instant) -> bool {
        match self.pending_reset {
            Some(deadline) if now >= deadline => {
                self.pending_reset = None;
                if let Some(button) = page.form_mut(input_name).and_then(|f| f.button.as_mut()) {
                    button.face = ButtonFace::Idle;
                }
                true
            }
            _ => false,
        }
    }

    /// Deadline of the pending reset, if one is scheduled.
    pub fn pending(&self) -> Option<Instant> {
        self.pending_reset
    }
}

//! Toast notifications
//!
//! Transient notifications collected in one shared stack (the container).
//! Each toast is visible for a fixed lifetime, fades out over a short
//! transition, and is removed exactly once when the transition ends. There
//! is no cancellation path; once shown, a toast runs to completion.

use std::time::{Duration, Instant};

use crate::logging;
use crate::page::Severity;

/// How long a toast stays fully visible.
pub const TOAST_LIFETIME: Duration = Duration::from_millis(3000);

/// Fade-out transition length after the lifetime expires.
pub const TOAST_FADE: Duration = Duration::from_millis(250);

/// Display phase of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Hiding,
}

/// One transient notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub phase: ToastPhase,
    shown_at: Instant,
}

impl Toast {
    /// Render opacity at `now`: 1.0 while visible, ramping to 0.0 across
    /// the fade window.
    pub fn opacity(&self, now: Instant) -> f32 {
        match self.phase {
            ToastPhase::Visible => 1.0,
            ToastPhase::Hiding => {
                let hide_started = self.shown_at + TOAST_LIFETIME;
                let elapsed = now.saturating_duration_since(hide_started);
                (1.0 - elapsed.as_secs_f32() / TOAST_FADE.as_secs_f32()).max(0.0)
            }
        }
    }
}

/// The shared toast container. Created lazily, exactly once, by the
/// coordinator on the first `show_toast` call.
#[derive(Debug)]
pub struct ToastStack {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastStack {
    pub fn new() -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a new toast and start its auto-hide clock. Returns its id.
    pub fn show(&mut self, message: &str, severity: Severity, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            message: message.to_string(),
            severity,
            phase: ToastPhase::Visible,
            shown_at: now,
        });
        logging::log_toast("show", id, severity.label());
        id
    }

    /// Advance toast phases: expired toasts start hiding, finished fades
    /// are removed. Each toast leaves the container exactly once.
    pub fn sweep(&mut self, now: Instant) {
        for toast in &mut self.toasts {
            if toast.phase == ToastPhase::Visible && now >= toast.shown_at + TOAST_LIFETIME {
                toast.phase = ToastPhase::Hiding;
            }
        }
        self.toasts.retain(|toast| {
            let done = toast.phase == ToastPhase::Hiding
                && now >= toast.shown_at + TOAST_LIFETIME + TOAST_FADE;
            if done {
                logging::log_toast("remove", toast.id, toast.severity.label());
            }
            !done
        });
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Next phase-change deadline among live toasts.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.toasts
            .iter()
            .map(|t| match t.phase {
                ToastPhase::Visible => t.shown_at + TOAST_LIFETIME,
                ToastPhase::Hiding => t.shown_at + TOAST_LIFETIME + TOAST_FADE,
            })
            .min()
    }
}

impl Default for ToastStack {
    fn default() -> Self {
        Self::new()
    }
}

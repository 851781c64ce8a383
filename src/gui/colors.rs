use eframe::egui::Color32;

use crate::page::Severity;

/// Fill colour for an alert banner or toast of the given severity.
pub fn severity_fill(severity: Severity) -> Color32 {
    match severity {
        Severity::Info => Color32::from_rgb(40, 80, 140),
        Severity::Success => Color32::from_rgb(40, 120, 60),
        Severity::Warning => Color32::from_rgb(150, 110, 30),
        Severity::Danger => Color32::from_rgb(150, 45, 45),
    }
}

/// Foreground text colour over `severity_fill`.
pub fn severity_text(_severity: Severity) -> Color32 {
    Color32::from_rgb(240, 240, 240)
}

/// Icon string for a severity tag.
pub fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "\u{2139}\u{FE0F}",
        Severity::Success => "\u{2705}",
        Severity::Warning => "\u{26A0}\u{FE0F}",
        Severity::Danger => "\u{274C}",
    }
}

/// Accent colour for dashboard stat values.
pub fn stat_accent() -> Color32 {
    Color32::from_rgb(100, 180, 255)
}

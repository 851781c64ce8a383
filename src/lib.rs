//! Flotilla - Desktop panel for long-distance bus fleet management
//!
//! The backend modules of the fleet system (reservas, encomiendas,
//! finanzas) live elsewhere; this crate is the front of house: a native
//! panel showing the dashboard and itinerary search, driven by a
//! **UI interaction coordinator** that handles
//!
//! - **Tooltips**: hint-flagged widgets get hover controllers, re-attached
//!   after every partial update
//! - **Partial updates**: regions are swapped wholesale by a background
//!   fragment worker; lifecycle hooks toggle loading indicators around
//!   each request
//! - **Debounced search**: the submit button shows a busy face while the
//!   user is typing, resetting after a quiet window
//! - **Alerts & toasts**: load-time banners auto-dismiss; transient
//!   notifications stack in a shared container and remove themselves
//!
//! # Example
//!
//! ```no_run
//! use std::time::Instant;
//! use flotilla::{Coordinator, Page, Severity};
//!
//! let page = Page::default();
//! let mut coordinator = Coordinator::start(&page, Instant::now());
//! coordinator.show_toast("Guardado", Severity::Success, Instant::now());
//! ```

pub mod coordinator;
pub mod error;
pub mod format;
pub mod fragment;
pub mod gui;
pub mod logging;
pub mod page;

// Re-export main types
pub use coordinator::Coordinator;
pub use error::{FlotillaError, Result};
pub use format::{format_fecha, format_guaranies};
pub use fragment::{
    DemoSource, FragmentMessage, FragmentRequest, FragmentSource, FragmentWorker, LifecycleEvent,
};
pub use page::{AlertBanner, Page, Region, RegionBody, SearchForm, Severity, Stat};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Request all regions on startup
    pub auto_refresh: bool,
    /// Show the welcome alert banner at load
    pub show_welcome_alert: bool,
    /// Simulated backend latency for the demo source, in milliseconds
    pub demo_latency_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auto_refresh: true,
            show_welcome_alert: true,
            demo_latency_ms: 400,
        }
    }
}

impl AppConfig {
    /// Default config path (same directory as executable)
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("flotilla.json")
    }

    /// Load a config file, JSON
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| FlotillaError::ConfigRead(path.display().to_string(), e))?;
        serde_json::from_str(&text)
            .map_err(|e| FlotillaError::ConfigParse(path.display().to_string(), e))
    }

    /// Write the config back out as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| FlotillaError::ConfigParse(path.display().to_string(), e))?;
        std::fs::write(path, text)
            .map_err(|e| FlotillaError::ConfigWrite(path.display().to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip() {
        let dir = std::env::temp_dir();
        let path = dir.join("flotilla_config_test.json");
        let config = AppConfig {
            auto_refresh: false,
            show_welcome_alert: false,
            demo_latency_ms: 10,
        };
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();
        assert!(!loaded.auto_refresh);
        assert_eq!(loaded.demo_latency_ms, 10);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let loaded: AppConfig = serde_json::from_str("{\"auto_refresh\": false}").unwrap();
        assert!(!loaded.auto_refresh);
        assert!(loaded.show_welcome_alert);
        assert_eq!(loaded.demo_latency_ms, 400);
    }
}

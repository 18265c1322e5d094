use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::engine::poller::{PollerConfig, DEFAULT_POLL_INTERVAL};

pub const DEFAULT_SHEET_URL: &str = "https://script.google.com/macros/s/XXXXXX/exec";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TrackerSettings {
    pub ui_scale: f32,

    /// Web-app URL that returns the roster sheet as a JSON array
    pub sheet_url: String,
    pub poll_interval_secs: u64,

    /// When set, the rendered table is also written here as `characterTable.html`
    pub html_output_dir: Option<PathBuf>,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            ui_scale: 1.0,
            sheet_url: DEFAULT_SHEET_URL.into(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL.as_secs(),
            html_output_dir: None,
        }
    }
}

impl TrackerSettings {
    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            interval: Duration::from_secs(self.poll_interval_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let s: TrackerSettings = serde_json::from_str(r#"{"ui_scale": 1.5}"#).unwrap();
        assert_eq!(s.ui_scale, 1.5);
        assert_eq!(s.poll_interval_secs, 30);
        assert_eq!(s.sheet_url, DEFAULT_SHEET_URL);
        assert!(s.html_output_dir.is_none());
    }

    #[test]
    fn test_poller_config_interval() {
        let s = TrackerSettings {
            poll_interval_secs: 5,
            ..Default::default()
        };
        assert_eq!(s.poller_config().interval, Duration::from_secs(5));
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};

use crate::ui::settings::TrackerSettings;

pub const SHEET_URL_ENV: &str = "BATTLE_TRACKER_SHEET_URL";

fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("battle_tracker");
    path.push("settings.json");
    path
}

pub fn load_settings() -> TrackerSettings {
    let mut settings = load_settings_from(&settings_path());

    if let Ok(url) = std::env::var(SHEET_URL_ENV) {
        if !url.trim().is_empty() {
            info!(env = SHEET_URL_ENV, "sheet URL overridden from environment");
            settings.sheet_url = url.trim().to_string();
        }
    }

    settings
}

pub fn load_settings_from(path: &Path) -> TrackerSettings {
    let Ok(text) = fs::read_to_string(path) else {
        return TrackerSettings::default();
    };

    match serde_json::from_str(&text) {
        Ok(settings) => settings,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable settings file");
            TrackerSettings::default()
        }
    }
}

pub fn save_settings(settings: &TrackerSettings) -> anyhow::Result<PathBuf> {
    let path = settings_path();
    save_settings_to(settings, &path)?;
    Ok(path)
}

pub fn save_settings_to(settings: &TrackerSettings, path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating settings directory {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = TrackerSettings {
            ui_scale: 1.25,
            sheet_url: "http://localhost:9000/roster".into(),
            poll_interval_secs: 10,
            html_output_dir: Some(dir.path().join("html")),
        };

        save_settings_to(&settings, &path).unwrap();
        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn test_missing_or_broken_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(load_settings_from(&path), TrackerSettings::default());

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings_from(&path), TrackerSettings::default());
    }
}

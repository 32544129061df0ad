use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::models::WidgetSettings;

const ENV_DATA_DIR: &str = "QUICKDIAL_DATA_DIR";

pub fn data_dir() -> PathBuf {
    std::env::var(ENV_DATA_DIR)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config").join("settings.json")
}

/// Widget settings from settings.json, falling back to defaults when the
/// file is missing or unreadable. A corrupt settings file must not take the
/// widget down.
pub fn load_settings(data_dir: &Path) -> WidgetSettings {
    let path = settings_path(data_dir);
    if !path.exists() {
        return WidgetSettings::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid settings file {}: {}", path.display(), e);
                WidgetSettings::default()
            }
        },
        Err(e) => {
            log::warn!("Failed to read settings file {}: {}", path.display(), e);
            WidgetSettings::default()
        }
    }
}

pub fn save_settings(data_dir: &Path, settings: &WidgetSettings) -> Result<()> {
    let path = settings_path(data_dir);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = serde_json::to_string_pretty(settings)?;
    std::fs::write(&path, serialized)?;
    Ok(())
}

//! Application settings

use serde::{Deserialize, Serialize};

use crate::i18n::Lang;

/// Viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Show camera pose readout in the corner of the viewport
    pub show_camera_info: bool,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [0x11, 0x11, 0x13],
            show_camera_info: false,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { font_size: 14.0 }
    }
}

/// All application settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub viewport: ViewportSettings,
    #[serde(default)]
    pub ui: UiSettings,
    #[serde(default)]
    pub language: Lang,
}

impl AppSettings {
    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "lathe-explorer", "lathe-explorer")
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        let Some(dirs) = Self::project_dirs() else {
            return Self::default();
        };
        let config_path = dirs.config_dir().join("settings.json");
        match std::fs::read_to_string(&config_path) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                tracing::warn!("{}: {e}, using defaults", config_path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid settings: {e}"))
    }

    /// Save settings to file. Failures are logged and otherwise ignored.
    pub fn save(&self) {
        let Some(dirs) = Self::project_dirs() else {
            tracing::warn!("no config directory, settings not saved");
            return;
        };
        if let Err(e) = self.save_to(&dirs.config_dir().join("settings.json")) {
            tracing::warn!("{e}");
        }
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("failed to create {}: {e}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("failed to serialize settings: {e}"))?;
        std::fs::write(path, json).map_err(|e| format!("failed to save {}: {e}", path.display()))
    }

    pub fn background_color(&self) -> egui::Color32 {
        let [r, g, b] = self.viewport.background_color;
        egui::Color32::from_rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let s = AppSettings::from_json(r#"{"ui": {"font_size": 18.0}}"#).unwrap();
        assert_eq!(s.ui.font_size, 18.0);
        assert_eq!(s.viewport, ViewportSettings::default());
        assert_eq!(s.language, Lang::En);
    }

    #[test]
    fn test_language_roundtrip() {
        let s = AppSettings {
            language: Lang::Ru,
            ..Default::default()
        };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(AppSettings::from_json(&json).unwrap(), s);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(AppSettings::from_json("{not json").is_err());
    }

    #[test]
    fn test_save_to_writes_readable_file() {
        let dir = std::env::temp_dir().join(format!("lathe-explorer-settings-{}", std::process::id()));
        let path = dir.join("nested").join("settings.json");
        let s = AppSettings {
            language: Lang::Ru,
            ..Default::default()
        };
        s.save_to(&path).unwrap();
        let json = std::fs::read_to_string(&path).unwrap();
        assert_eq!(AppSettings::from_json(&json).unwrap(), s);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_to_reports_directory_failure() {
        let dir = std::env::temp_dir().join(format!("lathe-explorer-blocked-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        // A plain file where the config directory should be
        let blocker = dir.join("config");
        std::fs::write(&blocker, "").unwrap();

        let err = AppSettings::default()
            .save_to(&blocker.join("settings.json"))
            .unwrap_err();
        assert!(err.starts_with("failed to create"), "{err}");
        let _ = std::fs::remove_dir_all(&dir);
    }
}

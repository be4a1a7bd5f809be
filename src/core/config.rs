//! Tool settings with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

/// Background chart image the overlay is calibrated against
pub const DEFAULT_CHART_IMAGE: &str = "wb_c172s.png";

/// Settings that are not part of a load sheet
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path of the envelope chart image embedded in reports
    pub chart_image: Option<PathBuf>,

    /// Directory reports are written to
    pub output_dir: Option<PathBuf>,

    /// Load sheet used when none is given on the command line
    pub load_sheet: Option<PathBuf>,
}

impl Settings {
    /// Load settings from all sources, merging in priority order
    pub fn load() -> Self {
        let mut settings = Settings::default();

        // 1. Global user config (~/.config/wnb/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                match std::fs::read_to_string(&global_path)
                    .map_err(|e| e.to_string())
                    .and_then(|c| serde_yml::from_str::<Settings>(&c).map_err(|e| e.to_string()))
                {
                    Ok(global) => settings.merge(global),
                    Err(e) => {
                        tracing::warn!(path = %global_path.display(), error = %e, "ignoring config file")
                    }
                }
            }
        }

        // 2. Environment variables
        settings.merge(Self::from_env(|key| std::env::var(key).ok()));

        settings
    }

    /// Settings given through `WNB_*` variables
    fn from_env(var: impl Fn(&str) -> Option<String>) -> Self {
        Settings {
            chart_image: var("WNB_CHART_IMAGE").map(PathBuf::from),
            output_dir: var("WNB_OUTPUT_DIR").map(PathBuf::from),
            load_sheet: var("WNB_LOAD_SHEET").map(PathBuf::from),
        }
    }

    /// Path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "wnb")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another layer into this one (other takes precedence)
    fn merge(&mut self, other: Settings) {
        if other.chart_image.is_some() {
            self.chart_image = other.chart_image;
        }
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.load_sheet.is_some() {
            self.load_sheet = other.load_sheet;
        }
    }

    pub fn chart_image(&self) -> PathBuf {
        self.chart_image
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CHART_IMAGE))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn load_sheet(&self) -> PathBuf {
        self.load_sheet
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::core::loadsheet::DEFAULT_LOAD_SHEET))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.chart_image(), PathBuf::from("wb_c172s.png"));
        assert_eq!(settings.output_dir(), PathBuf::from("."));
        assert_eq!(settings.load_sheet(), PathBuf::from("weight_and_balance.json"));
    }

    #[test]
    fn test_env_layer_overrides_file_layer() {
        let mut settings: Settings =
            serde_yml::from_str("chart_image: file.png\noutput_dir: reports\n").unwrap();
        settings.merge(Settings::from_env(|key| match key {
            "WNB_CHART_IMAGE" => Some("env.png".to_string()),
            _ => None,
        }));

        assert_eq!(settings.chart_image(), PathBuf::from("env.png"));
        assert_eq!(settings.output_dir(), PathBuf::from("reports"));
    }
}

// Analyzer settings: embedded defaults, optionally overridden by a JSON file.
use charts::{ChartPalette, PageStyle, MIN_PAGE_SIZE};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::EngineError;

pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnalyzerSettings {
    pub api_url: String,
    pub vs_currency: String,
    pub interval: String,
    pub default_days: u32,
    pub short_window: usize,
    pub long_window: usize,
    pub request_timeout_secs: u64,
    pub output_dir: PathBuf,
    pub chart: ChartSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
    /// "light" or "dark"
    pub theme: String,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        AnalyzerSettings {
            api_url: DEFAULT_API_URL.to_string(),
            vs_currency: "usd".to_string(),
            interval: "daily".to_string(),
            default_days: 365,
            short_window: 50,
            long_window: 200,
            request_timeout_secs: 30,
            output_dir: PathBuf::from("charts"),
            chart: ChartSettings::default(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        ChartSettings {
            width: 1500,
            height: 1000,
            theme: "light".to_string(),
        }
    }
}

impl AnalyzerSettings {
    /// Settings shipped with the binary (`engine/config/default.json`).
    pub fn load_default() -> Result<Self, EngineError> {
        let config_str = include_str!("../../config/default.json");
        let settings: AnalyzerSettings = serde_json::from_str(config_str)
            .map_err(|e| EngineError::ConfigError(format!("Invalid embedded defaults: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads the embedded defaults, then applies the user file if one is given.
    /// Fields missing from the user file keep their default values.
    pub fn load(path: Option<&Path>) -> Result<Self, EngineError> {
        let settings = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    EngineError::ConfigError(format!("Failed to read '{}': {}", path.display(), e))
                })?;
                serde_json::from_str::<AnalyzerSettings>(&raw).map_err(|e| {
                    EngineError::ConfigError(format!("Failed to parse '{}': {}", path.display(), e))
                })?
            }
            None => return Self::load_default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.api_url.trim().is_empty() {
            return Err(EngineError::ConfigError("api_url cannot be empty".to_string()));
        }
        if self.short_window == 0 || self.long_window == 0 {
            return Err(EngineError::ConfigError("Moving average windows must be greater than 0".to_string()));
        }
        if self.short_window >= self.long_window {
            return Err(EngineError::ConfigError(format!(
                "short_window ({}) must be smaller than long_window ({})",
                self.short_window, self.long_window
            )));
        }
        if self.default_days == 0 {
            return Err(EngineError::ConfigError("default_days must be positive".to_string()));
        }
        if !matches!(self.chart.theme.as_str(), "light" | "dark") {
            return Err(EngineError::ConfigError(format!(
                "Unknown chart theme '{}', expected \"light\" or \"dark\"",
                self.chart.theme
            )));
        }
        if self.chart.width < MIN_PAGE_SIZE || self.chart.height < MIN_PAGE_SIZE {
            return Err(EngineError::ConfigError(format!(
                "Chart pages must be at least {}x{}, got {}x{}",
                MIN_PAGE_SIZE, MIN_PAGE_SIZE, self.chart.width, self.chart.height
            )));
        }
        Ok(())
    }

    pub fn page_style(&self) -> PageStyle {
        let palette = match self.chart.theme.as_str() {
            "dark" => ChartPalette::default_dark(),
            _ => ChartPalette::default_light(),
        };
        PageStyle {
            width: self.chart.width,
            height: self.chart.height,
            palette,
            currency: self.vs_currency.to_uppercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_embedded_defaults_match_default_impl() {
        let loaded = AnalyzerSettings::load_default().unwrap();
        assert_eq!(loaded, AnalyzerSettings::default());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let file = write_config(r#"{ "vs_currency": "eur", "chart": { "width": 800 } }"#);
        let settings = AnalyzerSettings::load(Some(file.path())).unwrap();
        assert_eq!(settings.vs_currency, "eur");
        assert_eq!(settings.chart.width, 800);
        assert_eq!(settings.chart.height, 1000);
        assert_eq!(settings.short_window, 50);
        assert_eq!(settings.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_windows_must_be_ordered() {
        let file = write_config(r#"{ "short_window": 200, "long_window": 50 }"#);
        let err = AnalyzerSettings::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("must be smaller than long_window"));
    }

    #[test]
    fn test_zero_window_rejected() {
        let settings = AnalyzerSettings { short_window: 0, ..AnalyzerSettings::default() };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_page_size_must_fit_panel_margins() {
        let file = write_config(r#"{ "chart": { "width": 200, "height": 200 } }"#);
        let err = AnalyzerSettings::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("at least 400x400"));

        let file = write_config(r#"{ "chart": { "width": 400, "height": 399 } }"#);
        assert!(AnalyzerSettings::load(Some(file.path())).is_err());

        let file = write_config(r#"{ "chart": { "width": 400, "height": 400 } }"#);
        assert!(AnalyzerSettings::load(Some(file.path())).is_ok());
    }

    #[test]
    fn test_unknown_theme_rejected() {
        let file = write_config(r#"{ "chart": { "theme": "neon" } }"#);
        assert!(AnalyzerSettings::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_page_style_from_settings() {
        let settings = AnalyzerSettings {
            vs_currency: "eur".to_string(),
            chart: ChartSettings { theme: "dark".to_string(), ..ChartSettings::default() },
            ..AnalyzerSettings::default()
        };
        let style = settings.page_style();
        assert_eq!(style.currency, "EUR");
        assert_eq!(style.palette, ChartPalette::default_dark());
        assert_eq!((style.width, style.height), (1500, 1000));
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let file = write_config("{ not json");
        let err = AnalyzerSettings::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = AnalyzerSettings::load(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(_)));
    }
}
